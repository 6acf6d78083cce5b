//! Caller-facing runtime: the task gateway and the rotation scheduler built on it.
//!
//! Everything here runs synchronously on the caller's thread. One call is outstanding at a
//! time, so a task that stalls inside `draw` stalls the whole display.

/// Hands out lifecycle handles for the enabled tasks.
pub mod gateway;
/// Rotates through the active tasks tick by tick.
pub mod scheduler;
