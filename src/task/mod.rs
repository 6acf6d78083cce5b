//! The task contract, its lifecycle wrapper, the compiled-in registry and status text.

/// The [`base::Task`] trait and task metadata.
pub mod base;
/// Lifecycle-enforcing wrapper handed to callers.
pub mod handle;
/// Static table of known tasks.
pub mod registry;
/// Two-line status text for the auxiliary LCD.
pub mod status;
