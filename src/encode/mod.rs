//! Frame encoding and frame sinks.
//!
//! The wire form of a frame is a raw `SCREEN_WIDTH * SCREEN_HEIGHT * SCREEN_COLORS` byte dump with
//! no header; the display driver knows the dimensions out of band.

/// Canvas to byte encoding.
pub mod frame;
/// Consumers of encoded frames.
pub mod sink;
