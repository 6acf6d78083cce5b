//! Per-frame pixel buffer and the drawing primitives tasks render with.

/// The fixed-size pixel buffer.
pub mod buffer;
/// Line, rectangle and ellipse primitives.
pub mod graphics;
