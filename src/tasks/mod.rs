//! Built-in animations. Each one is registered in `task::registry::BUILTIN_TASKS`.

pub mod color_sweep;
pub mod error;
pub mod memory_stress;
pub mod percolate;
pub mod rainbow_wave;
