//! c4sign renders animations onto a 32x32 RGB LED panel and a 16x2 status LCD.
//!
//! Animations implement [`Task`] and are listed in one compiled-in table
//! ([`BUILTIN_TASKS`]). A caller obtains [`TaskHandle`]s from the [`Gateway`], drives them as
//! `prepare`, `draw`*, `teardown`, and after every draw reads the encoded frame and the status
//! text. [`Scheduler`] does that rotation itself for callers that only want frames.
#![forbid(unsafe_code)]

mod foundation;

/// Pixel buffer and drawing primitives.
pub mod canvas;
/// Runtime configuration.
pub mod config;
/// Frame encoding and sinks.
pub mod encode;
/// Gateway and scheduler.
pub mod runtime;
/// Task contract, lifecycle, registry and status text.
pub mod task;
/// Built-in animations.
pub mod tasks;

pub use crate::foundation::core::{
    FRAME_LEN, LCD_WIDTH, Rgb8, Rgba8, SCREEN_COLORS, SCREEN_HEIGHT, SCREEN_WIDTH, STATUS_LEN,
    palette,
};
pub use crate::foundation::error::{SignError, SignResult};
pub use crate::foundation::math::{lerp, map_value};

pub use crate::canvas::buffer::Canvas;
pub use crate::config::SignConfig;
pub use crate::encode::frame::{Frame, encode};
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig, write_png};
pub use crate::runtime::gateway::Gateway;
pub use crate::runtime::scheduler::{Scheduler, SchedulerEvent, Tick};
pub use crate::task::base::{Task, TaskInfo};
pub use crate::task::handle::{LifecycleState, TaskHandle};
pub use crate::task::registry::{BUILTIN_TASKS, Registry, TaskDescriptor, TaskFactory};
pub use crate::task::status::{StatusText, render_status};
