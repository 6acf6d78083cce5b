use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::frame::Frame;
use crate::foundation::error::SignResult;

/// Configuration handed to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Nominal ticks per second of the producing loop.
    pub fps: u32,
}

/// Consumer of frames in tick order.
///
/// `push_frame` is called with strictly increasing tick indices between `begin` and `end`.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> SignResult<()>;
    /// Push one frame together with the status text shown alongside it.
    fn push_frame(&mut self, tick: u64, frame: &Frame, status: &str) -> SignResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> SignResult<()>;
}

/// Sink that keeps everything in memory, for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, Frame, String)>,
    ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured `(tick, frame, status)` triples in push order.
    pub fn frames(&self) -> &[(u64, Frame, String)] {
        &self.frames
    }

    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> SignResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, tick: u64, frame: &Frame, status: &str) -> SignResult<()> {
        self.frames.push((tick, frame.clone(), status.to_owned()));
        Ok(())
    }

    fn end(&mut self) -> SignResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Sink that writes each frame as `frame_NNNNN.png` into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    scale: u32,
    written: usize,
}

impl PngSequenceSink {
    /// Write into `dir`, creating it on `begin`. Each LED becomes a `scale x scale` block.
    pub fn new(dir: impl Into<PathBuf>, scale: u32) -> Self {
        Self {
            dir: dir.into(),
            scale,
            written: 0,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of files written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Path of the file written for `tick`.
    pub fn path_for(&self, tick: u64) -> PathBuf {
        self.dir.join(format!("frame_{tick:05}.png"))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> SignResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, tick: u64, frame: &Frame, _status: &str) -> SignResult<()> {
        let path = self.path_for(tick);
        frame
            .to_rgb_image(self.scale)
            .save_with_format(&path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> SignResult<()> {
        tracing::info!(dir = %self.dir.display(), frames = self.written, "png sequence written");
        Ok(())
    }
}

/// Write a single frame as a PNG.
pub fn write_png(frame: &Frame, path: &Path, scale: u32) -> SignResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    frame
        .to_rgb_image(scale)
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
