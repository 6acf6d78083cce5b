use rand::rngs::StdRng;
use rand::{RngCore as _, SeedableRng as _};

use crate::canvas::buffer::Canvas;
use crate::foundation::core::{SCREEN_WIDTH, palette};
use crate::foundation::error::SignResult;
use crate::task::base::{Task, TaskInfo};

const CHUNK_BYTES: usize = 1024 * 1024;
/// Scratch chunks kept alive at once; older chunks are recycled.
const MAX_HELD_CHUNKS: usize = 32;

/// Diagnostic that churns through scratch memory and lights one pixel per MiB allocated during
/// the run.
///
/// Only the newest 32 MiB stay held; older chunks are dropped as new ones arrive, so the lit
/// count tracks allocation volume rather than resident memory.
///
/// Once more than a panel's worth of MiB has been allocated the pixel index runs off the bottom
/// of the canvas; those writes are clipped.
pub struct MemoryStress {
    info: TaskInfo,
    rng: StdRng,
    held: Vec<Vec<u8>>,
    allocated_mib: usize,
}

impl MemoryStress {
    pub fn new() -> Self {
        Self {
            info: TaskInfo::new("Memory Stress", "Luna"),
            rng: StdRng::from_entropy(),
            held: Vec::new(),
            allocated_mib: 0,
        }
    }

    pub fn boxed() -> Box<dyn Task> {
        Box::new(Self::new())
    }

    /// MiB allocated since `prepare`.
    pub fn allocated_mib(&self) -> usize {
        self.allocated_mib
    }

    /// Scratch bytes currently held.
    pub fn held_bytes(&self) -> usize {
        self.held.iter().map(Vec::len).sum()
    }

    #[cfg(test)]
    fn with_allocated_mib(mut self, mib: usize) -> Self {
        self.allocated_mib = mib;
        self
    }
}

impl Default for MemoryStress {
    fn default() -> Self {
        Self::new()
    }
}

impl Task for MemoryStress {
    fn info(&self) -> &TaskInfo {
        &self.info
    }

    fn prepare(&mut self) -> SignResult<bool> {
        self.held.clear();
        self.allocated_mib = 0;
        Ok(true)
    }

    fn draw_frame(&mut self, canvas: &mut Canvas, _delta_secs: f64) -> SignResult<bool> {
        let mut chunk = vec![0u8; CHUNK_BYTES];
        self.rng.fill_bytes(&mut chunk);
        if self.held.len() >= MAX_HELD_CHUNKS {
            self.held.remove(0);
        }
        self.held.push(chunk);
        self.allocated_mib += 1;

        for j in 0..self.allocated_mib {
            let x = (j % SCREEN_WIDTH) as i32;
            let y = i32::try_from(j / SCREEN_WIDTH).unwrap_or(i32::MAX);
            canvas.set(x, y, palette::WHITE);
        }
        Ok(true)
    }

    fn teardown(&mut self, forced: bool) {
        tracing::debug!(
            forced,
            allocated_mib = self.allocated_mib,
            "releasing scratch memory"
        );
        self.held = Vec::new();
        self.allocated_mib = 0;
    }
}
