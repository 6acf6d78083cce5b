use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng as _};

use crate::canvas::buffer::Canvas;
use crate::foundation::core::{SCREEN_HEIGHT, SCREEN_WIDTH, palette};
use crate::foundation::error::SignResult;
use crate::task::base::{Task, TaskInfo};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Site {
    Blocked,
    Open,
    /// Open and connected to the top row.
    Filled,
}

/// Site percolation: one random site opens per frame until water from the top row reaches the
/// bottom row.
pub struct Percolate {
    info: TaskInfo,
    grid: Vec<Site>,
    rng: StdRng,
    percolated: bool,
}

fn idx(x: usize, y: usize) -> usize {
    x * SCREEN_HEIGHT + y
}

impl Percolate {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic variant for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            info: TaskInfo::new("Percolate", "Luna"),
            grid: Vec::new(),
            rng,
            percolated: false,
        }
    }

    pub fn boxed() -> Box<dyn Task> {
        Box::new(Self::new())
    }

    pub fn percolated(&self) -> bool {
        self.percolated
    }

    /// Open a random blocked site, if any are left.
    fn open_random_site(&mut self) {
        let blocked = self.grid.iter().filter(|s| **s == Site::Blocked).count();
        if blocked == 0 {
            return;
        }
        let pick = self.rng.gen_range(0..blocked);
        if let Some(site) = self
            .grid
            .iter_mut()
            .filter(|s| **s == Site::Blocked)
            .nth(pick)
        {
            *site = Site::Open;
        }
    }

    /// Recompute which open sites connect to the top row; returns whether any reaches the
    /// bottom row.
    fn flood(&mut self) -> bool {
        for site in &mut self.grid {
            if *site == Site::Filled {
                *site = Site::Open;
            }
        }

        let mut queue: VecDeque<(usize, usize)> = VecDeque::new();
        for x in 0..SCREEN_WIDTH {
            if self.grid[idx(x, 0)] == Site::Open {
                self.grid[idx(x, 0)] = Site::Filled;
                queue.push_back((x, 0));
            }
        }

        while let Some((x, y)) = queue.pop_front() {
            let neighbours = [
                x.checked_sub(1).map(|nx| (nx, y)),
                (x + 1 < SCREEN_WIDTH).then_some((x + 1, y)),
                y.checked_sub(1).map(|ny| (x, ny)),
                (y + 1 < SCREEN_HEIGHT).then_some((x, y + 1)),
            ];
            for (nx, ny) in neighbours.into_iter().flatten() {
                if self.grid[idx(nx, ny)] == Site::Open {
                    self.grid[idx(nx, ny)] = Site::Filled;
                    queue.push_back((nx, ny));
                }
            }
        }

        (0..SCREEN_WIDTH).any(|x| self.grid[idx(x, SCREEN_HEIGHT - 1)] == Site::Filled)
    }
}

impl Default for Percolate {
    fn default() -> Self {
        Self::new()
    }
}

impl Task for Percolate {
    fn info(&self) -> &TaskInfo {
        &self.info
    }

    fn prepare(&mut self) -> SignResult<bool> {
        self.grid = vec![Site::Blocked; SCREEN_WIDTH * SCREEN_HEIGHT];
        self.percolated = false;
        Ok(true)
    }

    fn draw_frame(&mut self, canvas: &mut Canvas, _delta_secs: f64) -> SignResult<bool> {
        if self.grid.is_empty() {
            return Ok(false);
        }
        if !self.percolated {
            self.open_random_site();
            self.percolated = self.flood();
        }

        for x in 0..SCREEN_WIDTH {
            for y in 0..SCREEN_HEIGHT {
                let color = match self.grid[idx(x, y)] {
                    Site::Blocked => continue,
                    Site::Open => palette::GRAY,
                    Site::Filled => palette::TEAL,
                };
                canvas.set(x as i32, y as i32, color);
            }
        }
        Ok(!self.percolated)
    }

    fn teardown(&mut self, _forced: bool) {
        self.grid = Vec::new();
    }
}
