use super::Surface;
use crate::core::Grid;
use crate::error::Result;
use std::time::Duration;

/// Off-screen surface that keeps its own front buffer.
///
/// Blits copy only dirty rows into the front buffer, exactly like a real
/// display would receive them. Pauses are accounted for, not slept.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    width: usize,
    height: usize,
    max_size: Option<(usize, usize)>,
    front: Option<Grid>,
    frames: usize,
    rows_blitted: usize,
    event_flushes: usize,
    paused: Duration,
}

impl HeadlessSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            max_size: None,
            front: None,
            frames: 0,
            rows_blitted: 0,
            event_flushes: 0,
            paused: Duration::ZERO,
        }
    }

    pub fn with_max_size(mut self, width: usize, height: usize) -> Self {
        self.max_size = Some((width, height));
        self
    }

    pub fn is_shown(&self) -> bool {
        self.front.is_some()
    }

    /// What the display currently shows.
    pub fn front(&self) -> Option<&Grid> {
        self.front.as_ref()
    }

    pub fn frames_presented(&self) -> usize {
        self.frames
    }

    pub fn rows_blitted(&self) -> usize {
        self.rows_blitted
    }

    pub fn event_flushes(&self) -> usize {
        self.event_flushes
    }

    pub fn total_paused(&self) -> Duration {
        self.paused
    }
}

impl Surface for HeadlessSurface {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn max_size(&self) -> Option<(usize, usize)> {
        self.max_size
    }

    fn resize(&mut self, width: usize, height: usize) -> Result<(usize, usize)> {
        let (width, height) = match self.max_size {
            Some((max_w, max_h)) => (width.min(max_w), height.min(max_h)),
            None => (width, height),
        };
        self.width = width;
        self.height = height;
        if let Some(front) = &mut self.front {
            front.resize(width, height);
        }
        Ok((width, height))
    }

    fn show(&mut self, grid: &Grid) -> Result<()> {
        self.front = Some(grid.clone());
        Ok(())
    }

    fn blit(&mut self, grid: &Grid) -> Result<()> {
        let front = self.front.get_or_insert_with(|| Grid::new(grid.width(), grid.height()));
        for y in grid.dirty_rows() {
            if let Some(row) = grid.row(y) {
                for (x, cell) in row.iter().enumerate() {
                    front.set_clipped(x, y, *cell);
                }
                self.rows_blitted += 1;
            }
        }
        self.frames += 1;
        Ok(())
    }

    fn flush_events(&mut self) -> Result<()> {
        self.event_flushes += 1;
        Ok(())
    }

    fn pause(&mut self, duration: Duration) -> Result<()> {
        self.flush_events()?;
        self.paused += duration;
        Ok(())
    }
}
