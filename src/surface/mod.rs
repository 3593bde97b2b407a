//! Display backends a [`Renderer`](crate::Renderer) presents its canvas to.

pub mod headless;
#[cfg(feature = "crossterm")]
pub mod terminal;

use crate::core::Grid;
use crate::error::Result;
use std::time::Duration;

pub use headless::HeadlessSurface;
#[cfg(feature = "crossterm")]
pub use terminal::TerminalSurface;

/// An interactive display that can show a full canvas once and then take
/// partial updates.
pub trait Surface {
    /// Current size in cells.
    fn size(&self) -> (usize, usize);

    /// Largest size [`resize`](Surface::resize) can grant, if bounded.
    fn max_size(&self) -> Option<(usize, usize)> {
        None
    }

    /// Requests a new size and returns the one actually applied.
    fn resize(&mut self, width: usize, height: usize) -> Result<(usize, usize)>;

    /// Makes the surface visible and draws `grid` in full. Must not block.
    fn show(&mut self, grid: &Grid) -> Result<()>;

    /// Pushes the dirty rows of `grid` to the display.
    fn blit(&mut self, grid: &Grid) -> Result<()>;

    /// Drains pending input and redraw events.
    fn flush_events(&mut self) -> Result<()>;

    /// Blocks for `duration` while keeping the display responsive.
    fn pause(&mut self, duration: Duration) -> Result<()> {
        self.flush_events()?;
        std::thread::sleep(duration);
        Ok(())
    }

    /// Whether the user has closed the display.
    fn is_closed(&self) -> bool {
        false
    }
}
