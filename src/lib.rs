pub mod core;
pub mod demo;
pub mod error;
pub mod plot;
pub mod surface;

#[cfg(test)]
mod tests;

pub use crate::core::{Cell, CellStyle, Color, Grid};
pub use error::{PlotError, Result};
pub use plot::{
    DEFAULT_LABEL, DEFAULT_XLIM, FramePhase, ItemStyle, Limits, LineStyle, MarkerStyle, Renderer,
    RendererOptions, SimpleRenderer,
};
pub use surface::{HeadlessSurface, Surface};
#[cfg(feature = "crossterm")]
pub use surface::TerminalSurface;
