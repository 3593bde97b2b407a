pub mod axes;
pub mod item;
pub mod legend;
pub mod options;
pub mod renderer;
pub mod simple;
pub mod style;

pub use axes::{Axes, CELL_ASPECT, Rect};
pub use item::Item;
pub use options::{DEFAULT_XLIM, Limits, RendererOptions};
pub use renderer::{FramePhase, ItemBuilder, Renderer, SETTLE_DELAY};
pub use simple::{DEFAULT_LABEL, SimpleRenderer};
pub use style::{COLOR_CYCLE, ItemStyle, LineStyle, MarkerStyle};
