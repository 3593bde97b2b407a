pub mod cell;
pub mod grid;

pub use cell::{Cell, CellStyle, Color};
pub use grid::Grid;
