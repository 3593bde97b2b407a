use serde::{Deserialize, Serialize};

/// RGB Color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
    pub const GREEN: Color = Color { r: 0, g: 128, b: 0 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255 };
    pub const GRAY: Color = Color {
        r: 176,
        g: 176,
        b: 176,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Composites `self` over `under` with the given opacity.
    ///
    /// `alpha` is clamped to `[0, 1]`; `1.0` yields `self`, `0.0` yields `under`.
    pub fn blend(self, under: Color, alpha: f64) -> Color {
        let alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        let mix = |top: u8, bottom: u8| {
            (top as f64 * alpha + bottom as f64 * (1.0 - alpha)).round() as u8
        };
        Color {
            r: mix(self.r, under.r),
            g: mix(self.g, under.g),
            b: mix(self.b, under.b),
        }
    }
}

/// Cell style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellStyle {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub dim: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Color::BLACK,
            bg: Color::WHITE,
            bold: false,
            dim: false,
        }
    }
}

impl CellStyle {
    pub fn with_fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }
}

/// Single canvas cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub character: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            character: ' ',
            style: CellStyle::default(),
        }
    }
}

impl Cell {
    pub fn new(character: char) -> Self {
        Self {
            character,
            style: CellStyle::default(),
        }
    }

    pub fn with_style(mut self, style: CellStyle) -> Self {
        self.style = style;
        self
    }
}
