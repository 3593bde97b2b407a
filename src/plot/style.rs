//! Item styles and the format-string shorthand used to pick them.
//!
//! A format string combines an optional color, marker and line style, in any
//! order: `"o"`, `"-"`, `"r--"`, `"x:"`, `"C2o-"`. A color-only string such
//! as `"g"` draws a solid line, matching the usual plotting convention.

use crate::core::Color;
use crate::error::{PlotError, Result};
use std::str::FromStr;

/// Default color cycle, assigned to items without an explicit color in
/// registration order.
pub const COLOR_CYCLE: [Color; 10] = [
    Color::new(0x1f, 0x77, 0xb4),
    Color::new(0xff, 0x7f, 0x0e),
    Color::new(0x2c, 0xa0, 0x2c),
    Color::new(0xd6, 0x27, 0x28),
    Color::new(0x94, 0x67, 0xbd),
    Color::new(0x8c, 0x56, 0x4b),
    Color::new(0xe3, 0x77, 0xc2),
    Color::new(0x7f, 0x7f, 0x7f),
    Color::new(0xbc, 0xbd, 0x22),
    Color::new(0x17, 0xbe, 0xcf),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerStyle {
    #[default]
    Circle,
    Point,
    Pixel,
    Cross,
    Plus,
    Square,
    TriangleUp,
    TriangleDown,
    Star,
    Diamond,
}

impl MarkerStyle {
    fn from_code(c: char) -> Option<Self> {
        Some(match c {
            'o' => Self::Circle,
            '.' => Self::Point,
            ',' => Self::Pixel,
            'x' => Self::Cross,
            '+' => Self::Plus,
            's' => Self::Square,
            '^' => Self::TriangleUp,
            'v' => Self::TriangleDown,
            '*' => Self::Star,
            'D' => Self::Diamond,
            _ => return None,
        })
    }

    pub fn glyph(self) -> char {
        match self {
            Self::Circle => '●',
            Self::Point => '•',
            Self::Pixel => '·',
            Self::Cross => '×',
            Self::Plus => '+',
            Self::Square => '■',
            Self::TriangleUp => '▲',
            Self::TriangleDown => '▼',
            Self::Star => '★',
            Self::Diamond => '◆',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl LineStyle {
    /// Whether the `step`-th cell along a line is inked.
    pub fn is_on(self, step: usize) -> bool {
        match self {
            Self::Solid => true,
            Self::Dashed => step % 4 < 2,
            Self::Dotted => step % 2 == 0,
            Self::DashDot => matches!(step % 6, 0 | 1 | 3),
        }
    }

    /// Dotted lines use a light glyph everywhere.
    pub fn dotted(self) -> bool {
        matches!(self, Self::Dotted)
    }
}

/// Resolved drawing style of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemStyle {
    pub marker: Option<MarkerStyle>,
    pub line: Option<LineStyle>,
    pub color: Option<Color>,
}

impl Default for ItemStyle {
    fn default() -> Self {
        Self {
            marker: Some(MarkerStyle::Circle),
            line: None,
            color: None,
        }
    }
}

impl ItemStyle {
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl FromStr for ItemStyle {
    type Err = PlotError;

    fn from_str(fmt: &str) -> Result<Self> {
        let invalid = || PlotError::InvalidStyle(fmt.to_string());
        let mut marker = None;
        let mut line = None;
        let mut color = None;

        let chars: Vec<char> = fmt.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();

            if let Some(style) = line_code(c, next) {
                if line.replace(style).is_some() {
                    return Err(invalid());
                }
                i += if matches!(style, LineStyle::Dashed | LineStyle::DashDot) { 2 } else { 1 };
            } else if let Some(m) = MarkerStyle::from_code(c) {
                if marker.replace(m).is_some() {
                    return Err(invalid());
                }
                i += 1;
            } else if c == 'C' && next.is_some_and(|d| d.is_ascii_digit()) {
                let idx = next.and_then(|d| d.to_digit(10)).unwrap_or(0) as usize;
                if color.replace(COLOR_CYCLE[idx]).is_some() {
                    return Err(invalid());
                }
                i += 2;
            } else if let Some(col) = color_code(c) {
                if color.replace(col).is_some() {
                    return Err(invalid());
                }
                i += 1;
            } else {
                return Err(invalid());
            }
        }

        if marker.is_none() && line.is_none() {
            line = Some(LineStyle::Solid);
        }

        Ok(Self {
            marker,
            line,
            color,
        })
    }
}

fn line_code(c: char, next: Option<char>) -> Option<LineStyle> {
    match (c, next) {
        ('-', Some('-')) => Some(LineStyle::Dashed),
        ('-', Some('.')) => Some(LineStyle::DashDot),
        ('-', _) => Some(LineStyle::Solid),
        (':', _) => Some(LineStyle::Dotted),
        _ => None,
    }
}

fn color_code(c: char) -> Option<Color> {
    Some(match c {
        'b' => Color::BLUE,
        'g' => Color::GREEN,
        'r' => Color::RED,
        'c' => Color::new(0, 191, 191),
        'm' => Color::new(191, 0, 191),
        'y' => Color::new(191, 191, 0),
        'k' => Color::BLACK,
        'w' => Color::WHITE,
        _ => return None,
    })
}
