use super::axes::Axes;
use super::style::{ItemStyle, LineStyle};
use crate::core::{Cell, CellStyle, Color, Grid};

/// A registered drawable series and its per-frame data buffer.
#[derive(Debug, Clone)]
pub struct Item {
    style: ItemStyle,
    color: Color,
    alpha: f64,
    legend_label: Option<String>,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Item {
    pub fn new(style: ItemStyle, color: Color, alpha: f64, legend_label: Option<String>) -> Self {
        Self {
            style,
            color,
            alpha,
            legend_label,
            x: Vec::new(),
            y: Vec::new(),
        }
    }

    pub fn style(&self) -> ItemStyle {
        self.style
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn legend_label(&self) -> Option<&str> {
        self.legend_label.as_deref()
    }

    pub fn data(&self) -> (&[f64], &[f64]) {
        (&self.x, &self.y)
    }

    /// Overwrites the data buffer, reusing its allocation.
    pub fn set_data(&mut self, x: &[f64], y: &[f64]) {
        self.x.clear();
        self.x.extend_from_slice(x);
        self.y.clear();
        self.y.extend_from_slice(y);
    }

    /// Glyph shown for this item in the legend.
    pub fn legend_glyph(&self) -> char {
        match (self.style.marker, self.style.line) {
            (Some(marker), _) => marker.glyph(),
            (None, Some(line)) if line.dotted() => '┄',
            _ => '─',
        }
    }

    /// Ink style for a cell, blended toward whatever background it sits on.
    pub(crate) fn ink(&self, under: &Cell) -> CellStyle {
        CellStyle {
            fg: self.color.blend(under.style.bg, self.alpha),
            bg: under.style.bg,
            bold: false,
            dim: false,
        }
    }

    /// Rasterises the current data onto `grid`, clipped to the axes box.
    pub fn draw(&self, axes: &Axes, grid: &mut Grid) {
        if let Some(line) = self.style.line {
            self.draw_line(axes, grid, line);
        }
        if let Some(marker) = self.style.marker {
            for (&x, &y) in self.x.iter().zip(&self.y) {
                if let Some((cx, cy)) = axes.to_cell(x, y) {
                    self.stamp(grid, cx, cy, marker.glyph());
                }
            }
        }
    }

    fn stamp(&self, grid: &mut Grid, cx: usize, cy: usize, glyph: char) {
        if let Some(cell) = grid.get_mut(cx, cy) {
            let style = self.ink(cell);
            *cell = Cell::new(glyph).with_style(style);
        }
    }

    fn draw_line(&self, axes: &Axes, grid: &mut Grid, line: LineStyle) {
        let points: Vec<(f64, f64)> = self
            .x
            .iter()
            .zip(&self.y)
            .map(|(&x, &y)| (x, y))
            .collect();

        // consecutive segments; non-finite points break the polyline
        let mut step = 0;
        for pair in points.windows(2) {
            let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
            if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
                continue;
            }
            // only the visible part is walked
            let Some((a, b)) = axes.clip_segment((x0, y0), (x1, y1)) else {
                continue;
            };
            let from = axes.to_cell_f(a.0, a.1);
            let to = axes.to_cell_f(b.0, b.1);
            step = self.draw_segment(axes, grid, from, to, line, step);
        }
    }

    /// DDA walk between two continuous cell positions. Returns the dash step
    /// to continue from so patterns flow across segments.
    fn draw_segment(
        &self,
        axes: &Axes,
        grid: &mut Grid,
        (x0, y0): (f64, f64),
        (x1, y1): (f64, f64),
        line: LineStyle,
        mut step: usize,
    ) -> usize {
        let dx = x1 - x0;
        // rows are twice as tall as columns
        let dy = (y1 - y0) * 2.0;
        let glyph = if line.dotted() {
            '·'
        } else if dy.abs() < dx.abs() * 0.5 {
            '─'
        } else if dx.abs() < dy.abs() * 0.5 {
            '│'
        } else if (dx > 0.0) == (dy > 0.0) {
            '╲'
        } else {
            '╱'
        };

        let n = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
        let mut last = None;
        for i in 0..=n {
            let t = i as f64 / n as f64;
            let cx = (x0 + (x1 - x0) * t).round();
            let cy = (y0 + (y1 - y0) * t).round();
            let Some(cell) = axes.clip(cx, cy) else {
                continue;
            };
            if last == Some(cell) {
                continue;
            }
            last = Some(cell);
            if line.is_on(step) {
                self.stamp(grid, cell.0, cell.1, glyph);
            }
            step += 1;
        }
        step
    }
}
