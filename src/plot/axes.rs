//! Axes layout and static decorations.
//!
//! Everything painted here ends up in the background snapshot: frame, ticks,
//! tick labels, axis labels, title and grid. The data box keeps a 1:1 data
//! aspect ratio by shrinking whichever dimension has room to spare and
//! centering the result ("adjustable box").

use super::options::{Limits, RendererOptions};
use crate::core::{Cell, CellStyle, Color, Grid};
use unicode_width::UnicodeWidthStr;

/// Height of a terminal cell relative to its width.
pub const CELL_ASPECT: f64 = 2.0;

/// Data aspect lock: one x unit is as long as one y unit.
pub const EQUAL_ASPECT: f64 = 1.0;

/// Ticks aimed for on each axis.
const TARGET_TICKS: usize = 5;

/// Upper bound on ticks per axis, whatever the limits.
const MAX_TICKS: usize = 64;

/// Outer padding (columns, rows) when not in tight mode.
const PAD: (usize, usize) = (2, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Figure size that keeps the data aspect after a tight resize.
///
/// Width is kept; height follows `aspect * (y2 - y1) / (x2 - x1)` measured in
/// square units, then converted to rows.
pub fn tight_figure_size(width: usize, aspect: f64, xlim: Limits, ylim: Limits) -> (usize, usize) {
    let ratio = aspect * (ylim[1] - ylim[0]) / (xlim[1] - xlim[0]);
    let rows = (ratio * width as f64 / CELL_ASPECT).round().max(1.0) as usize;
    (width.max(1), rows)
}

/// Scales `size` down proportionally until it fits inside `max`.
pub fn fit_within(size: (usize, usize), max: (usize, usize)) -> (usize, usize) {
    let (w, h) = size;
    let scale = (max.0 as f64 / w as f64).min(max.1 as f64 / h as f64);
    if scale >= 1.0 {
        return size;
    }
    (
        ((w as f64 * scale).floor() as usize).max(1),
        ((h as f64 * scale).floor() as usize).max(1),
    )
}

/// Tick positions at a "nice" step (1, 2 or 5 times a power of ten).
pub fn nice_ticks(limits: Limits, target: usize) -> (Vec<f64>, f64) {
    let [lo, hi] = limits;
    let raw = (hi - lo) / target.max(1) as f64;
    let exponent = raw.log10().floor() as i32;
    // divide by exact powers of ten so steps like 0.5 come out exact
    let scale = |v: f64| {
        if exponent >= 0 {
            v * 10f64.powi(exponent)
        } else {
            v / 10f64.powi(-exponent)
        }
    };
    let normalized = if exponent >= 0 {
        raw / 10f64.powi(exponent)
    } else {
        raw * 10f64.powi(-exponent)
    };
    let step = scale(if normalized < 1.5 {
        1.0
    } else if normalized < 3.0 {
        2.0
    } else if normalized < 7.0 {
        5.0
    } else {
        10.0
    });

    let eps = step * 1e-9;
    let first = (lo / step - 1e-9).ceil() * step;
    let count = (((hi + eps - first) / step).floor().max(0.0) as usize).min(MAX_TICKS);
    let ticks = (0..=count)
        .map(|i| first + i as f64 * step)
        .filter(|&value| value <= hi + eps)
        // -0.0 prints as "-0"
        .map(|value| if value.abs() < eps { 0.0 } else { value })
        .collect();
    (ticks, step)
}

fn tick_decimals(step: f64) -> usize {
    (-step.log10().floor()).max(0.0) as usize
}

pub fn format_tick(value: f64, step: f64) -> String {
    format!("{:.*}", tick_decimals(step), value)
}

#[derive(Debug, Clone)]
pub struct Axes {
    xlim: Limits,
    ylim: Limits,
    aspect: f64,
    figure: (usize, usize),
    plot: Rect,
    xticks: Vec<f64>,
    yticks: Vec<f64>,
    xstep: f64,
    ystep: f64,
    title: Option<String>,
    xlabel: Option<String>,
    ylabel: Option<String>,
    hide_axis: bool,
    grid: bool,
}

impl Axes {
    /// Lays out the axes for a figure of `width × height` cells.
    pub fn new(options: &RendererOptions, width: usize, height: usize) -> Self {
        let xlim = options.xlim;
        let ylim = options.resolved_ylim();
        let (xticks, xstep) = nice_ticks(xlim, TARGET_TICKS);
        let (yticks, ystep) = nice_ticks(ylim, TARGET_TICKS);

        let mut axes = Self {
            xlim,
            ylim,
            aspect: EQUAL_ASPECT,
            figure: (width, height),
            plot: Rect::default(),
            xticks,
            yticks,
            xstep,
            ystep,
            title: options.title.clone(),
            xlabel: options.xlabel.clone(),
            ylabel: options.ylabel.clone(),
            hide_axis: options.hide_axis,
            grid: options.enable_grid,
        };
        axes.plot = axes.layout(options.tight);
        axes
    }

    fn layout(&self, tight: bool) -> Rect {
        let (width, height) = self.figure;
        let (pad_x, pad_y) = if tight { (0, 0) } else { PAD };

        let mut top = pad_y + usize::from(self.title.is_some());
        let mut bottom = pad_y;
        let mut left = pad_x;
        let mut right = pad_x;

        if !self.hide_axis {
            // frame on all sides, tick labels below and left
            top += 1;
            right += 1;
            bottom += 2 + usize::from(self.xlabel.is_some());
            left += 1 + self.ytick_label_width() + usize::from(self.ylabel.is_some()) * 2;
        }

        let avail_w = width.saturating_sub(left + right).max(1);
        let avail_h = height.saturating_sub(top + bottom).max(1);

        let dx = self.xlim[1] - self.xlim[0];
        let dy = self.ylim[1] - self.ylim[0];

        // columns per data unit
        let scale = (avail_w as f64 / dx).min(avail_h as f64 * CELL_ASPECT / (dy * self.aspect));
        let box_w = ((dx * scale).round() as usize).clamp(1, avail_w);
        let box_h = ((dy * self.aspect * scale / CELL_ASPECT).round() as usize).clamp(1, avail_h);

        Rect {
            x: left + (avail_w - box_w) / 2,
            y: top + (avail_h - box_h) / 2,
            width: box_w,
            height: box_h,
        }
    }

    pub fn figure_size(&self) -> (usize, usize) {
        self.figure
    }

    /// The data area, excluding the frame.
    pub fn plot_area(&self) -> Rect {
        self.plot
    }

    pub fn xlim(&self) -> Limits {
        self.xlim
    }

    pub fn ylim(&self) -> Limits {
        self.ylim
    }

    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    pub fn xticks(&self) -> &[f64] {
        &self.xticks
    }

    pub fn yticks(&self) -> &[f64] {
        &self.yticks
    }

    /// Continuous cell coordinates of a data point; not clipped.
    pub fn to_cell_f(&self, x: f64, y: f64) -> (f64, f64) {
        let fx = (x - self.xlim[0]) / (self.xlim[1] - self.xlim[0]);
        let fy = (self.ylim[1] - y) / (self.ylim[1] - self.ylim[0]);
        (
            self.plot.x as f64 + fx * (self.plot.width - 1) as f64,
            self.plot.y as f64 + fy * (self.plot.height - 1) as f64,
        )
    }

    /// Cell holding a data point, or `None` when it falls outside the limits.
    pub fn to_cell(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let (cx, cy) = self.to_cell_f(x, y);
        self.clip(cx.round(), cy.round())
    }

    pub(crate) fn clip(&self, cx: f64, cy: f64) -> Option<(usize, usize)> {
        if cx < 0.0 || cy < 0.0 {
            return None;
        }
        let (cx, cy) = (cx as usize, cy as usize);
        self.plot.contains(cx, cy).then_some((cx, cy))
    }

    /// Clips the data segment `from -> to` to the axis limits.
    ///
    /// Returns `None` when the segment misses the data box. Works on halved
    /// coordinates so segments between opposite extremes do not overflow.
    pub fn clip_segment(
        &self,
        from: (f64, f64),
        to: (f64, f64),
    ) -> Option<((f64, f64), (f64, f64))> {
        let (x0, y0) = from;
        let (x1, y1) = to;
        let dx = 0.5 * x1 - 0.5 * x0;
        let dy = 0.5 * y1 - 0.5 * y0;
        let edges = [
            (-dx, 0.5 * x0 - 0.5 * self.xlim[0]),
            (dx, 0.5 * self.xlim[1] - 0.5 * x0),
            (-dy, 0.5 * y0 - 0.5 * self.ylim[0]),
            (dy, 0.5 * self.ylim[1] - 0.5 * y0),
        ];

        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
        for (p, q) in edges {
            if p == 0.0 {
                // parallel to this edge
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }

        let lerp = |t: f64| (x0 * (1.0 - t) + x1 * t, y0 * (1.0 - t) + y1 * t);
        let (a, b) = (lerp(t0), lerp(t1));
        (a.0.is_finite() && a.1.is_finite() && b.0.is_finite() && b.1.is_finite()).then_some((a, b))
    }

    /// Paints the static decorations onto a cleared grid.
    pub fn paint(&self, grid: &mut Grid) {
        grid.clear();

        if let Some(title) = &self.title {
            let style = CellStyle::default().bold();
            let y = self.plot.y.saturating_sub(if self.hide_axis { 1 } else { 2 });
            self.put_centered(grid, y, title, style);
        }

        if self.hide_axis {
            return;
        }

        if self.grid {
            self.paint_grid(grid);
        }
        self.paint_frame(grid);
        self.paint_ticks(grid);

        let label_style = CellStyle::default();
        if let Some(xlabel) = &self.xlabel {
            self.put_centered(grid, self.plot.bottom() + 2, xlabel, label_style);
        }
        if let Some(ylabel) = &self.ylabel {
            let x = self.plot.x.saturating_sub(self.left_decoration_width());
            let chars: Vec<char> = ylabel.chars().collect();
            let start = (self.plot.y + self.plot.height / 2).saturating_sub(chars.len() / 2);
            for (i, c) in chars.into_iter().enumerate() {
                grid.set_clipped(x, start + i, Cell::new(c).with_style(label_style));
            }
        }
    }

    fn ytick_label_width(&self) -> usize {
        self.yticks
            .iter()
            .map(|&v| format_tick(v, self.ystep).width())
            .max()
            .unwrap_or(0)
    }

    /// Frame, y tick labels and the gap before the y label.
    fn left_decoration_width(&self) -> usize {
        1 + self.ytick_label_width() + 2
    }

    fn put_centered(&self, grid: &mut Grid, y: usize, text: &str, style: CellStyle) {
        let center = self.plot.x + self.plot.width / 2;
        let x = center.saturating_sub(text.width() / 2);
        grid.put_str(x, y, text, style);
    }

    fn paint_frame(&self, grid: &mut Grid) {
        let style = CellStyle::default();
        let left = self.plot.x.saturating_sub(1);
        let top = self.plot.y.saturating_sub(1);
        let right = self.plot.right();
        let bottom = self.plot.bottom();

        for x in left + 1..right {
            grid.set_clipped(x, top, Cell::new('─').with_style(style));
            grid.set_clipped(x, bottom, Cell::new('─').with_style(style));
        }
        for y in top + 1..bottom {
            grid.set_clipped(left, y, Cell::new('│').with_style(style));
            grid.set_clipped(right, y, Cell::new('│').with_style(style));
        }
        grid.set_clipped(left, top, Cell::new('┌').with_style(style));
        grid.set_clipped(right, top, Cell::new('┐').with_style(style));
        grid.set_clipped(left, bottom, Cell::new('└').with_style(style));
        grid.set_clipped(right, bottom, Cell::new('┘').with_style(style));
    }

    fn paint_ticks(&self, grid: &mut Grid) {
        let style = CellStyle::default();
        let frame_bottom = self.plot.bottom();
        let frame_left = self.plot.x.saturating_sub(1);

        for &tick in &self.xticks {
            let (cx, _) = self.to_cell_f(tick, self.ylim[0]);
            let cx = cx.round() as usize;
            grid.set_clipped(cx, frame_bottom, Cell::new('┬').with_style(style));
            let label = format_tick(tick, self.xstep);
            let x = cx.saturating_sub(label.width() / 2);
            grid.put_str(x, frame_bottom + 1, &label, style);
        }

        for &tick in &self.yticks {
            let (_, cy) = self.to_cell_f(self.xlim[0], tick);
            let cy = cy.round() as usize;
            grid.set_clipped(frame_left, cy, Cell::new('┤').with_style(style));
            let label = format_tick(tick, self.ystep);
            let x = frame_left.saturating_sub(label.width());
            grid.put_str(x, cy, &label, style);
        }
    }

    fn paint_grid(&self, grid: &mut Grid) {
        let style = CellStyle::default().with_fg(Color::GRAY).dim();
        let cols: Vec<usize> = self
            .xticks
            .iter()
            .map(|&t| self.to_cell_f(t, self.ylim[0]).0.round() as usize)
            .collect();
        let rows: Vec<usize> = self
            .yticks
            .iter()
            .map(|&t| self.to_cell_f(self.xlim[0], t).1.round() as usize)
            .collect();

        for &y in &rows {
            for x in self.plot.x..self.plot.right() {
                grid.set_clipped(x, y, Cell::new('┈').with_style(style));
            }
        }
        for &x in &cols {
            for y in self.plot.y..self.plot.bottom() {
                let c = if rows.contains(&y) { '┼' } else { '┊' };
                grid.set_clipped(x, y, Cell::new(c).with_style(style));
            }
        }
    }
}
