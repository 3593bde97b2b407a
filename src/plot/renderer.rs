use super::axes::{Axes, EQUAL_ASPECT, fit_within, tight_figure_size};
use super::item::Item;
use super::legend::draw_legend;
use super::options::RendererOptions;
use super::style::{COLOR_CYCLE, ItemStyle};
use crate::core::Grid;
use crate::error::{PlotError, Result};
use crate::surface::Surface;
use std::collections::HashMap;
use std::time::Duration;

/// How long the surface gets to settle after `show` before the background
/// snapshot is taken.
pub const SETTLE_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    Idle,
    Drawing,
}

/// Multi-series blitting renderer.
///
/// Each frame is `start_drawing` → one or more `draw_item` → `end_drawing`.
/// The decorated axes are painted once, shown, and captured as a background
/// snapshot; frames only restore that snapshot and composite the items on top.
pub struct Renderer<S: Surface> {
    surface: S,
    axes: Axes,
    canvas: Grid,
    background: Grid,
    items: HashMap<String, Item>,
    order: Vec<String>,
    next_color: usize,
    enable_legend: bool,
    phase: FramePhase,
}

impl<S: Surface> Renderer<S> {
    pub fn new(mut surface: S, options: RendererOptions) -> Result<Self> {
        options.validate()?;

        let (mut width, mut height) = surface.size();
        if options.tight {
            let mut size =
                tight_figure_size(width, EQUAL_ASPECT, options.xlim, options.resolved_ylim());
            if let Some(max) = surface.max_size() {
                size = fit_within(size, max);
            }
            (width, height) = surface.resize(size.0, size.1)?;
        }

        let axes = Axes::new(&options, width, height);
        let mut canvas = Grid::new(width, height);
        axes.paint(&mut canvas);

        surface.show(&canvas)?;
        // snapshot only once the surface has had a redraw cycle
        surface.pause(SETTLE_DELAY)?;
        canvas.clear_dirty();
        let background = canvas.clone();

        let plot = axes.plot_area();
        log::debug!(
            "Renderer ready: figure {}x{}, axes {}x{} at ({}, {}), xlim {:?}, ylim {:?}",
            width,
            height,
            plot.width,
            plot.height,
            plot.x,
            plot.y,
            axes.xlim(),
            axes.ylim()
        );

        Ok(Self {
            surface,
            axes,
            canvas,
            background,
            items: HashMap::new(),
            order: Vec::new(),
            next_color: 0,
            enable_legend: options.enable_legend,
            phase: FramePhase::Idle,
        })
    }

    /// Starts registering an item. Finish with [`ItemBuilder::register`].
    pub fn register_item(&mut self, label: impl Into<String>) -> ItemBuilder<'_, S> {
        ItemBuilder {
            renderer: self,
            label: label.into(),
            marker: None,
            style: None,
            opacity: 1.0,
            legend_label: None,
        }
    }

    /// Registers `label` with the default circle marker.
    pub fn register(&mut self, label: impl Into<String>) -> Result<()> {
        self.register_item(label).register()
    }

    fn insert_item(
        &mut self,
        label: String,
        style: ItemStyle,
        opacity: f64,
        legend_label: Option<String>,
    ) {
        let color = style.color.unwrap_or_else(|| {
            let color = COLOR_CYCLE[self.next_color % COLOR_CYCLE.len()];
            self.next_color += 1;
            color
        });
        let item = Item::new(style, color, opacity, legend_label);
        if self.items.insert(label.clone(), item).is_some() {
            log::debug!("Plot {} re-registered, replacing previous handle", label);
        } else {
            self.order.push(label);
        }
    }

    /// Restores the background snapshot, erasing the previous frame.
    pub fn start_drawing(&mut self) {
        if self.phase == FramePhase::Drawing {
            log::warn!("start_drawing called before the previous frame was ended");
        }
        self.canvas.restore(&self.background);
        self.phase = FramePhase::Drawing;
    }

    /// Replaces the data of `label` and composites it onto the back buffer.
    /// Nothing becomes visible until [`end_drawing`](Self::end_drawing).
    pub fn draw_item(&mut self, label: &str, x: &[f64], y: &[f64]) -> Result<()> {
        let item = self
            .items
            .get_mut(label)
            .ok_or_else(|| PlotError::NotRegistered(label.to_string()))?;

        if x.len() != y.len() {
            return Err(PlotError::LengthMismatch {
                label: label.to_string(),
                x_len: x.len(),
                y_len: y.len(),
            });
        }

        if self.phase == FramePhase::Idle {
            log::warn!("draw_item({}) called outside start_drawing/end_drawing", label);
        }

        item.set_data(x, y);
        item.draw(&self.axes, &mut self.canvas);
        Ok(())
    }

    /// Draws the legend (if enabled), blits the back buffer and flushes
    /// pending events. A non-zero `delay` then blocks for that long.
    pub fn end_drawing(&mut self, delay: Duration) -> Result<()> {
        if self.phase == FramePhase::Idle {
            log::warn!("end_drawing called without start_drawing");
        }

        if self.enable_legend {
            let items = self.order.iter().filter_map(|label| self.items.get(label));
            draw_legend(&self.axes, &mut self.canvas, items);
        }

        self.surface.blit(&self.canvas)?;
        self.canvas.clear_dirty();
        self.surface.flush_events()?;
        self.phase = FramePhase::Idle;

        if !delay.is_zero() {
            self.surface.pause(delay)?;
        }
        Ok(())
    }

    pub fn is_registered(&self, label: &str) -> bool {
        self.items.contains_key(label)
    }

    pub fn item(&self, label: &str) -> Option<&Item> {
        self.items.get(label)
    }

    /// Labels in registration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    pub fn legend_enabled(&self) -> bool {
        self.enable_legend
    }

    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    /// The back buffer frames are composited into.
    pub fn canvas(&self) -> &Grid {
        &self.canvas
    }

    pub fn background(&self) -> &Grid {
        &self.background
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn is_closed(&self) -> bool {
        self.surface.is_closed()
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

/// Optional settings for a new item, mirroring keyword arguments.
pub struct ItemBuilder<'r, S: Surface> {
    renderer: &'r mut Renderer<S>,
    label: String,
    marker: Option<String>,
    style: Option<ItemStyle>,
    opacity: f64,
    legend_label: Option<String>,
}

impl<S: Surface> ItemBuilder<'_, S> {
    /// Format string such as `"o"`, `"-"` or `"r.--"`.
    pub fn marker(mut self, fmt: impl Into<String>) -> Self {
        self.marker = Some(fmt.into());
        self
    }

    pub fn style(mut self, style: ItemStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn legend_label(mut self, label: impl Into<String>) -> Self {
        self.legend_label = Some(label.into());
        self
    }

    /// Stores the item, replacing any previous item with the same label.
    pub fn register(self) -> Result<()> {
        let style = match (self.style, &self.marker) {
            (Some(style), _) => style,
            (None, Some(fmt)) => fmt.parse()?,
            (None, None) => ItemStyle::default(),
        };
        self.renderer
            .insert_item(self.label, style, self.opacity, self.legend_label);
        Ok(())
    }
}
