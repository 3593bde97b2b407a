use super::options::RendererOptions;
use super::renderer::Renderer;
use crate::error::Result;
use crate::surface::Surface;
use std::time::Duration;

/// Label of the single series a [`SimpleRenderer`] draws.
pub const DEFAULT_LABEL: &str = "default";

/// Single-series facade over [`Renderer`].
///
/// The legend is always off and `draw` runs a whole frame.
pub struct SimpleRenderer<S: Surface> {
    inner: Renderer<S>,
}

impl<S: Surface> SimpleRenderer<S> {
    pub fn new(surface: S, options: RendererOptions, marker: &str, opacity: f64) -> Result<Self> {
        let options = RendererOptions {
            enable_legend: false,
            ..options
        };
        let mut inner = Renderer::new(surface, options)?;
        inner
            .register_item(DEFAULT_LABEL)
            .marker(marker)
            .opacity(opacity)
            .register()?;
        Ok(Self { inner })
    }

    /// Circle markers at full opacity.
    pub fn with_defaults(surface: S, options: RendererOptions) -> Result<Self> {
        Self::new(surface, options, "o", 1.0)
    }

    pub fn draw(&mut self, x: &[f64], y: &[f64]) -> Result<()> {
        self.inner.start_drawing();
        self.inner.draw_item(DEFAULT_LABEL, x, y)?;
        self.inner.end_drawing(Duration::ZERO)
    }

    pub fn inner(&self) -> &Renderer<S> {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut Renderer<S> {
        &mut self.inner
    }

    pub fn into_inner(self) -> Renderer<S> {
        self.inner
    }
}
