use crate::error::{PlotError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// `[min, max]` range of one axis, in data coordinates.
pub type Limits = [f64; 2];

/// Default x range. `ylim` falls back to `xlim` when unset.
pub const DEFAULT_XLIM: Limits = [-1.5, 1.5];

/// Axis configuration for a [`Renderer`](super::Renderer).
///
/// Layout is fixed once the renderer is built; nothing here can change
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererOptions {
    pub title: Option<String>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub xlim: Limits,
    pub ylim: Option<Limits>,
    /// Suppress frame, ticks and axis labels.
    pub hide_axis: bool,
    /// Resize the surface to the data aspect ratio and drop outer padding.
    pub tight: bool,
    pub enable_grid: bool,
    /// Draw a legend overlay on every frame. The legend is recomputed each
    /// time, which costs frame rate.
    pub enable_legend: bool,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            title: None,
            xlabel: None,
            ylabel: None,
            xlim: DEFAULT_XLIM,
            ylim: None,
            hide_axis: false,
            tight: false,
            enable_grid: false,
            enable_legend: false,
        }
    }
}

impl RendererOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let options = Self::from_json_str(&data)?;
        log::debug!("Loaded renderer options from {}", path.as_ref().display());
        Ok(options)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_xlabel(mut self, label: impl Into<String>) -> Self {
        self.xlabel = Some(label.into());
        self
    }

    pub fn with_ylabel(mut self, label: impl Into<String>) -> Self {
        self.ylabel = Some(label.into());
        self
    }

    pub fn with_xlim(mut self, xlim: Limits) -> Self {
        self.xlim = xlim;
        self
    }

    pub fn with_ylim(mut self, ylim: Limits) -> Self {
        self.ylim = Some(ylim);
        self
    }

    pub fn hide_axis(mut self, hide: bool) -> Self {
        self.hide_axis = hide;
        self
    }

    pub fn tight(mut self, tight: bool) -> Self {
        self.tight = tight;
        self
    }

    pub fn with_grid(mut self, enable: bool) -> Self {
        self.enable_grid = enable;
        self
    }

    pub fn with_legend(mut self, enable: bool) -> Self {
        self.enable_legend = enable;
        self
    }

    /// The y range actually used: `ylim` if set, otherwise a copy of `xlim`.
    pub fn resolved_ylim(&self) -> Limits {
        self.ylim.unwrap_or(self.xlim)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_limits('x', self.xlim)?;
        check_limits('y', self.resolved_ylim())
    }
}

/// Smallest span, relative to the larger bound, that still resolves into ticks.
const MIN_RELATIVE_SPAN: f64 = 1e-9;

fn check_limits(axis: char, [min, max]: Limits) -> Result<()> {
    let span = max - min;
    let resolvable = span.is_finite() && span > min.abs().max(max.abs()) * MIN_RELATIVE_SPAN;
    if min.is_finite() && max.is_finite() && resolvable {
        Ok(())
    } else {
        Err(PlotError::InvalidLimits { axis, min, max })
    }
}
