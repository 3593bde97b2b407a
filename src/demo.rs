//! Rotating-dots demo: dots riding a four-petal rose curve.

use crate::error::{PlotError, Result};
use crate::plot::{Renderer, RendererOptions, SimpleRenderer};
use crate::surface::Surface;
use std::f64::consts::PI;
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::time::{Duration, Instant};

pub const FRAME_COUNT: usize = 500;
pub const NUM_DOTS: usize = 15;
/// Angular advance per frame, in radians.
pub const SPEED: f64 = 0.01;
pub const TITLE: &str = "Dots circling";
pub const PROMPT: &str = "Choose renderer (normal/simple): ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererMode {
    Normal,
    Simple,
}

impl FromStr for RendererMode {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "normal" => Ok(Self::Normal),
            "simple" => Ok(Self::Simple),
            other => Err(PlotError::InvalidChoice(other.to_string())),
        }
    }
}

impl fmt::Display for RendererMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Simple => write!(f, "simple"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub frames: usize,
    pub dots: usize,
    pub speed: f64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frames: FRAME_COUNT,
            dots: NUM_DOTS,
            speed: SPEED,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DemoReport {
    pub mode: RendererMode,
    pub frames: usize,
    pub elapsed: Duration,
}

impl DemoReport {
    pub fn fps(&self) -> f64 {
        self.frames as f64 / self.elapsed.as_secs_f64().max(f64::EPSILON)
    }
}

/// Positions of `dots` evenly spaced points on the rose `r = cos 4t`,
/// rotated by `frame * speed`.
pub fn rose_points(frame: usize, dots: usize, speed: f64) -> (Vec<f64>, Vec<f64>) {
    (0..dots)
        .map(|k| {
            let t = (2.0 * PI / dots as f64) * k as f64 + frame as f64 * speed;
            let r = (4.0 * t).cos();
            (t.cos() * r, t.sin() * r)
        })
        .unzip()
}

/// Asks for a renderer mode on `input`. Anything but `normal` or `simple`
/// is an error.
pub fn prompt_mode(input: &mut impl BufRead, output: &mut impl Write) -> Result<RendererMode> {
    write!(output, "{}", PROMPT)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    line.trim().parse()
}

/// Animates `config.frames` frames on `surface` and hands the surface back.
pub fn run<S: Surface>(
    mode: RendererMode,
    surface: S,
    options: RendererOptions,
    config: &DemoConfig,
) -> Result<(DemoReport, S)> {
    let options = if options.title.is_none() {
        options.with_title(TITLE)
    } else {
        options
    };

    let (frames, elapsed, surface) = match mode {
        RendererMode::Normal => {
            let mut r = Renderer::new(surface, options.with_legend(true))?;
            r.register_item("dots").legend_label("Item 1").register()?;
            r.register_item("lines")
                .marker("-")
                .legend_label("Item 2")
                .register()?;

            let tic = Instant::now();
            let mut frames = 0;
            for i in 0..config.frames {
                if r.is_closed() {
                    break;
                }
                let (x, y) = rose_points(i, config.dots, config.speed);
                r.start_drawing();
                r.draw_item("dots", &x, &y)?;
                r.draw_item("lines", &x, &y)?;
                r.end_drawing(Duration::ZERO)?;
                frames += 1;
            }
            (frames, tic.elapsed(), r.into_surface())
        }
        RendererMode::Simple => {
            let mut r = SimpleRenderer::with_defaults(surface, options)?;

            let tic = Instant::now();
            let mut frames = 0;
            for i in 0..config.frames {
                if r.inner().is_closed() {
                    break;
                }
                let (x, y) = rose_points(i, config.dots, config.speed);
                r.draw(&x, &y)?;
                frames += 1;
            }
            (frames, tic.elapsed(), r.into_inner().into_surface())
        }
    };

    if frames < config.frames {
        log::info!("Display closed after {} of {} frames", frames, config.frames);
    }

    Ok((
        DemoReport {
            mode,
            frames,
            elapsed,
        },
        surface,
    ))
}

/// Full console flow: pick a mode (prompting when `mode` is `None`), only
/// then open the surface, animate, and report the average frame rate.
pub fn run_interactive<S, F>(
    mode: Option<RendererMode>,
    input: &mut impl BufRead,
    output: &mut impl Write,
    options: RendererOptions,
    config: &DemoConfig,
    open_surface: F,
) -> Result<DemoReport>
where
    S: Surface,
    F: FnOnce() -> Result<S>,
{
    let mode = match mode {
        Some(mode) => mode,
        None => prompt_mode(input, output)?,
    };
    log::info!("Running {} renderer for {} frames", mode, config.frames);

    let surface = open_surface()?;
    let (report, surface) = run(mode, surface, options, config)?;
    // restore the display before printing
    drop(surface);

    writeln!(output, "Average FPS: {}", report.fps())?;
    Ok(report)
}
