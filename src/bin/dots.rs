// Rotating dots demo
// Run: cargo run --bin dots -- [--mode simple] [--headless]

use anyhow::Context;
use clap::Parser;
use dotblit::RendererOptions;
use dotblit::demo::{self, DemoConfig, FRAME_COUNT, NUM_DOTS, RendererMode, SPEED};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dots", version, about = "Blitted rotating-dots animation")]
struct Cli {
    /// Renderer to use; prompts on stdin when omitted
    #[arg(long)]
    mode: Option<RendererMode>,

    #[arg(long, default_value_t = FRAME_COUNT)]
    frames: usize,

    #[arg(long, default_value_t = NUM_DOTS)]
    dots: usize,

    #[arg(long, default_value_t = SPEED)]
    speed: f64,

    /// JSON file with renderer options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Render off-screen instead of in the terminal
    #[arg(long)]
    headless: bool,

    /// Show a status line below the plot
    #[arg(long)]
    toolbar: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let options = match &cli.config {
        Some(path) => RendererOptions::from_json_file(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => RendererOptions::default(),
    };
    let config = DemoConfig {
        frames: cli.frames,
        dots: cli.dots,
        speed: cli.speed,
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    if cli.headless {
        demo::run_interactive(cli.mode, &mut input, &mut output, options, &config, || {
            Ok(dotblit::HeadlessSurface::new(80, 40))
        })
        .context("Demo failed")?;
        return Ok(());
    }

    run_terminal(cli, &mut input, &mut output, options, &config)
}

#[cfg(feature = "crossterm")]
fn run_terminal(
    cli: Cli,
    input: &mut impl io::BufRead,
    output: &mut impl io::Write,
    options: RendererOptions,
    config: &DemoConfig,
) -> anyhow::Result<()> {
    demo::run_interactive(cli.mode, input, output, options, config, || {
        Ok(dotblit::TerminalSurface::new()?.with_toolbar(cli.toolbar))
    })
    .context("Demo failed")?;
    Ok(())
}

#[cfg(not(feature = "crossterm"))]
fn run_terminal(
    cli: Cli,
    input: &mut impl io::BufRead,
    output: &mut impl io::Write,
    options: RendererOptions,
    config: &DemoConfig,
) -> anyhow::Result<()> {
    log::warn!("Built without the crossterm feature, rendering headless");
    let _ = cli.toolbar;
    demo::run_interactive(cli.mode, input, output, options, config, || {
        Ok(dotblit::HeadlessSurface::new(80, 40))
    })
    .context("Demo failed")?;
    Ok(())
}
