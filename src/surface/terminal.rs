// Terminal display backend
// Draws the canvas on the alternate screen and repaints only dirty rows.

use super::Surface;
use crate::core::{CellStyle, Color, Grid};
use crate::error::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{
        Attribute, Color as CtColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

pub struct TerminalSurface {
    stdout: Stdout,
    width: usize,
    height: usize,
    toolbar: bool,
    shown: bool,
    closed: bool,
    frames: usize,
}

impl TerminalSurface {
    /// Surface covering the whole terminal. Nothing is drawn until `show`.
    pub fn new() -> Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self {
            stdout: io::stdout(),
            width: cols as usize,
            height: rows as usize,
            toolbar: false,
            shown: false,
            closed: false,
            frames: 0,
        })
    }

    /// Reserves the last terminal row for a status line.
    pub fn with_toolbar(mut self, toolbar: bool) -> Self {
        if toolbar && !self.toolbar {
            self.height = self.height.saturating_sub(1);
        } else if !toolbar && self.toolbar {
            self.height += 1;
        }
        self.toolbar = toolbar;
        self
    }

    fn terminal_area(&self) -> Result<(usize, usize)> {
        let (cols, rows) = terminal::size()?;
        let rows = if self.toolbar { rows.saturating_sub(1) } else { rows };
        Ok((cols as usize, rows as usize))
    }

    fn queue_row(&mut self, grid: &Grid, y: usize) -> Result<()> {
        let Some(row) = grid.row(y) else {
            return Ok(());
        };
        queue!(self.stdout, MoveTo(0, y as u16))?;

        // one escape sequence per run of identical style
        let mut current: Option<CellStyle> = None;
        let mut run = String::new();
        for cell in row.iter().take(self.width) {
            if current != Some(cell.style) {
                if let Some(style) = current {
                    self.queue_run(style, &run)?;
                }
                run.clear();
                current = Some(cell.style);
            }
            run.push(cell.character);
        }
        if let Some(style) = current {
            self.queue_run(style, &run)?;
        }
        queue!(self.stdout, ResetColor, SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    fn queue_run(&mut self, style: CellStyle, text: &str) -> Result<()> {
        queue!(
            self.stdout,
            SetAttribute(Attribute::Reset),
            SetForegroundColor(to_crossterm_color(style.fg)),
            SetBackgroundColor(to_crossterm_color(style.bg)),
        )?;
        if style.bold {
            queue!(self.stdout, SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            queue!(self.stdout, SetAttribute(Attribute::Dim))?;
        }
        queue!(self.stdout, Print(text))?;
        Ok(())
    }

    fn queue_toolbar(&mut self) -> Result<()> {
        if !self.toolbar {
            return Ok(());
        }
        let status = format!(
            " {}x{} | frame {} | q to quit ",
            self.width, self.height, self.frames
        );
        queue!(
            self.stdout,
            MoveTo(0, self.height as u16),
            SetBackgroundColor(CtColor::Blue),
            SetForegroundColor(CtColor::White),
            Print(format!("{:width$}", status, width = self.width)),
            ResetColor
        )?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let ctrl_c = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);
                if ctrl_c || key.code == KeyCode::Char('q') || key.code == KeyCode::Esc {
                    log::info!("Terminal surface closed by user");
                    self.closed = true;
                }
            }
            Event::Resize(cols, rows) => {
                // layout is fixed after construction
                log::debug!("Terminal resized to {}x{}, keeping layout", cols, rows);
            }
            _ => {}
        }
    }
}

impl Surface for TerminalSurface {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn max_size(&self) -> Option<(usize, usize)> {
        self.terminal_area().ok()
    }

    fn resize(&mut self, width: usize, height: usize) -> Result<(usize, usize)> {
        let (max_w, max_h) = self.terminal_area()?;
        self.width = width.min(max_w);
        self.height = height.min(max_h);
        if self.shown {
            execute!(self.stdout, Clear(ClearType::All))?;
        }
        Ok((self.width, self.height))
    }

    fn show(&mut self, grid: &Grid) -> Result<()> {
        if !self.shown {
            terminal::enable_raw_mode()?;
            // from here on Drop has something to undo
            self.shown = true;
            execute!(self.stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        }
        for y in 0..grid.height().min(self.height) {
            self.queue_row(grid, y)?;
        }
        self.queue_toolbar()?;
        self.stdout.flush()?;
        Ok(())
    }

    fn blit(&mut self, grid: &Grid) -> Result<()> {
        let rows: Vec<usize> = grid.dirty_rows().filter(|&y| y < self.height).collect();
        for y in rows {
            self.queue_row(grid, y)?;
        }
        self.frames += 1;
        self.queue_toolbar()?;
        self.stdout.flush()?;
        Ok(())
    }

    fn flush_events(&mut self) -> Result<()> {
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            self.handle_event(event);
        }
        Ok(())
    }

    fn pause(&mut self, duration: Duration) -> Result<()> {
        let deadline = Instant::now() + duration;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(());
            }
            if event::poll(remaining)? {
                let event = event::read()?;
                self.handle_event(event);
            }
        }
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        if self.shown {
            let _ = execute!(self.stdout, ResetColor, Show, LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        }
    }
}

fn to_crossterm_color(color: Color) -> CtColor {
    CtColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}
