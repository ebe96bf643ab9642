//! Shows surfaces in a terminal, two pixels per character cell.

use std::io::{self, stdout, BufWriter, Stdout, Write};

use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyEvent, KeyEventKind},
    queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal,
    tty::IsTty,
};

use crate::animation::Display;
use crate::config::Resolution;
use crate::surface::{Color, Surface};
use crate::terminal::AlternateScreen;

pub const MIN_COLS: u16 = 20;
pub const MIN_ROWS: u16 = 10;

/// Top pixel in the foreground colour, bottom pixel in the background colour.
const HALF_BLOCK: char = '▀';

#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    #[error("standard output is not a terminal")]
    NotATerminal,
    #[error("terminal is {cols}x{rows} cells, at least {}x{} are needed", MIN_COLS, MIN_ROWS)]
    TooSmall { cols: u16, rows: u16 },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// The terminal, held in raw mode on the alternate screen for as long as
/// this value lives.
pub struct TerminalScreen {
    // declared before the guard so pending output is flushed before the
    // terminal is restored
    out: BufWriter<Stdout>,
    cols: u16,
    rows: u16,
    prev: Vec<Cell>,
    _screen: AlternateScreen,
}

impl TerminalScreen {
    pub fn acquire() -> Result<Self, ScreenError> {
        if !stdout().is_tty() {
            return Err(ScreenError::NotATerminal);
        }

        let (cols, rows) = terminal::size()?;
        if cols < MIN_COLS || rows < MIN_ROWS {
            return Err(ScreenError::TooSmall { cols, rows });
        }

        let screen = AlternateScreen::enter()?;
        log::info!("acquired a {cols}x{rows} terminal");

        Ok(Self {
            out: BufWriter::new(stdout()),
            cols,
            rows,
            prev: Vec::new(),
            _screen: screen,
        })
    }
}

impl Display for TerminalScreen {
    // The surface keeps the detected graphics mode's pixel grid whatever the
    // terminal size is; `compose` does the scaling.
    fn resolution(&self) -> Resolution {
        Resolution::VGA
    }

    fn present(&mut self, surface: &Surface) -> anyhow::Result<()> {
        let cells = compose(surface, self.cols as usize, self.rows as usize);
        write_changed_cells(&mut self.out, &self.prev, &cells, self.cols as usize)?;
        self.prev = cells;
        Ok(())
    }

    fn wait_for_key(&mut self) -> anyhow::Result<()> {
        loop {
            if let Event::Key(KeyEvent {
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            {
                return Ok(());
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub style: Style,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
}

/// Writes the cells of `cells` that differ from `prev`, both laid out row by
/// row `cols` wide. Nothing is written when they match.
pub fn write_changed_cells(
    out: &mut impl Write,
    prev: &[Cell],
    cells: &[Cell],
    cols: usize,
) -> io::Result<()> {
    let mut cursor = None;
    let mut style = None;

    for (i, cell) in cells.iter().enumerate() {
        if prev.get(i) == Some(cell) {
            continue;
        }

        // a fresh row always gets an explicit move, the terminal may not wrap
        if cursor != Some(i) || i % cols == 0 {
            queue!(out, MoveTo((i % cols) as u16, (i / cols) as u16))?;
        }
        if style != Some(cell.style) {
            queue!(
                out,
                SetForegroundColor(cell.style.fg.into()),
                SetBackgroundColor(cell.style.bg.into())
            )?;
            style = Some(cell.style);
        }
        queue!(out, Print(cell.glyph))?;
        cursor = Some(i + 1);
    }

    if cursor.is_some() {
        queue!(out, ResetColor)?;
    }
    out.flush()
}

/// Scales `surface` onto a `cols` x `rows` grid of half-block cells and lays
/// its text on top.
pub fn compose(surface: &Surface, cols: usize, rows: usize) -> Vec<Cell> {
    let mut cells = Vec::with_capacity(cols * rows);

    for row in 0..rows {
        for col in 0..cols {
            let top = sample(surface, (cols, rows * 2), col, row * 2);
            let bottom = sample(surface, (cols, rows * 2), col, row * 2 + 1);
            cells.push(Cell {
                glyph: HALF_BLOCK,
                style: Style {
                    fg: top,
                    bg: bottom,
                },
            });
        }
    }

    overlay_text(&mut cells, surface, cols, rows);
    cells
}

/// Colour of one pixel in a `grid` sized picture of `surface`.
///
/// The most common non-background colour of the source block wins, so one
/// pixel wide lines survive shrinking.
fn sample(surface: &Surface, grid: (usize, usize), x: usize, y: usize) -> Color {
    let background = surface.background();
    let (width, height) = (surface.width(), surface.height());
    if width == 0 || height == 0 {
        return background;
    }

    let span = |i: usize, from: usize, to: usize| {
        let start = i * from / to;
        let end = ((i + 1) * from / to).max(start + 1).min(from);
        start..end
    };

    let mut counts: Vec<(Color, usize)> = Vec::new();
    for sy in span(y, height, grid.1) {
        for sx in span(x, width, grid.0) {
            let Some(color) = surface.pixel((sx as i32, sy as i32)) else {
                continue;
            };
            if color == background {
                continue;
            }
            match counts.iter_mut().find(|(c, _)| *c == color) {
                Some((_, n)) => *n += 1,
                None => counts.push((color, 1)),
            }
        }
    }

    counts
        .iter()
        .fold(None, |best: Option<(Color, usize)>, &(color, n)| match best {
            Some((_, m)) if m >= n => best,
            _ => Some((color, n)),
        })
        .map_or(background, |(color, _)| color)
}

fn overlay_text(cells: &mut [Cell], surface: &Surface, cols: usize, rows: usize) {
    let (width, height) = (surface.width() as i64, surface.height() as i64);
    if width == 0 || height == 0 {
        return;
    }

    for run in surface.text_runs() {
        let row = run.at.y as i64 * rows as i64 / height;
        if !(0..rows as i64).contains(&row) {
            continue;
        }
        let first_col = run.at.x as i64 * cols as i64 / width;

        for (i, glyph) in run.text.chars().enumerate() {
            let col = first_col + i as i64;
            if col < 0 {
                continue;
            }
            if col >= cols as i64 {
                break;
            }
            cells[row as usize * cols + col as usize] = Cell {
                glyph,
                style: Style {
                    fg: run.color,
                    bg: surface.background(),
                },
            };
        }
    }
}
