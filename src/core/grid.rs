use super::cell::{Cell, CellStyle};
use crate::error::{PlotError, Result};
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Vec<Cell>,
    dirty_rows: Vec<bool>,
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        let cells = vec![Cell::default(); width * height];
        let dirty_rows = vec![true; height]; // All rows dirty initially
        Self {
            cells,
            dirty_rows,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x)
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.dirty_rows[y] = true;
        let idx = y * self.width + x;
        self.cells.get_mut(idx)
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(PlotError::OutOfBounds { x, y });
        }
        let idx = y * self.width + x;
        self.cells[idx] = cell;
        self.dirty_rows[y] = true;
        Ok(())
    }

    /// Like [`Grid::set`], but silently drops cells outside the grid.
    pub fn set_clipped(&mut self, x: usize, y: usize, cell: Cell) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = cell;
        }
    }

    /// Writes `text` starting at `(x, y)`, clipped at the right edge.
    /// Returns the number of columns consumed.
    pub fn put_str(&mut self, x: usize, y: usize, text: &str, style: CellStyle) -> usize {
        let mut col = x;
        for c in text.chars() {
            let w = c.width().unwrap_or(0);
            if w == 0 {
                continue;
            }
            if col + w > self.width {
                break;
            }
            self.set_clipped(col, y, Cell::new(c).with_style(style));
            col += w;
        }
        col - x
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
        self.dirty_rows.fill(true);
    }

    /// Copies `snapshot` back into this grid, marking dirty only the rows
    /// whose content actually changed.
    pub fn restore(&mut self, snapshot: &Grid) {
        if snapshot.width != self.width || snapshot.height != self.height {
            self.cells.clone_from(&snapshot.cells);
            self.width = snapshot.width;
            self.height = snapshot.height;
            self.dirty_rows = vec![true; self.height];
            return;
        }

        for y in 0..self.height {
            let start = y * self.width;
            let end = start + self.width;
            if self.cells[start..end] != snapshot.cells[start..end] {
                self.cells[start..end].copy_from_slice(&snapshot.cells[start..end]);
                self.dirty_rows[y] = true;
            }
        }
    }

    pub fn resize(&mut self, new_width: usize, new_height: usize) {
        let mut new_cells = vec![Cell::default(); new_width * new_height];

        let copy_width = self.width.min(new_width);
        let copy_height = self.height.min(new_height);

        for y in 0..copy_height {
            for x in 0..copy_width {
                let old_idx = y * self.width + x;
                let new_idx = y * new_width + x;
                new_cells[new_idx] = self.cells[old_idx];
            }
        }

        self.cells = new_cells;
        self.dirty_rows = vec![true; new_height];
        self.width = new_width;
        self.height = new_height;
    }

    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        let end = start + self.width;
        Some(&self.cells[start..end])
    }

    /// Characters of row `y` with trailing blanks removed.
    pub fn row_text(&self, y: usize) -> String {
        self.row(y)
            .map(|row| row.iter().map(|c| c.character).collect::<String>())
            .unwrap_or_default()
            .trim_end()
            .to_string()
    }

    pub fn to_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_row_dirty(&self, y: usize) -> bool {
        self.dirty_rows.get(y).copied().unwrap_or(false)
    }

    pub fn dirty_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.dirty_rows
            .iter()
            .enumerate()
            .filter_map(|(y, &d)| d.then_some(y))
    }

    pub fn clear_dirty(&mut self) {
        self.dirty_rows.fill(false);
    }

    pub fn has_dirty_rows(&self) -> bool {
        self.dirty_rows.iter().any(|&d| d)
    }
}
