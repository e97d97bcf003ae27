use crate::{config::Config, parse_pattern, parse_rows, LifeError, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::{fmt, path::Path};
use tracing::info;

/// State of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    Alive,
    #[default]
    Dead,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Alive => Config::ALIVE_CHAR,
            Cell::Dead => Config::DEAD_CHAR,
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            Config::ALIVE_CHAR => Some(Cell::Alive),
            Config::DEAD_CHAR => Some(Cell::Dead),
            _ => None,
        }
    }
}

/// Fixed-size field with edges stitched together (a torus).
///
/// Every lookup wraps both coordinates, so there are no edge cells and any
/// `isize` coordinate is valid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Creates a field with all cells dead.
    pub fn blank(width: usize, height: usize) -> Result<Self> {
        let size = Self::checked_capacity(width, height)?;
        Ok(Self {
            cells: vec![Cell::Dead; size],
            width,
            height,
        })
    }

    /// Number of cells of a `width x height` field.
    ///
    /// Both sides must be positive and the product must not overflow `usize`.
    pub fn checked_capacity(width: usize, height: usize) -> Result<usize> {
        width
            .checked_mul(height)
            .filter(|&size| size != 0)
            .ok_or(LifeError::Precondition { width, height })
    }

    /// Parses a field from rows over `#` (alive) and `.` (dead).
    pub fn from_pattern<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let (width, cells) = parse_rows(rows)?;
        Ok(Self::from_cells(width, cells))
    }

    /// Parses a field from the contents of a pattern file.
    pub fn from_pattern_text(data: &str) -> Result<Self> {
        let (width, cells) = parse_pattern(data)?;
        Ok(Self::from_cells(width, cells))
    }

    /// Reads and parses a pattern file.
    pub fn from_pattern_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| LifeError::Io {
            path: path.to_owned(),
            source,
        })?;
        let grid = Self::from_pattern_text(&data)?;
        info!(
            path = %path.display(),
            width = grid.width,
            height = grid.height,
            population = grid.population(),
            "loaded pattern"
        );
        Ok(grid)
    }

    /// Replaces the whole field with the parsed `rows`.
    ///
    /// On error the field is left as it was.
    pub fn load_pattern<I>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        *self = Self::from_pattern(rows)?;
        Ok(())
    }

    // `cells` comes from the parser: non-empty and a multiple of `width`.
    fn from_cells(width: usize, cells: Vec<Cell>) -> Self {
        let height = cells.len() / width;
        Self {
            cells,
            width,
            height,
        }
    }

    /// Makes `alive` distinct dead cells alive, chosen uniformly at random.
    ///
    /// `seed` - random seed (if `None`, then random seed is generated)
    ///
    /// Fails without touching the field if there are fewer than `alive` dead cells.
    pub fn random_seed(&mut self, alive: usize, seed: Option<u64>) -> Result<()> {
        let available = self.capacity() - self.population();
        if alive > available {
            return Err(LifeError::Configuration {
                requested: alive,
                available,
            });
        }

        let mut rng = if let Some(x) = seed {
            ChaCha8Rng::seed_from_u64(x)
        } else {
            ChaCha8Rng::from_entropy()
        };
        let mut left = alive;
        while left > 0 {
            let i = rng.gen_range(0..self.cells.len());
            if self.cells[i] == Cell::Dead {
                self.cells[i] = Cell::Alive;
                left -= 1;
            }
        }
        info!(
            alive,
            width = self.width,
            height = self.height,
            "seeded random cells"
        );
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Number of alive cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    fn index(&self, row: isize, col: isize) -> usize {
        let row = row.rem_euclid(self.height as isize) as usize;
        let col = col.rem_euclid(self.width as isize) as usize;
        col + row * self.width
    }

    pub fn get(&self, row: isize, col: isize) -> Cell {
        self.cells[self.index(row, col)]
    }

    pub fn set(&mut self, row: isize, col: isize, state: Cell) {
        let i = self.index(row, col);
        self.cells[i] = state;
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Dead);
    }

    /// One symbol per cell, rows separated by `'\n'`, no trailing newline.
    pub fn render(&self) -> String {
        let mut result = String::with_capacity(self.cells.len() + self.height);
        for (y, row) in self.cells.chunks_exact(self.width).enumerate() {
            if y != 0 {
                result.push('\n');
            }
            result.extend(row.iter().map(|c| c.symbol()));
        }
        result
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
