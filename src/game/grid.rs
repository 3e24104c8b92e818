use rand::{seq::SliceRandom, Rng};
use thiserror::Error;

use crate::{
    models::{Direction, Grid, GridOptions, Placement, Position},
    utils::letters::random_letter,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    /// No start cell and direction could hold the word. Covers both a grid
    /// that is too small and options that are too restrictive.
    #[error("Could not place the word \"{word}\". Try increasing grid size or disabling diagonal/reverse.")]
    PlacementFailure { word: String },
}

/// Result of a successful generation, with where each word went
#[derive(Debug, Clone)]
pub struct GeneratedGrid {
    pub grid: Grid,
    /// Committed placements, in the order the words were placed
    pub placements: Vec<Placement>,
}

pub struct GridGenerator;

impl GridGenerator {
    /// Generate a word search grid using the thread-local RNG
    pub fn generate(words: &[String], size: usize, options: GridOptions) -> Result<Grid, GridError> {
        Self::generate_with_rng(words, size, options, &mut rand::rng())
    }

    /// Generate a word search grid drawing all randomness from `rng`
    pub fn generate_with_rng(
        words: &[String],
        size: usize,
        options: GridOptions,
        rng: &mut impl Rng,
    ) -> Result<Grid, GridError> {
        Self::generate_with_placements(words, size, options, rng).map(|generated| generated.grid)
    }

    /// Place every word greedily, longest first, then fill the rest with
    /// random letters.
    ///
    /// Placement never backtracks: once a word is written its cells are
    /// frozen, and the first word that finds no room fails the whole batch.
    pub fn generate_with_placements(
        words: &[String],
        size: usize,
        options: GridOptions,
        rng: &mut impl Rng,
    ) -> Result<GeneratedGrid, GridError> {
        let mut board = Board::new(size);
        let directions = Direction::candidates(&options);

        // Shuffle before the stable sort so equal lengths end up in random order
        let mut ordered: Vec<&String> = words.iter().collect();
        ordered.shuffle(rng);
        ordered.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

        let mut placements = Vec::with_capacity(ordered.len());

        for word in ordered {
            let placement = board
                .place(word, &directions, options.allow_reverse, rng)
                .ok_or_else(|| {
                    tracing::warn!("Could not place word {} in a {}x{} grid", word, size, size);
                    GridError::PlacementFailure { word: word.clone() }
                })?;

            tracing::debug!(
                "Placed {} at ({}, {}) going ({}, {})",
                placement.word,
                placement.start.row,
                placement.start.col,
                placement.direction.row_delta,
                placement.direction.col_delta
            );
            placements.push(placement);
        }

        let grid = board.fill(rng);
        tracing::debug!("Generated {}x{} grid with {} words", size, size, placements.len());

        Ok(GeneratedGrid { grid, placements })
    }
}

/// Working buffer owned by a single generation call. `None` is an empty cell.
struct Board {
    size: usize,
    cells: Vec<Option<char>>,
}

impl Board {
    fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.size + pos.col
    }

    /// Try every start cell in row-major order and, for each, every direction
    /// in a per-word shuffled order. Commits the first fit.
    fn place(
        &mut self,
        word: &str,
        directions: &[Direction],
        allow_reverse: bool,
        rng: &mut impl Rng,
    ) -> Option<Placement> {
        let mut directions = directions.to_vec();
        directions.shuffle(rng);

        let reversed = allow_reverse && rng.random_bool(0.5);
        let letters: Vec<char> = if reversed {
            word.chars().rev().collect()
        } else {
            word.chars().collect()
        };

        for row in 0..self.size {
            for col in 0..self.size {
                let start = Position::new(row, col);
                for &direction in &directions {
                    if self.fits(start, direction, &letters) {
                        let placement = Placement {
                            word: letters.iter().collect(),
                            start,
                            direction,
                        };
                        self.commit(&placement);
                        return Some(placement);
                    }
                }
            }
        }

        None
    }

    /// Every cell along the path must be in bounds and either empty or
    /// already holding the same letter.
    fn fits(&self, start: Position, direction: Direction, letters: &[char]) -> bool {
        let mut pos = start;

        for (k, letter) in letters.iter().enumerate() {
            if k > 0 {
                match pos.step(direction, self.size) {
                    Some(next) => pos = next,
                    None => return false,
                }
            }
            if let Some(existing) = self.cells[self.index(pos)] {
                if existing != *letter {
                    return false;
                }
            }
        }

        true
    }

    fn commit(&mut self, placement: &Placement) {
        for (pos, letter) in placement.positions().into_iter().zip(placement.word.chars()) {
            let idx = self.index(pos);
            self.cells[idx] = Some(letter);
        }
    }

    fn fill(self, rng: &mut impl Rng) -> Grid {
        let cells = self
            .cells
            .into_iter()
            .map(|cell| cell.unwrap_or_else(|| random_letter(rng)))
            .collect();
        Grid::from_cells(self.size, cells)
    }
}
