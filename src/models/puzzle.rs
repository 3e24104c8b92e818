use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Move one step along `direction`, staying inside a `size`×`size` grid.
    pub fn step(self, direction: Direction, size: usize) -> Option<Position> {
        let row = self.row.checked_add_signed(direction.row_delta)?;
        let col = self.col.checked_add_signed(direction.col_delta)?;
        (row < size && col < size).then_some(Position { row, col })
    }
}

/// A unit (row, col) step along which a word is written.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Direction {
    pub row_delta: isize,
    pub col_delta: isize,
}

impl Direction {
    pub const RIGHT: Direction = Direction::new(0, 1);
    pub const DOWN: Direction = Direction::new(1, 0);
    pub const LEFT: Direction = Direction::new(0, -1);
    pub const UP: Direction = Direction::new(-1, 0);
    pub const DOWN_RIGHT: Direction = Direction::new(1, 1);
    pub const DOWN_LEFT: Direction = Direction::new(1, -1);
    pub const UP_RIGHT: Direction = Direction::new(-1, 1);
    pub const UP_LEFT: Direction = Direction::new(-1, -1);

    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::RIGHT,
        Direction::DOWN,
        Direction::LEFT,
        Direction::UP,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::DOWN_RIGHT,
        Direction::DOWN_LEFT,
        Direction::UP_RIGHT,
        Direction::UP_LEFT,
    ];

    pub const fn new(row_delta: isize, col_delta: isize) -> Self {
        Self {
            row_delta,
            col_delta,
        }
    }

    /// Candidate directions for placement: orthogonal first, then diagonals when allowed
    pub fn candidates(options: &GridOptions) -> Vec<Direction> {
        let mut directions = Direction::ORTHOGONAL.to_vec();
        if options.allow_diagonal {
            directions.extend_from_slice(&Direction::DIAGONAL);
        }
        directions
    }

    /// All eight directions, regardless of options
    pub fn all() -> impl Iterator<Item = Direction> {
        Direction::ORTHOGONAL
            .into_iter()
            .chain(Direction::DIAGONAL)
    }

    /// The step from `from` to `to` if they are neighbours (including diagonals)
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        let row_delta = to.row as isize - from.row as isize;
        let col_delta = to.col as isize - from.col as isize;
        let direction = Direction::new(row_delta, col_delta);
        Direction::all().any(|d| d == direction).then_some(direction)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    #[serde(default)]
    pub allow_diagonal: bool,
    #[serde(default)]
    pub allow_reverse: bool,
}

/// Where a word ended up in the grid. `word` is the text as written, so it is
/// already reversed when the generator chose to reverse it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub word: String,
    pub start: Position,
    pub direction: Direction,
}

impl Placement {
    pub fn positions(&self) -> Vec<Position> {
        (0..self.word.chars().count() as isize)
            .map(|k| Position {
                row: (self.start.row as isize + k * self.direction.row_delta) as usize,
                col: (self.start.col as isize + k * self.direction.col_delta) as usize,
            })
            .collect()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridParseError {
    #[error("grid row {row} has {found} cells, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("cell ({row}, {col}) holds {letter:?}, expected an uppercase letter")]
    InvalidCell { row: usize, col: usize, letter: char },
}

/// A completed square puzzle grid. Every cell holds an uppercase ASCII letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<char>>", into = "Vec<Vec<char>>")]
pub struct Grid {
    size: usize,
    cells: Vec<char>,
}

impl Grid {
    /// Build a grid from row-major cells. Used by the generator once every
    /// cell has been filled.
    pub(crate) fn from_cells(size: usize, cells: Vec<char>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    pub fn from_rows(rows: Vec<Vec<char>>) -> Result<Self, GridParseError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);

        for (row, letters) in rows.into_iter().enumerate() {
            if letters.len() != size {
                return Err(GridParseError::NotSquare {
                    row,
                    expected: size,
                    found: letters.len(),
                });
            }
            for (col, letter) in letters.into_iter().enumerate() {
                if !letter.is_ascii_uppercase() {
                    return Err(GridParseError::InvalidCell { row, col, letter });
                }
                cells.push(letter);
            }
        }

        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, pos: Position) -> Option<char> {
        if pos.row < self.size && pos.col < self.size {
            Some(self.cells[pos.row * self.size + pos.col])
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        // chunks(0) panics, and an empty grid has no rows anyway
        self.cells.chunks(self.size.max(1))
    }

    /// Row-major text rendering, one string per row
    pub fn to_rows(&self) -> Vec<String> {
        self.rows().map(|row| row.iter().collect()).collect()
    }

    /// Read the letters along `path`. Returns `None` if any position is out of bounds.
    pub fn read_path(&self, path: &[Position]) -> Option<String> {
        path.iter().map(|pos| self.get(*pos)).collect()
    }

    /// Find `word` along any of the eight directions. Since every direction
    /// has its opposite in the set, a reversed placement is found too. Returns
    /// the covered positions in the order the word reads.
    pub fn find_word(&self, word: &str) -> Option<Vec<Position>> {
        let letters: Vec<char> = word.chars().collect();

        for row in 0..self.size {
            for col in 0..self.size {
                for direction in Direction::all() {
                    if let Some(path) = self.trace(Position::new(row, col), direction, &letters) {
                        return Some(path);
                    }
                }
            }
        }

        None
    }

    fn trace(&self, start: Position, direction: Direction, letters: &[char]) -> Option<Vec<Position>> {
        if letters.is_empty() {
            return None;
        }

        let mut path = Vec::with_capacity(letters.len());
        let mut pos = start;
        for (k, letter) in letters.iter().enumerate() {
            if k > 0 {
                pos = pos.step(direction, self.size)?;
            }
            if self.get(pos)? != *letter {
                return None;
            }
            path.push(pos);
        }
        Some(path)
    }
}

impl TryFrom<Vec<Vec<char>>> for Grid {
    type Error = GridParseError;

    fn try_from(rows: Vec<Vec<char>>) -> Result<Self, Self::Error> {
        Grid::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<char>> {
    fn from(grid: Grid) -> Self {
        grid.rows().map(|row| row.to_vec()).collect()
    }
}
