use crate::models::{Direction, Grid, Position};

pub struct SelectionMatcher;

impl SelectionMatcher {
    /// Validate that positions form a straight line on the grid: in bounds,
    /// and every step the same unit move in one of the eight directions.
    pub fn is_straight_line(grid: &Grid, positions: &[Position]) -> bool {
        if positions.is_empty() {
            return false;
        }

        if !positions.iter().all(|pos| grid.get(*pos).is_some()) {
            return false;
        }

        let mut steps = positions
            .windows(2)
            .map(|pair| Direction::between(pair[0], pair[1]));

        match steps.next() {
            None => true,
            Some(None) => false,
            Some(Some(first)) => steps.all(|step| step == Some(first)),
        }
    }

    /// Extract word from grid positions
    pub fn extract_word(grid: &Grid, positions: &[Position]) -> Option<String> {
        grid.read_path(positions)
    }

    /// Match a dragged selection against the puzzle words. The forward reading
    /// wins over the reversed one; words already solved are skipped.
    pub fn match_selection(
        grid: &Grid,
        positions: &[Position],
        words: &[String],
        solved: &[String],
    ) -> Option<String> {
        if !Self::is_straight_line(grid, positions) {
            return None;
        }

        let forward = Self::extract_word(grid, positions)?;
        let reversed: String = forward.chars().rev().collect();

        [forward, reversed]
            .into_iter()
            .find(|candidate| words.contains(candidate) && !solved.contains(candidate))
    }
}
