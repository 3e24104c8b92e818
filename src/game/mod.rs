pub mod grid;
pub mod selection;

pub use grid::{GeneratedGrid, GridError, GridGenerator};
pub use selection::SelectionMatcher;
