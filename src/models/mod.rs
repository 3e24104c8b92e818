pub mod puzzle;

pub use puzzle::{Direction, Grid, GridOptions, GridParseError, Placement, Position};
