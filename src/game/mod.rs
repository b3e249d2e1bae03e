//! # Game Core
//!
//! The pieces of the exploration game that do not care about chat or storage:
//!
//! - [`terrain`] - the fixed six-symbol terrain alphabet
//! - [`map`] - square grid maps, the random generator and the stored text form
//! - [`outcome`] - static terrain → narrative lookup
//!
//! ```rust
//! use empirebot::game::{map, outcome, terrain::Terrain};
//!
//! let grid = map::generate(10, &Terrain::ALL).unwrap();
//! let cell = grid.get(0, 0).unwrap();
//! println!("{}", outcome::for_terrain(cell));
//! ```

pub mod map;
pub mod outcome;
pub mod terrain;

pub use map::{Grid, GridError};
pub use terrain::Terrain;

/// Side length of a player map unless configured otherwise.
pub const DEFAULT_GRID_SIZE: usize = 10;
