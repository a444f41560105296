//! Random-walk dungeon generation.
//!
//! A walk starts on a random cell of a square grid and lays down halls and
//! rooms next to itself until it draws an end tile, or until it boxes itself
//! in and has to end where it stands.
//!
//! ```
//! use dungeon::{Tile, Walker};
//! use rand::SeedableRng;
//! use rand_wyrand::WyRand;
//!
//! let dungeon = Walker::new(WyRand::seed_from_u64(7)).generate(8).unwrap();
//! assert_eq!(dungeon.grid.count(Tile::End), 1);
//! println!("{dungeon}");
//! ```

mod grid;
pub use grid::{Direction, Grid, Pos};

mod walker;
pub use walker::{Dungeon, Placement, Walker};

mod error;
pub use error::{Error, Result};

pub mod config;
pub use config::{Config, PartialConfig};

/// Content of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tile {
    /// Not visited by the walk
    #[default]
    Empty,
    /// Connector, the walk moves onto it
    Hall,
    /// Dead end off a hall or the start
    Room,
    /// Where the walk ended
    End,
    /// Where the walk began
    Start,
}

impl Tile {
    pub const fn to_char(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Hall => 'H',
            Self::Room => 'R',
            Self::End => 'E',
            Self::Start => 'S',
        }
    }
}

/// Generate a dungeon of the given size from a fresh random seed
pub fn generate(size: usize) -> Result<Dungeon> {
    Config { size, seed: None }.generate()
}
