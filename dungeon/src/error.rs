use thiserror::Error;

/// Errors that can stop a dungeon from being generated
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The grid needs at least one cell to hold the start
    #[error("invalid dungeon size {0}: the side length must be at least 1")]
    InvalidSize(i64),
    /// The grid would not fit in memory
    #[error("dungeon size {0} is too large to allocate")]
    TooLarge(usize),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
