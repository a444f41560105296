use std::fmt::Display;

use crate::{Error, Result, Tile};

/// A cell coordinate, `[x, y]`
pub type Pos = [usize; 2];

/// One of the four orthogonal steps the walk can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    /// All directions, in draw order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Step from `pos` in this direction.
    ///
    /// Returns `None` if the step would leave the non-negative quadrant.
    /// Upper bounds are the grid's business.
    /// ```
    /// use dungeon::Direction;
    ///
    /// assert_eq!(Direction::North.step(&[3, 3]), Some([3, 2]));
    /// assert_eq!(Direction::East.step(&[3, 3]), Some([4, 3]));
    /// assert_eq!(Direction::West.step(&[0, 3]), None);
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn step(self, [x, y]: &Pos) -> Option<Pos> {
        match self {
            Direction::North => match y.checked_sub(1) {
                Some(y) => Some([*x, y]),
                None => None,
            },
            Direction::South => Some([*x, *y + 1]),
            Direction::West => match x.checked_sub(1) {
                Some(x) => Some([x, *y]),
                None => None,
            },
            Direction::East => Some([*x + 1, *y]),
        }
    }
}

/// A square grid of tiles
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    /// Tiles, row by row
    tiles: Box<[Tile]>,
}

impl Grid {
    /// Create a `size`×`size` grid of empty tiles.
    ///
    /// Panics if the grid does not fit in memory, see [`Grid::try_new`].
    pub fn new(size: usize) -> Self {
        Self::try_new(size).expect("The grid should fit in memory")
    }

    /// Create a `size`×`size` grid of empty tiles, if it can be allocated
    /// ```
    /// use dungeon::{Error, Grid};
    ///
    /// assert_eq!(Grid::try_new(4).unwrap().size(), 4);
    /// assert_eq!(Grid::try_new(usize::MAX), Err(Error::TooLarge(usize::MAX)));
    /// ```
    pub fn try_new(size: usize) -> Result<Self> {
        let cells = size.checked_mul(size).ok_or(Error::TooLarge(size))?;
        let mut tiles = Vec::new();
        tiles
            .try_reserve_exact(cells)
            .map_err(|_| Error::TooLarge(size))?;
        tiles.resize(cells, Tile::Empty);
        Ok(Self {
            size,
            tiles: tiles.into_boxed_slice(),
        })
    }

    /// Side length
    #[inline(always)]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Check if a point is inside the grid
    /// ```
    /// use dungeon::Grid;
    ///
    /// let grid = Grid::new(3);
    /// assert!(grid.contains(&[2, 0]));
    /// assert!(!grid.contains(&[0, 3]));
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn contains(&self, [x, y]: &Pos) -> bool {
        *x < self.size && *y < self.size
    }

    #[inline(always)]
    #[must_use]
    const fn linear(&self, [x, y]: &Pos) -> usize {
        y * self.size + x
    }

    /// Tile at `pos`, if inside the grid
    /// ```
    /// use dungeon::{Grid, Tile};
    ///
    /// let grid = Grid::new(2);
    /// assert_eq!(grid.get(&[1, 1]), Some(Tile::Empty));
    /// assert_eq!(grid.get(&[2, 1]), None);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn get(&self, pos: &Pos) -> Option<Tile> {
        if self.contains(pos) {
            Some(self.tiles[self.linear(pos)])
        } else {
            None
        }
    }

    /// Overwrite the tile at `pos`.
    ///
    /// Panics if `pos` is outside the grid.
    pub fn set(&mut self, pos: &Pos, tile: Tile) {
        assert!(
            self.contains(pos),
            "{pos:?} is outside a grid of size {}",
            self.size
        );
        let idx = self.linear(pos);
        self.tiles[idx] = tile;
    }

    /// A new tile can go at `pos`: it is inside the grid and still empty
    /// ```
    /// use dungeon::{Grid, Tile};
    ///
    /// let mut grid = Grid::new(2);
    /// grid.set(&[0, 0], Tile::Hall);
    /// assert!(!grid.can_place(&[0, 0]));
    /// assert!(grid.can_place(&[1, 0]));
    /// assert!(!grid.can_place(&[2, 0]));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn can_place(&self, pos: &Pos) -> bool {
        self.get(pos) == Some(Tile::Empty)
    }

    /// In-grid orthogonal neighbours of `pos`
    pub fn neighbours(&self, pos: &Pos) -> impl Iterator<Item = Pos> + '_ {
        let pos = *pos;
        Direction::ALL
            .into_iter()
            .filter_map(move |d| d.step(&pos))
            .filter(move |p| self.contains(p))
    }

    /// All cells with their coordinates, row by row
    pub fn iter(&self) -> impl Iterator<Item = (Pos, Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, t)| ([i % self.size, i / self.size], *t))
    }

    /// Number of cells holding `tile`
    #[must_use]
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|t| **t == tile).count()
    }
}

/// One row per line, cells separated by a single space.
///
/// Lines run along x at fixed y, so `[x, y]` is column x of line y.
impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.tiles.chunks(self.size.max(1)) {
            for (x, tile) in row.iter().enumerate() {
                if x > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", tile.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
