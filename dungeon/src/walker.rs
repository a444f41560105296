use std::fmt::Display;

use rand::Rng;
use rand_wyrand::WyRand;

use crate::{Direction, Error, Grid, Pos, Result, Tile};

// Tile draw thresholds, on a roll in 1..=100
const END_MAX_RAND: u8 = 10;
const ROOM_MAX_RAND_NO_END: u8 = 30;
const ROOM_MAX_RAND: u8 = 40;

/// A single tile put down by the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Cursor position the tile was placed from
    pub from: Pos,
    /// Where the tile went
    pub pos: Pos,
    /// What was placed
    pub tile: Tile,
}
impl Placement {
    /// The walk was boxed in and ended on its own cursor
    #[inline(always)]
    #[must_use]
    pub fn is_forced(&self) -> bool {
        self.pos == self.from
    }
}

/// A finished dungeon, together with the record of the walk that built it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dungeon {
    /// The generated tiles
    pub grid: Grid,
    /// Where the walk started.
    /// If the walk was boxed in right at the start, this cell holds `End`.
    pub start: Pos,
    /// Where the walk ended
    pub end: Pos,
    /// Halls placed before the end
    pub hallways: usize,
    /// Halls needed before `End` could be drawn
    pub min_hallways: usize,
    /// The end was placed because no free neighbour was left
    pub forced_end: bool,
    /// Every tile placed after the start, in order
    pub placements: Vec<Placement>,
}

impl Display for Dungeon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.grid, f)
    }
}

/// Generates dungeons by walking a grid at random
///
/// The random source is the only state kept between generations.
#[derive(Debug, Clone)]
pub struct Walker<R = WyRand> {
    rng: R,
}

impl<R> Walker<R>
where
    R: Rng,
{
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a dungeon on a `size`×`size` grid
    pub fn generate(&mut self, size: usize) -> Result<Dungeon> {
        if size == 0 {
            return Err(Error::InvalidSize(0));
        }
        let mut walk = Walk::start(size, &mut self.rng)?;
        log::debug!(
            "Walking a {size}x{size} grid from {:?}, {} halls before the end",
            walk.start,
            walk.min_hallways
        );
        loop {
            if let State::Done(end) = walk.step() {
                let dungeon = walk.finish(end);
                log::debug!(
                    "Reached the end at {:?} after {} halls ({})",
                    dungeon.end,
                    dungeon.hallways,
                    if dungeon.forced_end { "forced" } else { "drawn" }
                );
                return Ok(dungeon);
            }
        }
    }
}

/// State of the walk after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Done(Placement),
}

/// A single generation in progress
struct Walk<'r, R: ?Sized> {
    rng: &'r mut R,
    grid: Grid,
    start: Pos,
    cursor: Pos,
    hallways: usize,
    min_hallways: usize,
    placements: Vec<Placement>,
}

impl<'r, R> Walk<'r, R>
where
    R: Rng + ?Sized,
{
    fn start(size: usize, rng: &'r mut R) -> Result<Self> {
        debug_assert!(size > 0);
        let mut grid = Grid::try_new(size)?;
        let x = rng.gen_range(0..size);
        let y = rng.gen_range(0..size);
        let start = [x, y];
        grid.set(&start, Tile::Start);
        Ok(Self {
            rng,
            grid,
            start,
            cursor: start,
            hallways: 0,
            min_hallways: size / 2,
            placements: vec![],
        })
    }

    fn step(&mut self) -> State {
        let placement = self.place_next_tile();
        self.placements.push(placement);
        log::trace!(
            "{:?}: placed {:?} at {:?}",
            placement.from,
            placement.tile,
            placement.pos
        );
        match placement.tile {
            // rooms are dead ends, the cursor stays put
            Tile::Room => State::Running,
            Tile::End => State::Done(placement),
            Tile::Hall => {
                self.cursor = placement.pos;
                self.hallways += 1;
                State::Running
            }
            tile @ (Tile::Empty | Tile::Start) => {
                unreachable!("The walk placed {tile:?} at {:?}", placement.pos)
            }
        }
    }

    /// Place a tile next to the cursor, or end the walk on the cursor if it is boxed in
    fn place_next_tile(&mut self) -> Placement {
        let from = self.cursor;
        if self.is_forced_end(&from) {
            self.grid.set(&from, Tile::End);
            return Placement {
                from,
                pos: from,
                tile: Tile::End,
            };
        }
        let pos = self.sample_direction(&from);
        let tile = self.select_tile();
        self.grid.set(&pos, tile);
        Placement { from, pos, tile }
    }

    fn is_forced_end(&self, pos: &Pos) -> bool {
        !Direction::ALL
            .into_iter()
            .filter_map(|d| d.step(pos))
            .any(|p| self.grid.can_place(&p))
    }

    /// Draw directions until one leads to a free cell.
    ///
    /// Must only be called if such a direction exists.
    fn sample_direction(&mut self, from: &Pos) -> Pos {
        loop {
            let direction = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
            if let Some(pos) = direction.step(from) {
                if self.grid.can_place(&pos) {
                    return pos;
                }
            }
        }
    }

    fn select_tile(&mut self) -> Tile {
        let roll = self.rng.gen_range(1..=100);
        tile_for_roll(roll, self.hallways >= self.min_hallways)
    }

    fn finish(self, end: Placement) -> Dungeon {
        Dungeon {
            grid: self.grid,
            start: self.start,
            end: end.pos,
            hallways: self.hallways,
            min_hallways: self.min_hallways,
            forced_end: end.is_forced(),
            placements: self.placements,
        }
    }
}

/// Tile chosen by a roll in 1..=100
fn tile_for_roll(roll: u8, end_allowed: bool) -> Tile {
    debug_assert!((1..=100).contains(&roll));
    if !end_allowed {
        if roll < ROOM_MAX_RAND_NO_END {
            Tile::Room
        } else {
            Tile::Hall
        }
    } else if roll < END_MAX_RAND {
        Tile::End
    } else if roll < ROOM_MAX_RAND {
        Tile::Room
    } else {
        Tile::Hall
    }
}
