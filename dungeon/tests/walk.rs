use std::collections::{BTreeSet, VecDeque};

use rand::SeedableRng;
use rand_wyrand::WyRand;

use dungeon::{Config, Dungeon, Error, Grid, Pos, Tile, Walker};

fn walk(size: usize, seed: u64) -> Dungeon {
    Walker::new(WyRand::seed_from_u64(seed))
        .generate(size)
        .expect("Positive sizes should always generate")
}

/// Every (size, seed) pair the property tests run over
fn cases() -> impl Iterator<Item = (usize, u64)> {
    (1..=20).flat_map(|size| (0..40).map(move |seed| (size, seed)))
}

/// Cells reachable from `from` through non-empty cells
fn reachable(grid: &Grid, from: Pos) -> BTreeSet<Pos> {
    let mut seen = BTreeSet::from([from]);
    let mut queue = VecDeque::from([from]);
    while let Some(pos) = queue.pop_front() {
        for n in grid.neighbours(&pos) {
            if grid.get(&n) != Some(Tile::Empty) && seen.insert(n) {
                queue.push_back(n);
            }
        }
    }
    seen
}

#[test]
fn zero_size_is_rejected() {
    let mut walker = Walker::new(WyRand::seed_from_u64(0));
    assert_eq!(walker.generate(0), Err(Error::InvalidSize(0)));
    assert_eq!(dungeon::generate(0), Err(Error::InvalidSize(0)));
}

#[test]
#[cfg(target_pointer_width = "64")]
fn oversized_grid_is_an_error() {
    let mut walker = Walker::new(WyRand::seed_from_u64(0));
    assert_eq!(walker.generate(1 << 32), Err(Error::TooLarge(1 << 32)));
    assert_eq!(walker.generate(usize::MAX), Err(Error::TooLarge(usize::MAX)));
    // the walker is still usable afterwards
    assert_eq!(walker.generate(6).unwrap().grid.count(Tile::End), 1);
}

#[test]
fn one_end_and_at_most_one_start() {
    for (size, seed) in cases() {
        let d = walk(size, seed);
        assert_eq!(d.grid.size(), size);
        assert_eq!(d.grid.count(Tile::End), 1, "size {size}, seed {seed}");
        assert_eq!(d.grid.get(&d.end), Some(Tile::End));
        match d.grid.count(Tile::Start) {
            1 => assert_eq!(d.grid.get(&d.start), Some(Tile::Start)),
            0 => {
                // the walk never left the start
                assert!(d.forced_end);
                assert_eq!(d.end, d.start);
                assert_eq!(d.hallways, 0);
            }
            n => panic!("{n} starts for size {size}, seed {seed}"),
        }
    }
}

#[test]
fn every_tile_is_connected_to_the_start() {
    for (size, seed) in cases() {
        let d = walk(size, seed);
        let reached = reachable(&d.grid, d.start);
        for (pos, tile) in d.grid.iter() {
            if tile != Tile::Empty {
                assert!(
                    reached.contains(&pos),
                    "{pos:?} not reachable for size {size}, seed {seed}\n{d}"
                );
            }
        }
    }
}

#[test]
fn placements_follow_the_cursor() {
    for (size, seed) in cases() {
        let d = walk(size, seed);
        let mut cursor = d.start;
        let mut placed = BTreeSet::from([d.start]);
        for (i, p) in d.placements.iter().enumerate() {
            assert_eq!(p.from, cursor, "size {size}, seed {seed}, step {i}");
            if p.is_forced() {
                assert_eq!(p.tile, Tile::End);
            } else {
                let [fx, fy] = p.from;
                let [x, y] = p.pos;
                assert_eq!(fx.abs_diff(x) + fy.abs_diff(y), 1);
                assert!(placed.insert(p.pos), "{:?} placed twice", p.pos);
            }
            if p.tile == Tile::Hall {
                cursor = p.pos;
            }
        }
        let last = d.placements.last().expect("The walk places at least the end");
        assert_eq!(last.tile, Tile::End);
        assert_eq!(
            d.placements.iter().filter(|p| p.tile == Tile::End).count(),
            1
        );
        assert_eq!(
            d.placements.iter().filter(|p| p.tile == Tile::Hall).count(),
            d.hallways
        );
    }
}

#[test]
fn grid_matches_the_record() {
    for (size, seed) in cases() {
        let d = walk(size, seed);
        let mut grid = Grid::new(size);
        grid.set(&d.start, Tile::Start);
        for p in &d.placements {
            grid.set(&p.pos, p.tile);
        }
        assert_eq!(grid, d.grid);
    }
}

#[test]
fn drawn_ends_respect_the_threshold() {
    let mut drawn = 0;
    let mut forced = 0;
    for (size, seed) in cases() {
        let d = walk(size, seed);
        assert_eq!(d.min_hallways, size / 2);
        if d.forced_end {
            forced += 1;
        } else {
            drawn += 1;
            assert!(
                d.hallways >= d.min_hallways,
                "size {size}, seed {seed}: ended after {} halls",
                d.hallways
            );
        }
    }
    // both kinds of ending show up across the cases
    assert!(drawn > 0);
    assert!(forced > 0);
}

#[test]
fn single_cell_is_forced_to_end_at_the_start() {
    for seed in 0..20 {
        let d = walk(1, seed);
        assert_eq!(d.start, [0, 0]);
        assert_eq!(d.end, [0, 0]);
        assert!(d.forced_end);
        assert_eq!(d.hallways, 0);
        assert_eq!(d.min_hallways, 0);
        assert_eq!(d.placements.len(), 1);
        assert_eq!(d.grid.get(&[0, 0]), Some(Tile::End));
        assert_eq!(d.to_string(), "E\n");
    }
}

#[test]
fn same_seed_same_dungeon() {
    for seed in [0, 1, 42, u64::MAX] {
        let a = walk(40, seed);
        let b = walk(40, seed);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }
}

#[test]
fn config_seed_is_reproducible() {
    let config = Config {
        size: 25,
        seed: Some(1234),
    };
    assert_eq!(config.generate(), config.generate());
    assert_eq!(config.generate(), Ok(walk(25, 1234)));
}

#[test]
fn reused_walker_starts_fresh() {
    let mut walker = Walker::new(WyRand::seed_from_u64(99));
    for size in [30, 2, 17, 1, 30] {
        let d = walker.generate(size).unwrap();
        assert_eq!(d.grid.size(), size);
        assert_eq!(d.grid.count(Tile::End), 1);
        assert!(d.grid.count(Tile::Start) <= 1);
        assert_eq!(
            d.grid.iter().filter(|(_, t)| *t != Tile::Empty).count(),
            d.placements.iter().filter(|p| !p.is_forced()).count() + 1
        );
    }
}

#[test]
fn rendering_uses_one_line_per_row() {
    let d = walk(12, 5);
    let text = d.to_string();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 12);
    for (y, line) in lines.iter().enumerate() {
        let cells: Vec<_> = line.chars().step_by(2).collect();
        assert_eq!(cells.len(), 12);
        assert!(line.chars().skip(1).step_by(2).all(|c| c == ' '));
        for (x, c) in cells.into_iter().enumerate() {
            assert_eq!(Some(c), d.grid.get(&[x, y]).map(Tile::to_char));
        }
    }
}
