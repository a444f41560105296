use anyhow::Context;
use clap::Parser;

use dungeon::Tile;
use dungeon_tools::{init_logging, Args};

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let config = Args::parse().load()?;
    let dungeon = config
        .generate()
        .context("While generating the dungeon")?;

    println!("Size: {0}x{0}", config.size);
    if let Some(seed) = config.seed {
        println!("Seed: {seed}");
    }
    println!("Start: {:?}", dungeon.start);
    println!(
        "End: {:?} ({})",
        dungeon.end,
        if dungeon.forced_end { "forced" } else { "drawn" }
    );
    println!(
        "Halls: {} (at least {} before a drawn end)",
        dungeon.hallways, dungeon.min_hallways
    );
    println!("Rooms: {}", dungeon.grid.count(Tile::Room));
    println!("Empty: {}", dungeon.grid.count(Tile::Empty));
    println!("Placements: {}", dungeon.placements.len());

    Ok(())
}
