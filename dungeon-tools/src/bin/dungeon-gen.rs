use anyhow::Context;
use clap::Parser;

use dungeon_tools::{init_logging, Args};

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let config = Args::parse().load()?;
    let dungeon = config
        .generate()
        .context("While generating the dungeon")?;
    print!("{dungeon}");
    Ok(())
}
