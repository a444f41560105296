use std::{
    fs::read_to_string,
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{bail, Context};
use clap::Parser;
use simple_logger::SimpleLogger;

use dungeon::{Config, Error, PartialConfig};

/// Options shared by the dungeon tools
#[derive(Debug, Parser)]
pub struct Args {
    /// Configuration file for the dungeon
    #[clap(short)]
    pub config: Option<PathBuf>,
    #[clap(flatten)]
    pub dungeon: PartialConfig,
}

pub fn init_logging() -> anyhow::Result<()> {
    SimpleLogger::new()
        .without_timestamps()
        .with_level(if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .env()
        .init()
        .context("While initializing logging")
}

impl Args {
    /// Merge the config file with the command line, asking for the size if neither gives one.
    ///
    /// The returned config always carries a seed, so the run can be repeated.
    pub fn load(self) -> anyhow::Result<Config> {
        let file: PartialConfig = self
            .config
            .map(|path| {
                read_to_string(path)
                    .context("Cannot read config file")
                    .and_then(|s| toml::from_str(&s).context("Cannot parse config file"))
            })
            .transpose()
            .context("While loading configs")?
            .unwrap_or_default();
        let mut config = file.merge(self.dungeon);
        if config.size.is_none() {
            let stdin = io::stdin();
            config.size = Some(
                prompt_size(&mut stdin.lock(), &mut io::stdout())
                    .context("While asking for the dungeon size")?,
            );
        }
        let config = config.or_defaults();
        let seed = config.seed_or_random();
        log::info!("Using seed {seed}");
        Ok(Config {
            seed: Some(seed),
            ..config
        })
    }
}

/// Ask for the side length of the dungeon and read it from `input`
pub fn prompt_size<R, W>(input: &mut R, output: &mut W) -> anyhow::Result<usize>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    writeln!(output, "Enter Dungeon Grid Square Length")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("No dungeon size given");
    }
    let size: i64 = line
        .trim()
        .parse()
        .with_context(|| format!("{:?} is not a whole number", line.trim()))?;
    match usize::try_from(size) {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(Error::InvalidSize(size).into()),
    }
}
