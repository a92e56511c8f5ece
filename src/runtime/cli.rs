use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "jukebox")]
#[command(version)]
#[command(about = "Organize a folder of tracks and play them in order, at random or shuffled")]
pub struct Cli {
    /// Library directory to scan (defaults to `library.dir` from the config)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Extra files appended to the library after the scan
    #[arg(short, long = "add", value_name = "FILE")]
    pub add: Vec<PathBuf>,

    /// Seed for random picks and shuffles (overrides `playback.seed`)
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the number of tracks in the library
    Count,
    /// List every track, or only the one at INDEX
    List {
        #[arg(allow_negative_numbers = true)]
        index: Option<i64>,
    },
    /// Show album, length and file of the track at INDEX
    Info {
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },
    /// List tracks whose artist contains NAME (case-sensitive)
    Artist { name: String },
    /// Play the track at INDEX
    Play {
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },
    /// Play the first track
    First,
    /// Play one track picked at random
    Random,
    /// Play every track once, in a random order
    Shuffle,
    /// Print the effective configuration as TOML
    Config,
}
