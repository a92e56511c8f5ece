use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::audio::AudioPlayer;
use crate::library::scan;
use crate::organizer::Organizer;

mod cli;
mod commands;
pub mod logging;
mod settings;

pub use cli::{Cli, Command};
pub use commands::execute;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = settings::load_settings();

    if matches!(cli.command, Command::Config) {
        let rendered = settings.to_toml().context("failed to render config")?;
        print!("{rendered}");
        return Ok(());
    }

    let dir = cli.dir.clone().unwrap_or_else(|| settings.library.dir.clone());
    let tracks = scan(&dir, &settings.library);

    let seed = cli.seed.or(settings.playback.seed).unwrap_or_else(rand::random);
    debug!("random seed {seed}");

    let player = AudioPlayer::new(settings.audio.clone()).play_to_end(true);
    let mut organizer = Organizer::with_tracks(tracks, player, StdRng::seed_from_u64(seed));
    for file in &cli.add {
        organizer.add_file(file);
    }

    let result = execute(&cli.command, &mut organizer, &mut io::stdout().lock());

    let stopped = organizer.stop_playing();
    organizer.player_mut().quit_softly();
    result?;
    stopped.context("failed to stop playback")
}
