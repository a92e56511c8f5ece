use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::debug;

use crate::config::AudioSettings;

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, Playback, PlaybackError};

const IDLE_POLL: Duration = Duration::from_millis(100);

struct Worker {
    tx: Sender<AudioCmd>,
    join: JoinHandle<()>,
}

/// `rodio`-backed player running on its own thread.
///
/// The thread (and the output device) is only opened on the first command,
/// so a player that never plays never touches the audio stack.
pub struct AudioPlayer {
    settings: AudioSettings,
    playing: Arc<AtomicBool>,
    worker: Option<Worker>,
    play_to_end: bool,
}

impl AudioPlayer {
    pub fn new(audio_settings: AudioSettings) -> Self {
        Self {
            settings: audio_settings,
            playing: Arc::new(AtomicBool::new(false)),
            worker: None,
            play_to_end: false,
        }
    }

    /// Make `start` block until the started file has finished.
    ///
    /// Successive starts then play one after another instead of cutting each
    /// other off.
    pub fn play_to_end(mut self, enabled: bool) -> Self {
        self.play_to_end = enabled;
        self
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    fn send(&mut self, cmd: AudioCmd) -> Result<(), PlaybackError> {
        let worker = self.worker.get_or_insert_with(|| {
            let (tx, rx) = mpsc::channel::<AudioCmd>();
            let join = spawn_audio_thread(rx, self.playing.clone(), self.settings.clone());
            Worker { tx, join }
        });
        worker.tx.send(cmd).map_err(|_| PlaybackError::Disconnected)
    }

    /// Block until nothing is playing any more.
    ///
    /// Returns early if the audio thread has exited.
    pub fn wait_until_idle(&self) {
        let Some(worker) = self.worker.as_ref() else {
            return;
        };
        while self.is_playing() && !worker.join.is_finished() {
            thread::sleep(IDLE_POLL);
        }
    }

    pub fn quit_softly(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        let _ = worker.tx.send(AudioCmd::Quit {
            fade_out_ms: self.settings.quit_fade_out_ms,
        });
        let _ = worker.join.join();
        debug!("audio thread joined");
    }
}

impl Playback for AudioPlayer {
    /// Returns once the audio thread has the file playing, or after it has
    /// finished when `play_to_end` is set.
    fn start(&mut self, path: &Path) -> Result<(), PlaybackError> {
        let (started_tx, started_rx) = mpsc::channel();
        self.send(AudioCmd::Play {
            path: path.to_path_buf(),
            started: started_tx,
        })?;
        // A thread that dies before answering (no output device) drops the sender.
        match started_rx.recv() {
            Ok(true) => {}
            Ok(false) => return Err(PlaybackError::Unplayable(path.to_path_buf())),
            Err(_) => return Err(PlaybackError::Disconnected),
        }
        if self.play_to_end {
            self.wait_until_idle();
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PlaybackError> {
        if self.worker.is_none() {
            return Ok(());
        }
        self.send(AudioCmd::Stop)
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        self.quit_softly();
    }
}
