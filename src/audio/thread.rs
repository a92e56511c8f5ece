use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use log::{debug, error, warn};
use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::config::AudioSettings;

use super::sink::create_sink;
use super::types::AudioCmd;

const TICK: Duration = Duration::from_millis(200);
const QUIT_FADE_STEPS: u64 = 20;

/// Volume levels for a fade of `steps` steps, ending at 1.0.
pub(super) fn fade_levels(steps: u64) -> Vec<f32> {
    let steps = steps.max(1);
    (1..=steps).map(|s| s as f32 / steps as f32).collect()
}

/// Sleep per fade step so that `steps` steps take roughly `total_ms`.
pub(super) fn fade_step(total_ms: u64, steps: u64) -> Duration {
    Duration::from_millis((total_ms / steps.max(1)).max(1))
}

struct AudioThread {
    stream: OutputStream,
    settings: AudioSettings,
    playing: Arc<AtomicBool>,
    sink: Option<Sink>,
}

impl AudioThread {
    /// Replace the current sink with one playing `path`; false if it cannot be played.
    fn play(&mut self, path: PathBuf) -> bool {
        let new_sink = match create_sink(&self.stream, &path) {
            Ok(s) => s,
            Err(e) => {
                error!("{e}");
                self.stop();
                return false;
            }
        };
        // Keep the default volume sane even if crossfade is disabled.
        new_sink.set_volume(1.0);

        if let Some(old_sink) = self.sink.take() {
            let busy = !old_sink.is_paused() && !old_sink.empty();
            if busy && self.settings.crossfade_ms > 0 {
                old_sink.set_volume(1.0);
                new_sink.set_volume(0.0);
                new_sink.play();

                // Blocking fade; rodio's mixer keeps both sinks running meanwhile.
                let step = fade_step(self.settings.crossfade_ms, self.settings.crossfade_steps);
                for t in fade_levels(self.settings.crossfade_steps) {
                    old_sink.set_volume(1.0 - t);
                    new_sink.set_volume(t);
                    thread::sleep(step);
                }
            }
            old_sink.stop();
        }

        new_sink.play();
        self.sink = Some(new_sink);
        self.playing.store(true, Ordering::SeqCst);

        debug!("audio thread playing {}", path.display());
        true
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.playing.store(false, Ordering::SeqCst);
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(s) = self.sink.as_ref() {
            if fade_out_ms == 0 {
                s.set_volume(0.0);
            } else {
                let step = fade_step(fade_out_ms, QUIT_FADE_STEPS);
                for t in fade_levels(QUIT_FADE_STEPS) {
                    s.set_volume(1.0 - t);
                    thread::sleep(step);
                }
            }
        }
        self.stop();
    }

    /// Notice when the current file has run out.
    fn tick(&mut self) {
        if self.sink.as_ref().is_some_and(Sink::empty) {
            self.stop();
        }
    }
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    playing: Arc<AtomicBool>,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                error!("no audio output device: {e}");
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped; our own log covers it.
        stream.log_on_drop(false);

        let mut audio = AudioThread {
            stream,
            settings: audio_settings,
            playing,
            sink: None,
        };

        loop {
            match rx.recv_timeout(TICK) {
                Ok(AudioCmd::Play { path, started }) => {
                    let ok = audio.play(path);
                    // The caller may have given up waiting; nothing to do then.
                    let _ = started.send(ok);
                }
                Ok(AudioCmd::Stop) => audio.stop(),
                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    audio.quit(fade_out_ms);
                    break;
                }
                Err(RecvTimeoutError::Timeout) => audio.tick(),
                Err(RecvTimeoutError::Disconnected) => {
                    warn!("audio command channel closed, stopping");
                    audio.stop();
                    break;
                }
            }
        }
    })
}
