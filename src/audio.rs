use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

use crate::config::GameConfig;
use crate::events::SoundCue;

type Sound = Buffered<Decoder<BufReader<File>>>;

/// Fire-and-forget playback of the game's sound cues.
///
/// Any failure while opening the output device or loading a file leaves the
/// manager silent for that cue instead of stopping the game.
pub struct AudioManager {
    output: Option<(OutputStream, OutputStreamHandle)>,
    /// Pre-loaded and buffered sounds, keyed by cue
    sounds: HashMap<SoundCue, Sound>,
}

impl AudioManager {
    /// Opens the default output device and pre-loads every cue
    pub fn new(config: &GameConfig) -> Self {
        let output = match OutputStream::try_default() {
            Ok(output) => output,
            Err(err) => {
                log::warn!("failed to open audio output, continuing without audio: {err}");
                return Self::silent();
            }
        };

        let mut sounds = HashMap::new();
        for (cue, path) in [
            (SoundCue::Kill, &config.kill_sound),
            (SoundCue::Death, &config.death_sound),
        ] {
            match load_sound(path) {
                Ok(sound) => {
                    sounds.insert(cue, sound);
                }
                Err(err) => log::warn!("failed to load {cue:?} sound from {path}: {err}"),
            }
        }

        Self {
            output: Some(output),
            sounds,
        }
    }

    /// A manager that plays nothing
    pub fn silent() -> Self {
        Self {
            output: None,
            sounds: HashMap::new(),
        }
    }

    pub fn is_silent(&self) -> bool {
        self.output.is_none() || self.sounds.is_empty()
    }

    pub fn play(&self, cue: SoundCue) {
        let (Some((_, handle)), Some(sound)) = (&self.output, self.sounds.get(&cue)) else {
            return;
        };
        // Playback errors are not worth interrupting a frame for
        if let Ok(sink) = Sink::try_new(handle) {
            sink.set_volume(volume(cue));
            // Cloning a buffered source only clones references
            sink.append(sound.clone());
            sink.detach();
        }
    }
}

fn volume(cue: SoundCue) -> f32 {
    match cue {
        SoundCue::Kill => 0.4,
        SoundCue::Death => 0.6,
    }
}

fn load_sound(path: &str) -> Result<Sound, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let source = Decoder::new(BufReader::new(file))?;
    Ok(source.buffered())
}
