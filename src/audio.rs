//! Sound effects and background music
//!
//! Gameplay code only names a [`SoundEffect`]; what actually plays is up to
//! the [`AudioSink`] the session was built with. Missing sound files are
//! silently skipped, so a sink never fails.

use std::path::Path;

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ground or wall jump
    Jump,
    /// Airborne player touches down
    Land,
    /// Score reached a multiple of ten
    ScoreMilestone,
    /// Run ended in a collision
    GameOver,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 4] = [
        SoundEffect::Jump,
        SoundEffect::Land,
        SoundEffect::ScoreMilestone,
        SoundEffect::GameOver,
    ];

    /// File name inside the sound directory
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump.mp3",
            SoundEffect::Land => "landing.wav",
            SoundEffect::ScoreMilestone => "score.wav",
            SoundEffect::GameOver => "game_over.mp3",
        }
    }
}

/// Background track names tried in order
pub const MUSIC_FILES: [&str; 3] = [
    "background_music.ogg",
    "background_music.mp3",
    "background_music.wav",
];

/// Fire-and-forget audio output
pub trait AudioSink {
    /// Play a one-shot effect
    fn play(&self, effect: SoundEffect);

    /// Start the looped background track. Calling it again is a no-op.
    fn start_music(&self) {}
}

/// Plays nothing. Used when audio is disabled or unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&self, _effect: SoundEffect) {}
}

/// Open the best available audio output for these settings
pub fn open_audio(settings: &Settings) -> Box<dyn AudioSink> {
    open_backend(&settings.sound_dir, settings)
}

#[cfg(feature = "sound")]
fn open_backend(sound_dir: &Path, settings: &Settings) -> Box<dyn AudioSink> {
    match backend::RodioAudio::open(sound_dir, settings) {
        Some(audio) => Box::new(audio),
        None => {
            log::warn!("No audio output device - audio disabled");
            Box::new(NullAudio)
        }
    }
}

#[cfg(not(feature = "sound"))]
fn open_backend(sound_dir: &Path, _settings: &Settings) -> Box<dyn AudioSink> {
    log::info!(
        "Built without the `sound` feature; ignoring sounds in {}",
        sound_dir.display()
    );
    Box::new(NullAudio)
}

#[cfg(feature = "sound")]
mod backend {
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::path::Path;

    use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

    use super::{AudioSink, MUSIC_FILES, SoundEffect};
    use crate::settings::Settings;

    /// rodio output with every clip preloaded into memory
    pub struct RodioAudio {
        stream: OutputStream,
        music: Sink,
        clips: HashMap<SoundEffect, Vec<u8>>,
        track: Option<Vec<u8>>,
        sfx_volume: f32,
    }

    impl RodioAudio {
        pub fn open(sound_dir: &Path, settings: &Settings) -> Option<Self> {
            let stream = OutputStreamBuilder::open_default_stream().ok()?;
            let music = Sink::connect_new(stream.mixer());
            music.set_volume(settings.effective_music_volume());

            let clips = SoundEffect::ALL
                .iter()
                .filter_map(|&effect| {
                    let path = sound_dir.join(effect.file_name());
                    match std::fs::read(&path) {
                        Ok(bytes) => Some((effect, bytes)),
                        Err(_) => {
                            log::debug!("No sound for {:?} at {}", effect, path.display());
                            None
                        }
                    }
                })
                .collect();
            let track = MUSIC_FILES
                .iter()
                .find_map(|name| std::fs::read(sound_dir.join(name)).ok());

            Some(Self {
                stream,
                music,
                clips,
                track,
                sfx_volume: settings.effective_sfx_volume(),
            })
        }
    }

    impl AudioSink for RodioAudio {
        fn play(&self, effect: SoundEffect) {
            let Some(bytes) = self.clips.get(&effect) else {
                return;
            };
            match Decoder::new(Cursor::new(bytes.clone())) {
                Ok(source) => {
                    let sink = Sink::connect_new(self.stream.mixer());
                    sink.set_volume(self.sfx_volume);
                    sink.append(source);
                    sink.detach();
                }
                Err(err) => log::warn!("Cannot decode {:?}: {err}", effect),
            }
        }

        fn start_music(&self) {
            if !self.music.empty() {
                return;
            }
            let Some(track) = &self.track else {
                return;
            };
            match Decoder::new(Cursor::new(track.clone())) {
                Ok(source) => self.music.append(source.buffered().repeat_infinite()),
                Err(err) => log::warn!("Cannot decode background music: {err}"),
            }
        }
    }
}
