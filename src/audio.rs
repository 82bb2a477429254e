//! The seam between the game core and whatever actually makes noise.
//!
//! The core never synthesizes or mixes audio; it emits named [`Cue`]s and
//! keeps the continuous playback settings up to date on the backend.  The
//! backend shipped with the binary is [`Silent`]; a real synthesizer plugs in
//! through [`AudioBackend`] without the core changing.
use serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize};
use std::fmt;

/// A discrete sound-effect request, identified by name only
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Cue {
    /// The snake ate a piece of food
    Eat,
    /// The run ended in a collision
    GameOver,
    /// The final score qualified for the leaderboard
    HighScore,
    /// The speed tier went up
    LevelUp,
}

/// A playback volume in tenths of full scale.
///
/// Storing tenths keeps the 0.1-step adjustments exact and the type `Eq`;
/// the float form only exists at the serde and backend boundaries.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub(crate) struct Volume(u8);

impl Volume {
    pub(crate) const MUTED: Volume = Volume(0);
    pub(crate) const FULL: Volume = Volume(10);

    /// Convert from a unit-interval float, clamping and rounding to the
    /// nearest tenth
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub(crate) fn from_f32(value: f32) -> Volume {
        let clamped = value.clamp(0.0, 1.0);
        Volume((clamped * 10.0).round() as u8)
    }

    pub(crate) fn as_f32(self) -> f32 {
        f32::from(self.0) / 10.0
    }

    /// One step (0.1) louder, saturating at full scale
    pub(crate) fn louder(self) -> Volume {
        Volume((self.0 + 1).min(Volume::FULL.0))
    }

    /// One step (0.1) softer, saturating at zero
    pub(crate) fn softer(self) -> Volume {
        Volume(self.0.saturating_sub(1))
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:.1}", self.as_f32()))
    }
}

impl Serialize for Volume {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f32(self.as_f32())
    }
}

impl<'de> Deserialize<'de> for Volume {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f32::deserialize(deserializer).map(Volume::from_f32)
    }
}

/// Continuous playback settings applied by the backend.  Initial values come
/// from the `[audio]` table of the configuration file.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct AudioSettings {
    pub(crate) sound_enabled: bool,
    pub(crate) music_volume: Volume,
    pub(crate) sfx_volume: Volume,
}

impl Default for AudioSettings {
    fn default() -> AudioSettings {
        AudioSettings {
            sound_enabled: true,
            music_volume: Volume(3),
            sfx_volume: Volume(5),
        }
    }
}

/// The audio collaborator proper.  Implementations own tone synthesis,
/// device setup, and background music; the core only calls these two methods.
pub(crate) trait AudioBackend {
    /// Play the sound for `cue` at the current SFX volume
    fn cue(&mut self, cue: Cue, settings: &AudioSettings);

    /// Apply updated playback settings to anything already sounding
    fn configure(&mut self, settings: &AudioSettings);
}

/// Backend that discards everything
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Silent;

impl AudioBackend for Silent {
    fn cue(&mut self, _cue: Cue, _settings: &AudioSettings) {}

    fn configure(&mut self, _settings: &AudioSettings) {}
}

/// Owns the [`AudioSettings`] and forwards cues & settings changes to the
/// backend.  Cues are dropped here when sound is disabled, so backends never
/// need to check.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Mixer<B = Silent> {
    backend: B,
    settings: AudioSettings,
}

impl Mixer {
    pub(crate) fn new(settings: AudioSettings) -> Mixer {
        Mixer::with_backend(Silent, settings)
    }
}

impl<B: AudioBackend> Mixer<B> {
    pub(crate) fn with_backend(mut backend: B, settings: AudioSettings) -> Mixer<B> {
        backend.configure(&settings);
        Mixer { backend, settings }
    }

    pub(crate) fn play(&mut self, cue: Cue) {
        if self.settings.sound_enabled {
            self.backend.cue(cue, &self.settings);
        }
    }

    /// Mutate the settings and push the result to the backend in one step
    pub(crate) fn adjust<T, F: FnOnce(&mut AudioSettings) -> T>(&mut self, f: F) -> T {
        let r = f(&mut self.settings);
        self.backend.configure(&self.settings);
        r
    }
}

impl<B> Mixer<B> {
    pub(crate) fn settings(&self) -> &AudioSettings {
        &self.settings
    }

    #[cfg(test)]
    pub(crate) fn backend_for_tests(&self) -> &B {
        &self.backend
    }
}

/// Backend that records every cue it is asked to play, for asserting on cue
/// order in tests
#[cfg(test)]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Recorder {
    pub(crate) cues: Vec<Cue>,
}

#[cfg(test)]
impl AudioBackend for Recorder {
    fn cue(&mut self, cue: Cue, _settings: &AudioSettings) {
        self.cues.push(cue);
    }

    fn configure(&mut self, _settings: &AudioSettings) {}
}
