//! # mimic3-tts
//!
//! A text-to-speech plugin that hands synthesis to a Mimic 3 engine and
//! returns the result as a playable WAV file.
//!
//! ## Features
//!
//! - **Voice catalog**: flattens the engine's voices into `voice#speaker` entries
//! - **Voice binding**: validates a persisted voice preference and falls back to the engine default
//! - **Text normalization**: lowercases and isolates digit runs before synthesis
//! - **WAV packaging**: joins the engine's audio tokens into a single in-memory WAV file
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! mimic3-tts = { version = "0.1", features = ["mimic3"] }
//! ```
//!
//! ```ignore
//! use mimic3_tts::{engines::mimic3::Mimic3Client, Mimic3Plugin, Profile, TextToSpeech};
//!
//! let profile = Profile::load("profile.json".as_ref())?;
//! let mut plugin = Mimic3Plugin::new(profile, Mimic3Client::factory("http://localhost:59125"))?;
//!
//! let wav = plugin.say("Hello, world!", None)?;
//! std::fs::write("output.wav", wav)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod binder;
pub mod catalog;
pub mod config;
pub mod engines;
pub mod error;
pub mod normalize;
pub mod plugin;
pub mod settings;
pub mod wav;

#[cfg(test)]
mod test_support;

pub use config::{ConfigProvider, Profile};
pub use error::{Result, TtsError};
pub use plugin::{Mimic3Plugin, TextToSpeech};
pub use settings::{Mimic3Settings, Mimic3SettingsBuilder, SettingDescriptor};

use serde::Deserialize;

/// A voice as reported by the synthesis engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Voice {
    /// Voice identifier, e.g. `"en_US/cmu-arctic_low"`
    pub key: String,
    /// Language code in the engine's underscore form, e.g. `"en_US"`
    pub language: String,
    /// Speaker names for multi-speaker voices, `None` for single-speaker voices
    #[serde(default)]
    pub speakers: Option<Vec<String>>,
}

/// Raw audio produced by the engine for part of an utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioResult {
    /// Interleaved little-endian PCM samples
    pub audio_bytes: Vec<u8>,
    pub num_channels: u16,
    pub sample_width_bytes: u16,
    /// Aggregate sample rate across all channels (frame rate x channels)
    pub sample_rate_hz: u32,
}

/// One entry of the result stream returned when an utterance ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisToken {
    /// Audio samples for the utterance
    Audio(AudioResult),
    /// A named marker reached while speaking; carries no audio
    Mark(String),
}

/// Common interface for the external synthesis engine.
///
/// An utterance is opened with [`begin_utterance`](Self::begin_utterance),
/// fed text with [`speak_text`](Self::speak_text) and closed with
/// [`end_utterance`](Self::end_utterance), which yields its results.
/// Only one utterance may be open at a time.
pub trait SynthesisEngine {
    /// List every voice the engine can synthesize with.
    fn get_voices(&mut self) -> Result<Vec<Voice>>;

    /// Open a new utterance.
    fn begin_utterance(&mut self) -> Result<()>;

    /// Add text to the open utterance.
    fn speak_text(&mut self, text: &str) -> Result<()>;

    /// Close the open utterance and return its results in order.
    fn end_utterance(&mut self) -> Result<Vec<SynthesisToken>>;
}

/// Builds engine clients pinned to a particular voice, speaker and sample rate.
pub trait EngineFactory {
    type Engine: SynthesisEngine;

    fn create(&self, settings: &Mimic3Settings) -> Result<Self::Engine>;
}

impl<E, F> EngineFactory for F
where
    E: SynthesisEngine,
    F: Fn(&Mimic3Settings) -> Result<E>,
{
    type Engine = E;

    fn create(&self, settings: &Mimic3Settings) -> Result<E> {
        self(settings)
    }
}

/// Run a single utterance for `text` and return the engine's results.
///
/// The text is sent as one chunk between exactly one begin/end pair. If the
/// text is rejected the utterance is still closed, so the engine is idle
/// again when the error is returned.
pub fn synthesize<E: SynthesisEngine + ?Sized>(
    engine: &mut E,
    text: &str,
) -> Result<Vec<SynthesisToken>> {
    engine.begin_utterance()?;
    if let Err(e) = engine.speak_text(text) {
        if let Err(close) = engine.end_utterance() {
            log::warn!("Could not close rejected utterance: {close}");
        }
        return Err(e);
    }
    let tokens = engine.end_utterance()?;
    log::debug!("Utterance produced {} tokens", tokens.len());
    Ok(tokens)
}
