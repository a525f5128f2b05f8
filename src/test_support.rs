//! Scripted engine used by unit tests in place of a real Mimic 3 server.

use crate::{AudioResult, Result, SynthesisEngine, SynthesisToken, TtsError, Voice};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Begin,
    Speak(String),
    End,
}

/// Replays a fixed voice catalog and token stream, recording every call.
pub struct ScriptedEngine {
    pub voices: Vec<Voice>,
    pub tokens: Vec<SynthesisToken>,
    pub calls: Vec<Call>,
    pub unavailable: bool,
    /// Fail every `speak_text` call while leaving the utterance open
    pub reject_text: bool,
    open: bool,
}

impl ScriptedEngine {
    pub fn new(voices: Vec<Voice>, tokens: Vec<SynthesisToken>) -> Self {
        Self {
            voices,
            tokens,
            calls: Vec::new(),
            unavailable: false,
            reject_text: false,
            open: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::new(vec![], vec![])
        }
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(TtsError::EngineUnavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

impl SynthesisEngine for ScriptedEngine {
    fn get_voices(&mut self) -> Result<Vec<Voice>> {
        self.check_available()?;
        Ok(self.voices.clone())
    }

    fn begin_utterance(&mut self) -> Result<()> {
        self.check_available()?;
        if self.open {
            return Err(TtsError::Utterance("already open".to_string()));
        }
        self.open = true;
        self.calls.push(Call::Begin);
        Ok(())
    }

    fn speak_text(&mut self, text: &str) -> Result<()> {
        if !self.open {
            return Err(TtsError::Utterance("not open".to_string()));
        }
        if self.reject_text {
            return Err(TtsError::EngineUnavailable("synthesis failed".to_string()));
        }
        self.calls.push(Call::Speak(text.to_string()));
        Ok(())
    }

    fn end_utterance(&mut self) -> Result<Vec<SynthesisToken>> {
        if !self.open {
            return Err(TtsError::Utterance("not open".to_string()));
        }
        self.open = false;
        self.calls.push(Call::End);
        Ok(self.tokens.clone())
    }
}

pub fn voice(key: &str, language: &str, speakers: &[&str]) -> Voice {
    Voice {
        key: key.to_string(),
        language: language.to_string(),
        speakers: if speakers.is_empty() {
            None
        } else {
            Some(speakers.iter().map(|s| s.to_string()).collect())
        },
    }
}

pub fn audio(bytes: &[u8], channels: u16, width: u16, rate: u32) -> SynthesisToken {
    SynthesisToken::Audio(AudioResult {
        audio_bytes: bytes.to_vec(),
        num_channels: channels,
        sample_width_bytes: width,
        sample_rate_hz: rate,
    })
}

/// A small catalog spanning two languages and both voice shapes.
pub fn sample_catalog() -> Vec<Voice> {
    vec![
        voice("en_US/cmu-arctic_low", "en_US", &["slt", "rms", "awb"]),
        voice("en_UK/apope_low", "en_UK", &[]),
        voice("de_DE/thorsten_low", "de_DE", &[]),
        voice("en_US/vctk_low", "en_US", &["p239"]),
    ]
}
