use crate::config::ConfigProvider;
use crate::settings::{Mimic3Settings, Mimic3SettingsBuilder, SAMPLE_RATE};
use crate::{catalog, EngineFactory, Result};

pub const VOICE_KEY: &[&str] = &["mimic3-tts", "voice"];
pub const SPEAKER_KEY: &[&str] = &["mimic3-tts", "speaker"];
pub const LANGUAGE_KEY: &[&str] = &["language"];

pub const DEFAULT_VOICE: &str = "en_US/cmu-arctic_low#slt";
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// A voice and speaker pair. Empty strings select the engine default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceSelection {
    pub voice: String,
    pub speaker: String,
}

impl VoiceSelection {
    /// Split a `voice` or `voice#speaker` identifier.
    pub fn parse(id: &str) -> Self {
        match id.split_once('#') {
            Some((voice, speaker)) => Self {
                voice: voice.to_string(),
                speaker: speaker.to_string(),
            },
            None => Self {
                voice: id.to_string(),
                speaker: String::new(),
            },
        }
    }

    pub fn is_default(&self) -> bool {
        self.voice.is_empty() && self.speaker.is_empty()
    }

    /// Apply an override such as `voice#speaker`.
    ///
    /// Empty parts keep the current value. Returns `None` when the result
    /// is the selection already in use.
    pub fn with_override(&self, id: &str) -> Option<Self> {
        let requested = Self::parse(id);
        let next = Self {
            voice: if requested.voice.is_empty() {
                self.voice.clone()
            } else {
                requested.voice
            },
            speaker: if requested.speaker.is_empty() {
                self.speaker.clone()
            } else {
                requested.speaker
            },
        };
        (next != *self).then_some(next)
    }

    pub fn settings(&self) -> Result<Mimic3Settings> {
        Ok(Mimic3SettingsBuilder::default()
            .voice(self.voice.as_str())
            .speaker(self.speaker.as_str())
            .sample_rate(SAMPLE_RATE)
            .build()?)
    }

    /// The identifier as it appears in the voice catalog.
    pub fn id(&self) -> String {
        if self.speaker.is_empty() {
            self.voice.clone()
        } else {
            format!("{}#{}", self.voice, self.speaker)
        }
    }
}

/// Read the configured language in the engine's form.
pub fn configured_language<P: ConfigProvider + ?Sized>(config: &P) -> String {
    catalog::engine_language(&config.get_or(LANGUAGE_KEY, DEFAULT_LANGUAGE))
}

/// Read the persisted voice preference.
///
/// A separately stored speaker is used only when the voice itself names none.
pub fn preferred_voice<P: ConfigProvider + ?Sized>(config: &P) -> String {
    let voice = config.get_or(VOICE_KEY, DEFAULT_VOICE);
    if voice.is_empty() || voice.contains('#') {
        return voice;
    }
    match config.get(SPEAKER_KEY) {
        Some(speaker) if !speaker.is_empty() => format!("{voice}#{speaker}"),
        _ => voice,
    }
}

/// Validate a preference against the catalog of currently valid voices.
///
/// An unknown preference is not an error: it resolves to the engine default.
pub fn resolve(preference: &str, voices: &[String]) -> VoiceSelection {
    if preference.is_empty() || !voices.iter().any(|v| v == preference) {
        log::info!(
            "Voice {preference:?} not among {} available voices, using engine default",
            voices.len()
        );
        return VoiceSelection::default();
    }
    VoiceSelection::parse(preference)
}

/// Query the catalog for `language`, treating an unreachable engine as an
/// empty catalog.
pub fn available_voices<F: EngineFactory + ?Sized>(factory: &F, language: &str) -> Vec<String> {
    let listed = factory
        .create(&Mimic3Settings::default())
        .and_then(|mut engine| catalog::list_voices(&mut engine, Some(language)));
    match listed {
        Ok(voices) => voices,
        Err(e) => {
            log::warn!("Could not list voices: {e}");
            Vec::new()
        }
    }
}

/// Resolve the startup selection from configuration and build its engine.
pub fn bind<P, F>(config: &P, factory: &F) -> Result<(VoiceSelection, F::Engine)>
where
    P: ConfigProvider + ?Sized,
    F: EngineFactory + ?Sized,
{
    let preference = preferred_voice(config);
    log::info!("Voice: {preference}");

    let voices = available_voices(factory, &configured_language(config));
    let selection = resolve(&preference, &voices);
    let engine = factory.create(&selection.settings()?)?;
    Ok((selection, engine))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Profile;
    use crate::test_support::{sample_catalog, ScriptedEngine};
    use serde_json::json;
    use std::cell::RefCell;

    fn catalog() -> Vec<String> {
        vec![
            "en_US/cmu-arctic_low#slt".to_string(),
            "en_US/cmu-arctic_low#rms".to_string(),
            "en_UK/apope_low".to_string(),
        ]
    }

    #[test]
    fn parses_voice_and_speaker() {
        let sel = VoiceSelection::parse("en_US/cmu-arctic_low#rms");
        assert_eq!(sel.voice, "en_US/cmu-arctic_low");
        assert_eq!(sel.speaker, "rms");
        assert_eq!(VoiceSelection::parse("en_UK/apope_low").speaker, "");
        assert_eq!(sel.id(), "en_US/cmu-arctic_low#rms");
    }

    #[test]
    fn resolve_accepts_listed_voice() {
        let sel = resolve("en_UK/apope_low", &catalog());
        assert_eq!(sel.voice, "en_UK/apope_low");
        assert!(sel.speaker.is_empty());
    }

    #[test]
    fn resolve_falls_back_for_unknown_voice() {
        assert!(resolve("en_US/cmu-arctic_low#zzz", &catalog()).is_default());
        assert!(resolve("en_US/cmu-arctic_low", &catalog()).is_default());
        assert!(resolve("", &catalog()).is_default());
        assert!(resolve("en_UK/apope_low", &[]).is_default());
    }

    #[test]
    fn override_switches_speaker() {
        let current = VoiceSelection::parse("en_US/cmu-arctic_low#rms");
        let next = current.with_override("en_US/cmu-arctic_low#slt").unwrap();
        assert_eq!(next.speaker, "slt");
    }

    #[test]
    fn override_with_empty_speaker_keeps_current_speaker() {
        let current = VoiceSelection::parse("en_US/cmu-arctic_low#rms");
        assert_eq!(current.with_override("en_US/cmu-arctic_low#"), None);
        assert_eq!(current.with_override("en_US/cmu-arctic_low"), None);

        let next = current.with_override("en_US/vctk_low#").unwrap();
        assert_eq!(next.voice, "en_US/vctk_low");
        assert_eq!(next.speaker, "rms");
    }

    #[test]
    fn override_with_empty_voice_keeps_current_voice() {
        let current = VoiceSelection::parse("en_US/cmu-arctic_low#rms");
        let next = current.with_override("#awb").unwrap();
        assert_eq!(next.voice, "en_US/cmu-arctic_low");
        assert_eq!(next.speaker, "awb");
    }

    #[test]
    fn preference_merges_separate_speaker_key() {
        let split = Profile::from_value(json!({
            "mimic3-tts": { "voice": "en_US/cmu-arctic_low", "speaker": "awb" }
        }));
        assert_eq!(preferred_voice(&split), "en_US/cmu-arctic_low#awb");

        let combined = Profile::from_value(json!({
            "mimic3-tts": { "voice": "en_US/cmu-arctic_low#rms", "speaker": "awb" }
        }));
        assert_eq!(preferred_voice(&combined), "en_US/cmu-arctic_low#rms");

        assert_eq!(preferred_voice(&Profile::default()), DEFAULT_VOICE);
    }

    #[test]
    fn language_defaults_to_us_english() {
        assert_eq!(configured_language(&Profile::default()), "en_US");
        let de = Profile::from_value(json!({ "language": "de-DE" }));
        assert_eq!(configured_language(&de), "de_DE");
    }

    #[test]
    fn bind_pins_resolved_voice_at_16khz() {
        let created = RefCell::new(Vec::new());
        let factory = |settings: &Mimic3Settings| -> Result<ScriptedEngine> {
            created.borrow_mut().push(settings.clone());
            Ok(ScriptedEngine::new(sample_catalog(), vec![]))
        };
        let profile = Profile::from_value(json!({
            "language": "en-US",
            "mimic3-tts": { "voice": "en_US/cmu-arctic_low#rms" }
        }));

        let (selection, _engine) = bind(&profile, &factory).unwrap();
        assert_eq!(selection, VoiceSelection::parse("en_US/cmu-arctic_low#rms"));

        let created = created.borrow();
        let pinned = created.last().unwrap();
        assert_eq!(pinned.voice, "en_US/cmu-arctic_low");
        assert_eq!(pinned.speaker, "rms");
        assert_eq!(pinned.sample_rate, 16000);
    }

    #[test]
    fn bind_falls_back_when_voice_is_outside_language() {
        let factory =
            |_: &Mimic3Settings| -> Result<ScriptedEngine> { Ok(ScriptedEngine::new(sample_catalog(), vec![])) };
        let profile = Profile::from_value(json!({
            "language": "de",
            "mimic3-tts": { "voice": "en_UK/apope_low" }
        }));
        let (selection, _) = bind(&profile, &factory).unwrap();
        assert!(selection.is_default());
    }

    #[test]
    fn unreachable_catalog_means_no_voices() {
        let factory = |_: &Mimic3Settings| -> Result<ScriptedEngine> { Ok(ScriptedEngine::unavailable()) };
        assert!(available_voices(&factory, "en_US").is_empty());

        let (selection, _) = bind(&Profile::default(), &factory).unwrap();
        assert!(selection.is_default());
    }
}
