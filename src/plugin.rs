use crate::binder::{self, VoiceSelection};
use crate::config::ConfigProvider;
use crate::normalize::normalize;
use crate::settings::SettingDescriptor;
use crate::{synthesize, wav, EngineFactory, Result};

/// The text-to-speech capability a host framework drives.
pub trait TextToSpeech {
    /// Describe the user-configurable options of this plugin.
    fn settings(&self) -> Result<Vec<SettingDescriptor>>;

    /// Speak `phrase` and return a complete WAV file.
    ///
    /// `voice` optionally overrides the configured `voice#speaker` for this
    /// and later calls. An empty result means the engine produced no audio.
    fn say(&mut self, phrase: &str, voice: Option<&str>) -> Result<Vec<u8>>;
}

/// Text-to-speech plugin backed by a Mimic 3 engine.
pub struct Mimic3Plugin<P: ConfigProvider, F: EngineFactory> {
    config: P,
    factory: F,
    selection: VoiceSelection,
    engine: F::Engine,
}

impl<P: ConfigProvider, F: EngineFactory> Mimic3Plugin<P, F> {
    /// Bind the configured voice and construct the engine client.
    ///
    /// A configured voice the engine does not offer falls back to the
    /// engine's default voice.
    pub fn new(config: P, factory: F) -> Result<Self> {
        let (selection, engine) = binder::bind(&config, &factory)?;
        Ok(Self {
            config,
            factory,
            selection,
            engine,
        })
    }

    /// The voice and speaker the engine client is pinned to.
    pub fn selection(&self) -> &VoiceSelection {
        &self.selection
    }

    /// Selectable `voice#speaker` identifiers for the configured language.
    pub fn voices(&self) -> Vec<String> {
        binder::available_voices(&self.factory, &binder::configured_language(&self.config))
    }

    fn reconfigure(&mut self, voice: &str) -> Result<()> {
        let Some(next) = self.selection.with_override(voice) else {
            return Ok(());
        };
        log::info!("Switching voice from {:?} to {:?}", self.selection.id(), next.id());
        self.engine = self.factory.create(&next.settings()?)?;
        self.selection = next;
        Ok(())
    }
}

impl<P: ConfigProvider, F: EngineFactory> TextToSpeech for Mimic3Plugin<P, F> {
    fn settings(&self) -> Result<Vec<SettingDescriptor>> {
        Ok(vec![SettingDescriptor {
            key: binder::VOICE_KEY.iter().map(|k| k.to_string()).collect(),
            kind: "listbox".to_string(),
            title: "Voice for Mimic 3 Text to Speech".to_string(),
            description: "This is the voice that will be used to speak to you".to_string(),
            options: self.voices(),
            default: binder::DEFAULT_VOICE.to_string(),
        }])
    }

    fn say(&mut self, phrase: &str, voice: Option<&str>) -> Result<Vec<u8>> {
        if let Some(voice) = voice.filter(|v| !v.is_empty()) {
            self.reconfigure(voice)?;
        }

        let text = normalize(phrase);
        log::debug!("Speaking {text:?} with {:?}", self.selection.id());
        let tokens = synthesize(&mut self.engine, &text)?;
        wav::package(&tokens)
    }
}
