use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Sample rate every engine client is pinned to.
pub const SAMPLE_RATE: u32 = 16000;

/// Settings an engine client is constructed with.
///
/// Empty `voice` or `speaker` means "use the engine's default".
///
/// ```
/// use mimic3_tts::Mimic3SettingsBuilder;
///
/// let settings = Mimic3SettingsBuilder::default()
///     .voice("en_US/cmu-arctic_low")
///     .speaker("slt")
///     .build()?;
/// assert_eq!(settings.sample_rate, 16000);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(default, build_fn(validate = "Self::validate"))]
pub struct Mimic3Settings {
    #[builder(setter(into))]
    pub voice: String,
    #[builder(setter(into))]
    pub speaker: String,
    pub sample_rate: u32,
}

impl Default for Mimic3Settings {
    fn default() -> Self {
        Self {
            voice: String::new(),
            speaker: String::new(),
            sample_rate: SAMPLE_RATE,
        }
    }
}

impl Mimic3Settings {
    /// The `voice#speaker` identifier the engine understands.
    pub fn voice_key(&self) -> String {
        if self.speaker.is_empty() {
            self.voice.clone()
        } else {
            format!("{}#{}", self.voice, self.speaker)
        }
    }
}

impl Mimic3SettingsBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.sample_rate {
            Some(0) => Err("sample_rate must be greater than zero".to_string()),
            _ => Ok(()),
        }
    }
}

/// Describes one user-facing option of the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingDescriptor {
    /// Key path of the option in the persisted configuration
    pub key: Vec<String>,
    /// Widget kind, e.g. `"listbox"`
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub options: Vec<String>,
    pub default: String,
}
