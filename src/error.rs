use crate::settings::Mimic3SettingsBuilderError;

#[derive(thiserror::Error, Debug)]
pub enum TtsError {
    #[error("Synthesis engine unavailable: {0}")]
    EngineUnavailable(String),
    #[error("Utterance protocol error: {0}")]
    Utterance(String),
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("Invalid engine settings: {0}")]
    Settings(#[from] Mimic3SettingsBuilderError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}

pub type Result<T> = std::result::Result<T, TtsError>;
