use std::path::Path;

use serde_json::Value;

use crate::{Result, TtsError};

/// Read access to persisted configuration, addressed by key path.
pub trait ConfigProvider {
    /// Look up the value at `key_path`, if one is set.
    fn get(&self, key_path: &[&str]) -> Option<String>;

    /// Look up the value at `key_path`, falling back to `default`.
    fn get_or(&self, key_path: &[&str], default: &str) -> String {
        self.get(key_path).unwrap_or_else(|| default.to_string())
    }
}

/// Configuration backed by a JSON document.
///
/// Nested objects are walked one key per path element:
///
/// ```json
/// { "language": "en-US", "mimic3-tts": { "voice": "en_US/cmu-arctic_low#slt" } }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Profile {
    root: Value,
}

impl Profile {
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Load a profile from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let root: Value = serde_json::from_str(&content).map_err(|e| {
            TtsError::Config(format!("Failed to parse {}: {e}", path.display()))
        })?;
        if !root.is_object() {
            return Err(TtsError::Config(format!(
                "{}: top level must be an object",
                path.display()
            )));
        }
        log::debug!("Loaded profile from {}", path.display());
        Ok(Self { root })
    }
}

impl ConfigProvider for Profile {
    fn get(&self, key_path: &[&str]) -> Option<String> {
        let mut node = &self.root;
        for key in key_path {
            node = node.get(key)?;
        }
        match node {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn profile() -> Profile {
        Profile::from_value(json!({
            "language": "en-US",
            "mimic3-tts": { "voice": "en_US/cmu-arctic_low#rms", "speaker": null },
            "volume": 7
        }))
    }

    #[test]
    fn walks_nested_keys() {
        let profile = profile();
        assert_eq!(
            profile.get(&["mimic3-tts", "voice"]).as_deref(),
            Some("en_US/cmu-arctic_low#rms")
        );
        assert_eq!(profile.get(&["language"]).as_deref(), Some("en-US"));
    }

    #[test]
    fn missing_null_and_container_values_use_default() {
        let profile = profile();
        assert_eq!(profile.get_or(&["mimic3-tts", "speaker"], "slt"), "slt");
        assert_eq!(profile.get_or(&["mimic3-tts"], "none"), "none");
        assert_eq!(profile.get_or(&["nope", "voice"], "x"), "x");
    }

    #[test]
    fn scalars_are_returned_as_text() {
        assert_eq!(profile().get(&["volume"]).as_deref(), Some("7"));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"mimic3-tts": {{"voice": "en_UK/apope_low"}}}}"#).unwrap();

        let profile = Profile::load(file.path()).unwrap();
        assert_eq!(
            profile.get(&["mimic3-tts", "voice"]).as_deref(),
            Some("en_UK/apope_low")
        );
    }

    #[test]
    fn rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2").unwrap();
        assert!(matches!(
            Profile::load(file.path()),
            Err(TtsError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Profile::load(&dir.path().join("absent.json")),
            Err(TtsError::Io(_))
        ));
    }
}
