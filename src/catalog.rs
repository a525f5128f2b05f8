use crate::{Result, SynthesisEngine, Voice};

/// Convert a locale code to the engine's form (`en-US` -> `en_US`).
pub fn engine_language(language: &str) -> String {
    language.replace('-', "_")
}

/// Flatten voices into selectable `key` / `key#speaker` identifiers.
///
/// When `language` is given only voices whose language code starts with it
/// are kept. Catalog order is preserved, and speakers keep their order
/// within each voice.
pub fn flatten_voices(voices: &[Voice], language: Option<&str>) -> Vec<String> {
    let prefix = language.map(engine_language);
    let mut output = Vec::new();

    for voice in voices {
        if let Some(prefix) = &prefix {
            if !voice.language.starts_with(prefix.as_str()) {
                continue;
            }
        }
        match &voice.speakers {
            None => output.push(voice.key.clone()),
            Some(speakers) => {
                output.extend(speakers.iter().map(|s| format!("{}#{s}", voice.key)));
            }
        }
    }

    output
}

/// Query the engine and return its flattened voice catalog.
pub fn list_voices<E: SynthesisEngine + ?Sized>(
    engine: &mut E,
    language: Option<&str>,
) -> Result<Vec<String>> {
    let voices = engine.get_voices()?;
    let output = flatten_voices(&voices, language);
    log::debug!(
        "Engine reported {} voices, {} entries for language {:?}",
        voices.len(),
        output.len(),
        language
    );
    Ok(output)
}
