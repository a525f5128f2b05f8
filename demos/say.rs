use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use mimic3_tts::{
    engines::mimic3::{Mimic3Client, DEFAULT_URL},
    Mimic3Plugin, Profile, TextToSpeech,
};

/// Usage: `say <phrase> [voice#speaker] [output.wav]`
///
/// Writes to stdout when no output path is given.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let phrase = args.next().ok_or("usage: say <phrase> [voice#speaker] [output.wav]")?;
    let voice = args.next().filter(|v| v != "-");
    let output = args.next().map(PathBuf::from);

    let profile = match std::env::var("MIMIC3_PROFILE") {
        Ok(path) => Profile::load(path.as_ref())?,
        Err(_) => Profile::default(),
    };
    let url = std::env::var("MIMIC3_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());

    let mut plugin = Mimic3Plugin::new(profile, Mimic3Client::factory(&url))?;
    eprintln!("Using voice {:?}", plugin.selection().id());

    let start = Instant::now();
    let wav = plugin.say(&phrase, voice.as_deref())?;
    eprintln!("Synthesized {} bytes in {:.2?}", wav.len(), start.elapsed());

    match output {
        Some(path) => {
            std::fs::write(&path, &wav)?;
            eprintln!("Saved to {}", path.display());
        }
        None => std::io::stdout().write_all(&wav)?,
    }
    Ok(())
}
