//! Client for a running Mimic 3 web server.
//!
//! Start the server with `mimic3-server` (it listens on port 59125 by
//! default). Voices are listed through `GET /api/voices` and text is
//! synthesized through `POST /api/tts`, which answers with a WAV file.
//!
//! ```rust,no_run
//! use mimic3_tts::engines::mimic3::Mimic3Client;
//! use mimic3_tts::{synthesize, Mimic3Settings, SynthesisEngine};
//!
//! let mut client = Mimic3Client::new("http://localhost:59125", &Mimic3Settings::default());
//! println!("{} voices", client.get_voices()?.len());
//!
//! let tokens = synthesize(&mut client, "hello world")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::Read;
use std::time::Duration;

use crate::{wav, Mimic3Settings, Result, SynthesisEngine, SynthesisToken, TtsError, Voice};

pub const DEFAULT_URL: &str = "http://localhost:59125";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Blocking HTTP client pinned to one voice and speaker.
pub struct Mimic3Client {
    agent: ureq::Agent,
    base_url: String,
    settings: Mimic3Settings,
    /// Text of the open utterance, `None` while idle
    pending: Option<String>,
}

impl Mimic3Client {
    pub fn new(base_url: &str, settings: &Mimic3Settings) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .build();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            settings: settings.clone(),
            pending: None,
        }
    }

    /// An engine factory producing clients for the server at `base_url`.
    pub fn factory(base_url: &str) -> impl Fn(&Mimic3Settings) -> Result<Mimic3Client> {
        let base_url = base_url.to_string();
        move |settings: &Mimic3Settings| -> Result<Mimic3Client> {
            Ok(Mimic3Client::new(&base_url, settings))
        }
    }

    pub fn settings(&self) -> &Mimic3Settings {
        &self.settings
    }

    fn request_speech(&self, text: &str) -> Result<Vec<u8>> {
        let url = format!("{}/api/tts", self.base_url);
        let mut request = self.agent.post(&url).set("Content-Type", "text/plain");
        let voice = self.settings.voice_key();
        if !voice.is_empty() {
            request = request.query("voice", &voice);
        }

        let response = request.send_string(text).map_err(unavailable)?;
        let mut body = Vec::new();
        response.into_reader().read_to_end(&mut body)?;
        log::debug!("Mimic 3 returned {} bytes for voice {voice:?}", body.len());
        Ok(body)
    }
}

fn unavailable(e: ureq::Error) -> TtsError {
    TtsError::EngineUnavailable(e.to_string())
}

impl SynthesisEngine for Mimic3Client {
    fn get_voices(&mut self) -> Result<Vec<Voice>> {
        let url = format!("{}/api/voices", self.base_url);
        let response = self.agent.get(&url).call().map_err(unavailable)?;
        let voices: Vec<Voice> = response
            .into_json()
            .map_err(|e| TtsError::EngineUnavailable(format!("Bad voice list: {e}")))?;
        Ok(voices)
    }

    fn begin_utterance(&mut self) -> Result<()> {
        if self.pending.is_some() {
            return Err(TtsError::Utterance(
                "an utterance is already open".to_string(),
            ));
        }
        self.pending = Some(String::new());
        Ok(())
    }

    fn speak_text(&mut self, text: &str) -> Result<()> {
        let pending = self
            .pending
            .as_mut()
            .ok_or_else(|| TtsError::Utterance("no utterance is open".to_string()))?;
        if !pending.is_empty() {
            pending.push(' ');
        }
        pending.push_str(text);
        Ok(())
    }

    fn end_utterance(&mut self) -> Result<Vec<SynthesisToken>> {
        let text = self
            .pending
            .take()
            .ok_or_else(|| TtsError::Utterance("no utterance is open".to_string()))?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let body = self.request_speech(&text)?;
        Ok(vec![SynthesisToken::Audio(wav::decode(&body)?)])
    }
}
