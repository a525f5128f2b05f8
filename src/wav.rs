use std::io::Cursor;

use crate::{AudioResult, Result, SynthesisToken, TtsError};

/// Format shared by every audio token of one utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub num_channels: u16,
    pub sample_width_bytes: u16,
    /// Per-channel frame rate, as written to the WAV header
    pub frame_rate: u32,
}

impl AudioFormat {
    /// Derive the container format from an audio token.
    ///
    /// The engine reports an aggregate sample rate, so the frame rate is
    /// `sample_rate_hz / num_channels`. Only formats that fit a plain PCM
    /// header (format tag 1) are accepted: 1 or 2 channels of 8 or 16 bits.
    pub fn from_audio(audio: &AudioResult) -> Result<Self> {
        if !(1..=2).contains(&audio.num_channels) {
            return Err(TtsError::UnsupportedFormat(format!(
                "{} channels",
                audio.num_channels
            )));
        }
        if !(1..=2).contains(&audio.sample_width_bytes) {
            return Err(TtsError::UnsupportedFormat(format!(
                "sample width of {} bytes",
                audio.sample_width_bytes
            )));
        }
        Ok(Self {
            num_channels: audio.num_channels,
            sample_width_bytes: audio.sample_width_bytes,
            frame_rate: audio.sample_rate_hz / u32::from(audio.num_channels),
        })
    }

    pub fn frame_size(&self) -> usize {
        usize::from(self.sample_width_bytes) * usize::from(self.num_channels)
    }

    fn wav_spec(&self) -> hound::WavSpec {
        hound::WavSpec {
            channels: self.num_channels,
            sample_rate: self.frame_rate,
            bits_per_sample: self.sample_width_bytes * 8,
            sample_format: hound::SampleFormat::Int,
        }
    }
}

/// Concatenate the audio tokens of an utterance into one WAV file.
///
/// Non-audio tokens are skipped. The first audio token fixes the format;
/// later tokens that disagree are still appended but logged. Returns an
/// empty vector when the stream holds no audio.
pub fn package(tokens: &[SynthesisToken]) -> Result<Vec<u8>> {
    let mut format: Option<AudioFormat> = None;
    let mut frames = Vec::new();

    for token in tokens {
        let SynthesisToken::Audio(audio) = token else {
            continue;
        };
        match format {
            None => format = Some(AudioFormat::from_audio(audio)?),
            Some(expected) => {
                if AudioFormat::from_audio(audio).ok() != Some(expected) {
                    log::warn!(
                        "Audio token format ({} ch, {} B, {} Hz) differs from the first token, \
                         treating it as {:?}",
                        audio.num_channels,
                        audio.sample_width_bytes,
                        audio.sample_rate_hz,
                        expected
                    );
                }
            }
        }
        frames.extend_from_slice(&audio.audio_bytes);
    }

    let Some(format) = format else {
        log::debug!("No audio tokens in utterance");
        return Ok(Vec::new());
    };
    if frames.is_empty() {
        return Ok(Vec::new());
    }

    encode(&frames, format)
}

/// Wrap raw little-endian PCM frames in a WAV container.
pub fn encode(frames: &[u8], format: AudioFormat) -> Result<Vec<u8>> {
    let frame_size = format.frame_size();
    let frame_count = frames.len() / frame_size;
    let usable = frame_count * frame_size;
    if usable != frames.len() {
        log::warn!(
            "Dropping {} trailing bytes that do not form a whole frame",
            frames.len() - usable
        );
    }

    let mut cursor = Cursor::new(Vec::with_capacity(usable + 45));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, format.wav_spec())?;
        let width = usize::from(format.sample_width_bytes);
        for sample in frames[..usable].chunks_exact(width) {
            match width {
                // 8-bit WAV data is unsigned, hound takes it signed
                1 => writer.write_sample((i16::from(sample[0]) - 128) as i8)?,
                _ => writer.write_sample(i16::from_le_bytes([sample[0], sample[1]]))?,
            }
        }
        writer.finalize()?;
    }

    let mut bytes = cursor.into_inner();
    if usable % 2 == 1 {
        // RIFF chunks are word aligned; the pad byte counts toward the RIFF size only
        bytes.push(0);
        let riff_size = (bytes.len() - 8) as u32;
        bytes[4..8].copy_from_slice(&riff_size.to_le_bytes());
    }

    log::debug!(
        "Packaged {frame_count} frames ({} ch, {} B, {} Hz)",
        format.num_channels,
        format.sample_width_bytes,
        format.frame_rate
    );
    Ok(bytes)
}

/// Read a PCM WAV file back into an audio token.
///
/// The returned `sample_rate_hz` is the aggregate rate across channels, as
/// the engine reports it.
pub fn decode(bytes: &[u8]) -> Result<AudioResult> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();
    if spec.sample_format != hound::SampleFormat::Int
        || spec.bits_per_sample % 8 != 0
        || !(8..=32).contains(&spec.bits_per_sample)
    {
        return Err(TtsError::UnsupportedFormat(format!(
            "{:?} samples of {} bits",
            spec.sample_format, spec.bits_per_sample
        )));
    }

    let width = usize::from(spec.bits_per_sample / 8);
    let mut audio_bytes = Vec::with_capacity(reader.len() as usize * width);
    for sample in reader.samples::<i32>() {
        let sample = sample?;
        match width {
            1 => audio_bytes.push((sample + 128) as u8),
            2 => audio_bytes.extend_from_slice(&(sample as i16).to_le_bytes()),
            _ => audio_bytes.extend_from_slice(&sample.to_le_bytes()[..width]),
        }
    }

    Ok(AudioResult {
        audio_bytes,
        num_channels: spec.channels,
        sample_width_bytes: spec.bits_per_sample / 8,
        sample_rate_hz: spec.sample_rate * u32::from(spec.channels),
    })
}
