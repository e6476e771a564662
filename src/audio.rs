use crate::config::NarrationConfig;
use anyhow::{Context, Result};
use hound;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::warn;

/// Narration asset with its duration measured from the decoded samples.
#[derive(Debug, Clone)]
pub struct NarrationAudio {
    pub path: PathBuf,
    pub duration: f32,
}

impl NarrationAudio {
    /// Probe an audio file; duration comes from the asset, never estimated.
    pub fn probe(path: &Path) -> Result<Self> {
        let (samples, sample_rate, channels) = AudioDecoder::decode(path)?;
        anyhow::ensure!(
            sample_rate > 0 && channels > 0,
            "Audio file has no sample rate or channels: {}",
            path.display()
        );

        let duration = samples.len() as f32 / (sample_rate * channels) as f32;
        Ok(Self {
            path: path.to_path_buf(),
            duration,
        })
    }
}

/// Decodes audio files into raw samples (f32, interleaved)
pub struct AudioDecoder;

impl AudioDecoder {
    /// Decode an audio file to a vector of samples (f32)
    /// Returns (samples, sample_rate, channels)
    pub fn decode(path: &Path) -> Result<(Vec<f32>, u32, u32)> {
        let src = File::open(path).context("Failed to open audio file")?;
        let mss = MediaSourceStream::new(Box::new(src), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let meta_opts: MetadataOptions = Default::default();
        let fmt_opts: FormatOptions = Default::default();

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &fmt_opts, &meta_opts)
            .context("Unsupported audio format")?;

        let mut format = probed.format;
        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .context("No supported audio track found")?;

        let dec_opts: DecoderOptions = Default::default();
        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &dec_opts)
            .context("Unsupported codec")?;

        let track_id = track.id;
        let sample_rate = track.codec_params.sample_rate.unwrap_or(44100);
        let channels = track.codec_params.channels.unwrap_or_default().count() as u32;

        let mut all_samples = Vec::new();

        while let Ok(packet) = format.next_packet() {
            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => {
                    let mut sample_buf =
                        SampleBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec());
                    sample_buf.copy_interleaved_ref(decoded);
                    all_samples.extend_from_slice(sample_buf.samples());
                }
                Err(e) => {
                    warn!("Error decoding packet: {}", e);
                    break;
                }
            }
        }

        Ok((all_samples, sample_rate, channels))
    }
}

/// Text-to-speech boundary: text in, WAV asset with known duration out.
pub trait NarrationSynthesizer: Send + Sync {
    fn synthesize(&self, text: &str, out_path: &Path) -> Result<NarrationAudio>;
}

/// Piper-style command line adapter.
///
/// The script is piped to stdin and the engine writes a WAV file to the
/// requested path.
pub struct CommandSynthesizer {
    command: String,
    args: Vec<String>,
}

impl CommandSynthesizer {
    pub fn new(config: &NarrationConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
        }
    }
}

impl NarrationSynthesizer for CommandSynthesizer {
    fn synthesize(&self, text: &str, out_path: &Path) -> Result<NarrationAudio> {
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .arg("--output_file")
            .arg(out_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to spawn TTS command '{}'", self.command))?;

        child
            .stdin
            .as_mut()
            .context("Failed to open TTS stdin")?
            .write_all(text.as_bytes())?;

        let status = child.wait()?;
        if !status.success() {
            anyhow::bail!("TTS command '{}' returned non-zero", self.command);
        }

        NarrationAudio::probe(out_path)
    }
}

/// Copy the leading `duration` seconds of a WAV file to a new path.
pub fn trim_wav(input: &Path, duration: f32, out_path: &Path) -> Result<NarrationAudio> {
    let mut reader = hound::WavReader::open(input)
        .with_context(|| format!("Failed to open WAV: {}", input.display()))?;
    let spec = reader.spec();

    let keep = (duration * spec.sample_rate as f32) as usize * spec.channels as usize;
    let mut writer =
        hound::WavWriter::create(out_path, spec).context("Failed to create WAV writer")?;

    let mut written = 0usize;
    match spec.sample_format {
        hound::SampleFormat::Float => {
            for sample in reader.samples::<f32>().take(keep) {
                writer.write_sample(sample?)?;
                written += 1;
            }
        }
        hound::SampleFormat::Int => {
            for sample in reader.samples::<i32>().take(keep) {
                writer.write_sample(sample?)?;
                written += 1;
            }
        }
    }

    writer.finalize().context("Failed to finalize WAV file")?;

    let frames = written as f32 / spec.channels as f32;
    Ok(NarrationAudio {
        path: out_path.to_path_buf(),
        duration: frames / spec.sample_rate as f32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    pub fn write_test_wav(path: &Path, seconds: f32) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        let total = (seconds * spec.sample_rate as f32) as usize;
        for i in 0..total {
            // Quiet sine so the file holds real signal, not just zeros.
            let t = i as f32 / spec.sample_rate as f32;
            let sample = ((t * 440.0 * std::f32::consts::TAU).sin() * 2000.0) as i16;
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_probe_duration_from_asset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("narration.wav");
        write_test_wav(&path, 1.5);

        let audio = NarrationAudio::probe(&path).unwrap();
        assert!((audio.duration - 1.5).abs() < 0.01, "got {}", audio.duration);
    }

    #[test]
    fn test_probe_missing_file() {
        assert!(NarrationAudio::probe(Path::new("/nonexistent.wav")).is_err());
    }

    #[test]
    fn test_trim_wav_shortens() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("full.wav");
        let output = dir.path().join("trimmed.wav");
        write_test_wav(&input, 2.0);

        let trimmed = trim_wav(&input, 0.75, &output).unwrap();
        assert!((trimmed.duration - 0.75).abs() < 0.01);

        let probed = NarrationAudio::probe(&output).unwrap();
        assert!((probed.duration - 0.75).abs() < 0.01);
    }

    #[test]
    fn test_trim_wav_past_end_keeps_everything() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("full.wav");
        let output = dir.path().join("trimmed.wav");
        write_test_wav(&input, 0.5);

        let trimmed = trim_wav(&input, 10.0, &output).unwrap();
        assert!((trimmed.duration - 0.5).abs() < 0.01);
    }
}
