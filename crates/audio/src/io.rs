use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{info, warn};

/// Container extensions the compiled-in symphonia features can handle:
/// mp3, wav, flac, isomp4 (m4a/mp4), aac, plus ogg from the defaults.
pub const SUPPORTED_EXTENSIONS: [&str; 8] =
    ["mp3", "wav", "flac", "ogg", "oga", "m4a", "mp4", "aac"];

pub fn is_supported_input<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.iter().any(|known| *known == ext)
        })
        .unwrap_or(false)
}

/// Decoded PCM, already mixed down to one channel.
#[derive(Clone, Debug)]
pub struct DecodedAudio {
    pub sample_rate: u32,
    pub samples: Vec<f32>,
}

pub struct AudioDecoder;

impl AudioDecoder {
    /// Decodes a compressed audio file, writes the mono PCM to `dest` as a
    /// 32-bit float WAV, and returns the samples for analysis.
    pub fn decode_to_wav<P: AsRef<Path>, Q: AsRef<Path>>(
        input: P,
        dest: Q,
    ) -> Result<DecodedAudio> {
        let decoded = Self::decode(input)?;
        Self::write_wav(&decoded, dest.as_ref())?;
        Ok(decoded)
    }

    fn decode<P: AsRef<Path>>(path: P) -> Result<DecodedAudio> {
        let path_ref = path.as_ref();
        let file =
            File::open(path_ref).with_context(|| format!("open audio file {:?}", path_ref))?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());
        let mut hint = Hint::new();
        if let Some(ext) = path_ref.extension().and_then(|ext| ext.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .with_context(|| format!("probe audio container {:?}", path_ref))?;
        let mut format = probed.format;
        let track = format
            .default_track()
            .ok_or_else(|| anyhow::anyhow!("no default track found in {:?}", path_ref))?;
        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .context("instantiate audio decoder")?;
        let sample_rate = track.codec_params.sample_rate.unwrap_or(48_000);

        let mut interleaved: Vec<f32> = Vec::new();
        let mut channels = 1usize;
        loop {
            match format.next_packet() {
                Ok(packet) => {
                    let buffer = decoder.decode(&packet)?;
                    let spec = *buffer.spec();
                    channels = spec.channels.count().max(1);
                    let mut out = SampleBuffer::<f32>::new(buffer.frames() as u64, spec);
                    out.copy_interleaved_ref(buffer);
                    interleaved.extend_from_slice(out.samples());
                }
                Err(err) => {
                    use symphonia::core::errors::Error as SymphError;
                    match err {
                        SymphError::IoError(e)
                            if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                        {
                            break;
                        }
                        SymphError::DecodeError(_) => {
                            // skip undecodable packet
                        }
                        _ => return Err(err.into()),
                    }
                }
            }
        }

        let samples = mix_to_mono(&interleaved, channels);
        info!(
            sample_rate,
            channels,
            sample_count = samples.len(),
            "decoded {:?}",
            path_ref
        );
        Ok(DecodedAudio {
            sample_rate,
            samples,
        })
    }

    fn write_wav(audio: &DecodedAudio, dest: &Path) -> Result<()> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: audio.sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(dest, spec)
            .with_context(|| format!("create decoded PCM file {:?}", dest))?;
        for &sample in &audio.samples {
            writer.write_sample(sample)?;
        }
        writer.finalize().context("finalize decoded PCM file")?;
        Ok(())
    }
}

fn mix_to_mono(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

static SCRATCH_SEQ: AtomicU64 = AtomicU64::new(0);

/// Temporary home for the decoded PCM artifact. Removal happens on drop so
/// every exit path of a pipeline run cleans up; failure to remove is logged
/// and otherwise ignored.
pub struct ScratchWav {
    path: PathBuf,
}

impl ScratchWav {
    pub fn in_temp_dir() -> Self {
        let seq = SCRATCH_SEQ.fetch_add(1, Ordering::Relaxed);
        let name = format!("tonesketch-{}-{}.wav", std::process::id(), seq);
        Self {
            path: std::env::temp_dir().join(name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchWav {
    fn drop(&mut self) {
        if self.path.exists() {
            if let Err(err) = std::fs::remove_file(&self.path) {
                warn!("failed to remove scratch file {:?}: {}", self.path, err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoder_handles_missing_file() {
        let result = AudioDecoder::decode_to_wav("does-not-exist.mp3", "unused.wav");
        assert!(result.is_err());
    }

    #[test]
    fn extension_allow_list() {
        assert!(is_supported_input("melody.mp3"));
        assert!(is_supported_input("melody.WAV"));
        assert!(is_supported_input("melody.m4a"));
        assert!(!is_supported_input("melody.txt"));
        assert!(!is_supported_input("melody"));
    }

    #[test]
    fn mixdown_averages_channels() {
        let mono = mix_to_mono(&[0.5, -0.5, 1.0, 0.0], 2);
        assert_eq!(mono, vec![0.0, 0.5]);
    }

    #[test]
    fn scratch_paths_are_unique() {
        let a = ScratchWav::in_temp_dir();
        let b = ScratchWav::in_temp_dir();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn scratch_removes_file_on_drop() {
        let scratch = ScratchWav::in_temp_dir();
        let path = scratch.path().to_path_buf();
        std::fs::write(&path, b"pcm").unwrap();
        drop(scratch);
        assert!(!path.exists());
    }
}
