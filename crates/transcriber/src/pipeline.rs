use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use tonesketch_audio::{AudioDecoder, PitchDetector, ScratchWav, SpectralPitchDetector};
use tonesketch_domain::{NoteId, PitchObservation, QuantizedNote, TranscriptionConfig};

use crate::classify::classify_frequency;
use crate::duration::elapsed_durations;
use crate::group::group_notes;
use crate::limit::limit_len;
use crate::quantize::quantize_melody;

/// The linear melody pipeline: classify, measure, group, quantize, limit.
///
/// Holds only its configuration, so independent instances can run in
/// parallel over different files with no coordination.
pub struct TranscriptionPipeline {
    config: TranscriptionConfig,
}

impl TranscriptionPipeline {
    pub fn new(config: TranscriptionConfig) -> Self {
        Self { config }
    }

    /// Decodes `path`, runs pitch detection, and transcribes the result.
    /// The decoded PCM lives in a scratch file that is removed on every
    /// exit path, including decode and detection failures.
    pub fn transcribe_file<P: AsRef<Path>>(&self, path: P) -> Result<Option<Vec<QuantizedNote>>> {
        let path_ref = path.as_ref();
        let scratch = ScratchWav::in_temp_dir();
        let decoded = AudioDecoder::decode_to_wav(path_ref, scratch.path())
            .with_context(|| format!("decode {:?}", path_ref))?;
        let mut detector = SpectralPitchDetector::default();
        let observations = detector
            .detect(&decoded.samples, decoded.sample_rate)
            .with_context(|| format!("pitch detection on {:?}", path_ref))?;
        self.transcribe(&observations)
    }

    /// Runs the core transformation over already-detected observations.
    /// Returns `None` when there is nothing to transcribe (zero voiced
    /// frames), which is an ordinary outcome rather than an error.
    #[instrument(skip(self, observations), fields(observation_count = observations.len()))]
    pub fn transcribe(
        &self,
        observations: &[PitchObservation],
    ) -> Result<Option<Vec<QuantizedNote>>> {
        if observations.is_empty() {
            info!("no voiced frames, nothing to transcribe");
            return Ok(None);
        }

        let notes: Vec<NoteId> = observations
            .iter()
            .map(|obs| classify_frequency(obs.frequency_hz))
            .collect::<Result<_, _>>()?;
        let timestamps: Vec<f64> = observations.iter().map(|obs| obs.timestamp_sec).collect();
        let durations = elapsed_durations(&timestamps);
        let melody = group_notes(&notes, &durations)?;
        info!(
            observed = observations.len(),
            grouped = melody.len(),
            "grouped melody"
        );
        let quantized = quantize_melody(&melody, self.config.tempo_bpm);
        let limited = limit_len(&quantized, self.config.max_size, self.config.method);
        if limited.len() < quantized.len() {
            info!(
                from = quantized.len(),
                to = limited.len(),
                method = %self.config.method,
                "limited melody size"
            );
        }
        Ok(Some(limited))
    }
}

impl Default for TranscriptionPipeline {
    fn default() -> Self {
        Self::new(TranscriptionConfig::default())
    }
}
