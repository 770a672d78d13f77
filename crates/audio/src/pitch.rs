use std::sync::Arc;

use anyhow::{bail, Result};
use realfft::{RealFftPlanner, RealToComplex};
use tracing::debug;

use tonesketch_domain::PitchObservation;

/// Narrow seam for fundamental-frequency estimation so the transcription
/// core can be driven with synthetic observations in tests.
pub trait PitchDetector {
    /// Returns one observation per voiced frame, ordered by timestamp.
    /// Unvoiced/silent frames are filtered out before they reach the caller.
    fn detect(&mut self, samples: &[f32], sample_rate: u32) -> Result<Vec<PitchObservation>>;
}

/// FFT-based detector: Hann-windowed frames, band-limited magnitude peak,
/// parabolic refinement of the peak bin.
pub struct SpectralPitchDetector {
    fft: Arc<dyn RealToComplex<f32>>,
    frame_size: usize,
    hop_size: usize,
    window: Vec<f32>,
    min_frequency_hz: f32,
    max_frequency_hz: f32,
    /// Peak magnitude (normalized by frame size) below which a frame counts
    /// as unvoiced.
    min_peak_level: f32,
}

impl SpectralPitchDetector {
    /// # Panics
    ///
    /// Panics when `frame_size < 2` (no window can be built) or when
    /// `hop_size == 0` (the frame cursor would never advance).
    pub fn new(frame_size: usize, hop_size: usize) -> Self {
        assert!(frame_size >= 2, "frame size must be at least 2 samples");
        assert!(hop_size > 0, "hop size must be non-zero");
        let mut planner = RealFftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(frame_size);
        let window = (0..frame_size)
            .map(|i| {
                let x = i as f32 / (frame_size - 1) as f32;
                0.5 * (1.0 - (2.0 * std::f32::consts::PI * x).cos())
            })
            .collect();
        Self {
            fft,
            frame_size,
            hop_size,
            window,
            min_frequency_hz: 55.0,
            max_frequency_hz: 2000.0,
            min_peak_level: 0.01,
        }
    }
}

impl Default for SpectralPitchDetector {
    fn default() -> Self {
        Self::new(4096, 2048)
    }
}

impl PitchDetector for SpectralPitchDetector {
    fn detect(&mut self, samples: &[f32], sample_rate: u32) -> Result<Vec<PitchObservation>> {
        if samples.len() < self.frame_size {
            bail!(
                "audio too short for pitch analysis: {} samples, need at least {}",
                samples.len(),
                self.frame_size
            );
        }

        let bin_hz = sample_rate as f32 / self.frame_size as f32;
        let mut spectrum = self.fft.make_output_vec();
        let low_bin = ((self.min_frequency_hz / bin_hz).ceil() as usize).max(1);
        let high_bin = ((self.max_frequency_hz / bin_hz).floor() as usize)
            .min(spectrum.len().saturating_sub(2));

        let mut observations = Vec::new();
        for start in (0..=samples.len() - self.frame_size).step_by(self.hop_size) {
            let mut input: Vec<f32> = samples[start..start + self.frame_size]
                .iter()
                .zip(self.window.iter())
                .map(|(sample, window)| sample * window)
                .collect();
            self.fft.process(&mut input, &mut spectrum)?;

            let mut peak_bin = 0usize;
            let mut peak_level = 0.0f32;
            for (bin, value) in spectrum
                .iter()
                .enumerate()
                .take(high_bin + 1)
                .skip(low_bin)
            {
                let level = value.norm() / self.frame_size as f32;
                if level > peak_level {
                    peak_level = level;
                    peak_bin = bin;
                }
            }
            if peak_level < self.min_peak_level {
                // unvoiced frame, not observed
                continue;
            }

            let refined_bin = {
                let left = spectrum[peak_bin - 1].norm();
                let center = spectrum[peak_bin].norm();
                let right = spectrum[peak_bin + 1].norm();
                let denom = left - 2.0 * center + right;
                if denom.abs() > f32::EPSILON {
                    peak_bin as f32 + 0.5 * (left - right) / denom
                } else {
                    peak_bin as f32
                }
            };
            let frequency = refined_bin * bin_hz;
            observations.push(PitchObservation::new(
                frequency as f64,
                start as f64 / sample_rate as f64,
            ));
        }

        debug!(
            voiced_frames = observations.len(),
            sample_count = samples.len(),
            "pitch analysis complete"
        );
        Ok(observations)
    }
}
