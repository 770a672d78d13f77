use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// How an over-long melody is reduced to the configured maximum size.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LimitMethod {
    /// Keep the first `max_size` entries, discard the tail.
    #[default]
    Truncate,
    /// Keep `max_size` evenly spaced entries across the whole melody.
    Downsample,
}

impl FromStr for LimitMethod {
    type Err = DomainError;

    fn from_str(selector: &str) -> Result<Self, DomainError> {
        match selector {
            "truncate" => Ok(LimitMethod::Truncate),
            "downsample" => Ok(LimitMethod::Downsample),
            other => Err(DomainError::unknown_selector(
                "limit method",
                other,
                "\"truncate\" or \"downsample\"",
            )),
        }
    }
}

impl std::fmt::Display for LimitMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LimitMethod::Truncate => f.write_str("truncate"),
            LimitMethod::Downsample => f.write_str("downsample"),
        }
    }
}

/// Parameters for one pipeline run, passed explicitly so concurrent runs
/// never share state.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct TranscriptionConfig {
    /// Beats per minute used for duration quantization.
    pub tempo_bpm: f64,
    /// Maximum output length; `None` means unlimited.
    pub max_size: Option<usize>,
    pub method: LimitMethod,
}

impl TranscriptionConfig {
    pub const DEFAULT_TEMPO_BPM: f64 = 120.0;

    pub fn new(
        tempo_bpm: f64,
        max_size: Option<usize>,
        method: LimitMethod,
    ) -> Result<Self, DomainError> {
        if !tempo_bpm.is_finite() || tempo_bpm <= 0.0 {
            return Err(DomainError::InvalidTempo(tempo_bpm));
        }
        Ok(Self {
            tempo_bpm,
            max_size,
            method,
        })
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            tempo_bpm: Self::DEFAULT_TEMPO_BPM,
            max_size: None,
            method: LimitMethod::Truncate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_validates_tempo() {
        assert!(TranscriptionConfig::new(0.0, None, LimitMethod::Truncate).is_err());
        assert!(TranscriptionConfig::new(-60.0, None, LimitMethod::Truncate).is_err());
        assert!(TranscriptionConfig::new(f64::NAN, None, LimitMethod::Truncate).is_err());
        assert!(TranscriptionConfig::new(120.0, Some(32), LimitMethod::Downsample).is_ok());
    }

    #[test]
    fn method_parses_known_selectors() {
        assert_eq!("truncate".parse::<LimitMethod>().unwrap(), LimitMethod::Truncate);
        assert_eq!(
            "downsample".parse::<LimitMethod>().unwrap(),
            LimitMethod::Downsample
        );
    }

    #[test]
    fn method_rejects_unknown_selector() {
        let err = "decimate".parse::<LimitMethod>().unwrap_err();
        assert!(matches!(err, DomainError::UnknownSelector { .. }));
        assert!(err.to_string().contains("decimate"));
    }

    #[test]
    fn tempo_error_carries_the_offending_value() {
        let err = TranscriptionConfig::new(-60.0, None, LimitMethod::Truncate).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTempo(bpm) if bpm == -60.0));
    }
}
