use serde::{Deserialize, Serialize};

use crate::note::NoteId;
use crate::DomainError;

/// One voiced analysis frame from the pitch detector.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct PitchObservation {
    /// Estimated fundamental frequency in Hz.
    pub frequency_hz: f64,
    /// Seconds from the start of the recording.
    pub timestamp_sec: f64,
}

impl PitchObservation {
    pub fn new(frequency_hz: f64, timestamp_sec: f64) -> Self {
        Self {
            frequency_hz,
            timestamp_sec,
        }
    }
}

/// One played note after adjacent-duplicate merging.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlayedNote {
    pub note: NoteId,
    pub duration_sec: f64,
}

impl PlayedNote {
    pub fn new(note: NoteId, duration_sec: f64) -> Self {
        Self { note, duration_sec }
    }
}

/// Canonical note-length denominator: 1 is a whole note, 16 a sixteenth.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "u8", try_from = "u8")]
pub enum DurationBucket {
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
}

impl DurationBucket {
    pub fn denominator(self) -> u8 {
        match self {
            DurationBucket::Whole => 1,
            DurationBucket::Half => 2,
            DurationBucket::Quarter => 4,
            DurationBucket::Eighth => 8,
            DurationBucket::Sixteenth => 16,
        }
    }
}

impl From<DurationBucket> for u8 {
    fn from(bucket: DurationBucket) -> u8 {
        bucket.denominator()
    }
}

impl TryFrom<u8> for DurationBucket {
    type Error = DomainError;

    fn try_from(denominator: u8) -> Result<Self, DomainError> {
        match denominator {
            1 => Ok(DurationBucket::Whole),
            2 => Ok(DurationBucket::Half),
            4 => Ok(DurationBucket::Quarter),
            8 => Ok(DurationBucket::Eighth),
            16 => Ok(DurationBucket::Sixteenth),
            other => Err(DomainError::InvalidDenominator(other)),
        }
    }
}

/// Final pipeline output entry: a note with its quantized length.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct QuantizedNote {
    pub note: NoteId,
    pub bucket: DurationBucket,
}

impl QuantizedNote {
    pub fn new(note: NoteId, bucket: DurationBucket) -> Self {
        Self { note, bucket }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_denominators() {
        assert_eq!(DurationBucket::Whole.denominator(), 1);
        assert_eq!(DurationBucket::Sixteenth.denominator(), 16);
    }

    #[test]
    fn bucket_from_denominator() {
        assert_eq!(DurationBucket::try_from(4).unwrap(), DurationBucket::Quarter);
        assert!(matches!(
            DurationBucket::try_from(3).unwrap_err(),
            DomainError::InvalidDenominator(3)
        ));
        assert!(DurationBucket::try_from(32).is_err());
    }

    #[test]
    fn quantized_note_serializes_bucket_as_number() {
        let note = QuantizedNote::new(NoteId::new(69), DurationBucket::Eighth);
        let json = serde_json::to_string(&note).unwrap();
        assert_eq!(json, r#"{"note":69,"bucket":8}"#);
    }
}
