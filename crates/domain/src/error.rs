use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("note {0} is outside the renderable range")]
    UnrenderableNote(i32),
    #[error("{0} is not a note-length denominator")]
    InvalidDenominator(u8),
    #[error("tempo must be a positive finite BPM, got {0}")]
    InvalidTempo(f64),
    #[error("frequency must be positive and finite, got {0}")]
    DegenerateFrequency(f64),
    #[error("{0} requires a non-empty sequence")]
    EmptySequence(&'static str),
    #[error("sequence lengths differ: {notes} notes vs {durations} durations")]
    LengthMismatch { notes: usize, durations: usize },
    #[error("unknown {kind} {selector:?}, expected {expected}")]
    UnknownSelector {
        kind: &'static str,
        selector: String,
        expected: &'static str,
    },
    #[error("{exporter} cannot produce {format} output")]
    ExportFormatMismatch {
        exporter: &'static str,
        format: &'static str,
    },
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl DomainError {
    pub fn unknown_selector<T: Into<String>>(
        kind: &'static str,
        selector: T,
        expected: &'static str,
    ) -> Self {
        Self::UnknownSelector {
            kind,
            selector: selector.into(),
            expected,
        }
    }
}
