pub mod config;
pub mod error;
pub mod melody;
pub mod note;

pub use crate::config::{LimitMethod, TranscriptionConfig};
pub use crate::error::DomainError;
pub use crate::melody::{DurationBucket, PitchObservation, PlayedNote, QuantizedNote};
pub use crate::note::{NoteId, NoteSymbol, PitchClass};
