use std::str::FromStr;

use tonesketch_domain::{DomainError, NoteId, QuantizedNote};

/// Renders a note as the `pitches.h`-style constant a tone sketch expects,
/// e.g. `NOTE_A4` or `NOTE_CS5`.
pub fn note_constant(note: NoteId) -> Result<String, DomainError> {
    let symbol = note
        .symbol()
        .ok_or(DomainError::UnrenderableNote(note.semitone()))?;
    Ok(format!("NOTE_{}", symbol))
}

/// The melody as a C int array literal of note constants.
pub fn melody_array(melody: &[QuantizedNote]) -> Result<String, DomainError> {
    let constants = melody
        .iter()
        .map(|entry| note_constant(entry.note))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("int melody[] = {{ {} }};", constants.join(", ")))
}

/// The duration denominators as a C int array literal.
pub fn durations_array(melody: &[QuantizedNote]) -> String {
    let denominators: Vec<String> = melody
        .iter()
        .map(|entry| entry.bucket.denominator().to_string())
        .collect();
    format!("int durations[] = {{ {} }};", denominators.join(", "))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    CArray,
    Json,
}

impl ExportFormat {
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::CArray => "c-array",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = DomainError;

    fn from_str(selector: &str) -> Result<Self, DomainError> {
        match selector {
            "c-array" => Ok(ExportFormat::CArray),
            "json" => Ok(ExportFormat::Json),
            other => Err(DomainError::unknown_selector(
                "export format",
                other,
                "\"c-array\" or \"json\"",
            )),
        }
    }
}

pub trait MelodyExporter {
    fn export(&self, melody: &[QuantizedNote], format: ExportFormat)
        -> Result<Vec<u8>, DomainError>;
}

/// Emits the two array literals consumed by microcontroller tone sketches.
pub struct CArrayExporter;

impl MelodyExporter for CArrayExporter {
    fn export(
        &self,
        melody: &[QuantizedNote],
        format: ExportFormat,
    ) -> Result<Vec<u8>, DomainError> {
        match format {
            ExportFormat::CArray => {
                let text = format!("{}\n{}\n", melody_array(melody)?, durations_array(melody));
                Ok(text.into_bytes())
            }
            other => Err(DomainError::ExportFormatMismatch {
                exporter: "CArrayExporter",
                format: other.label(),
            }),
        }
    }
}

pub struct JsonExporter;

impl MelodyExporter for JsonExporter {
    fn export(
        &self,
        melody: &[QuantizedNote],
        format: ExportFormat,
    ) -> Result<Vec<u8>, DomainError> {
        match format {
            ExportFormat::Json => serde_json::to_vec_pretty(melody)
                .map_err(|err| DomainError::Serialization(err.to_string())),
            other => Err(DomainError::ExportFormatMismatch {
                exporter: "JsonExporter",
                format: other.label(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonesketch_domain::DurationBucket;

    fn sample_melody() -> Vec<QuantizedNote> {
        vec![
            QuantizedNote::new(NoteId::new(69), DurationBucket::Quarter),
            QuantizedNote::new(NoteId::new(73), DurationBucket::Eighth),
        ]
    }

    #[test]
    fn constants_follow_pitches_h_naming() {
        assert_eq!(note_constant(NoteId::new(69)).unwrap(), "NOTE_A4");
        assert_eq!(note_constant(NoteId::new(73)).unwrap(), "NOTE_CS5");
        assert_eq!(note_constant(NoteId::new(60)).unwrap(), "NOTE_C4");
    }

    #[test]
    fn unrenderable_note_is_an_error() {
        assert!(note_constant(NoteId::new(200)).is_err());
    }

    #[test]
    fn array_literals() {
        let melody = sample_melody();
        assert_eq!(
            melody_array(&melody).unwrap(),
            "int melody[] = { NOTE_A4, NOTE_CS5 };"
        );
        assert_eq!(durations_array(&melody), "int durations[] = { 4, 8 };");
    }

    #[test]
    fn c_array_export_contains_both_blocks() {
        let bytes = CArrayExporter
            .export(&sample_melody(), ExportFormat::CArray)
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("int melody[]"));
        assert!(text.contains("int durations[]"));
    }

    #[test]
    fn json_export_uses_numeric_buckets() {
        let bytes = JsonExporter
            .export(&sample_melody(), ExportFormat::Json)
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"bucket\": 4"));
    }

    #[test]
    fn exporters_reject_foreign_formats() {
        let err = CArrayExporter
            .export(&sample_melody(), ExportFormat::Json)
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::ExportFormatMismatch {
                exporter: "CArrayExporter",
                format: "json"
            }
        ));
        assert!(JsonExporter
            .export(&sample_melody(), ExportFormat::CArray)
            .is_err());
    }

    #[test]
    fn format_selector_parsing() {
        assert_eq!("c-array".parse::<ExportFormat>().unwrap(), ExportFormat::CArray);
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
