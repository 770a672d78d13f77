use tonesketch_domain::{DomainError, NoteId};

/// A4 in the MIDI-style semitone numbering.
const REFERENCE_NOTE: f64 = 69.0;
/// Frequency of A4 in Hz.
const REFERENCE_FREQUENCY_HZ: f64 = 440.0;

/// Maps a detected fundamental frequency to the nearest semitone.
///
/// Ties at exact quarter-tone boundaries round half-to-even so repeated runs
/// classify identically on every platform. The detector contract excludes
/// unvoiced frames, so a non-positive or non-finite frequency here is a
/// contract violation, not a condition to absorb.
pub fn classify_frequency(frequency_hz: f64) -> Result<NoteId, DomainError> {
    if !frequency_hz.is_finite() || frequency_hz <= 0.0 {
        return Err(DomainError::DegenerateFrequency(frequency_hz));
    }
    let semitone = REFERENCE_NOTE + 12.0 * (frequency_hz / REFERENCE_FREQUENCY_HZ).log2();
    Ok(NoteId::new(semitone.round_ties_even() as i32))
}
