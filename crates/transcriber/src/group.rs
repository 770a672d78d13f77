use tonesketch_domain::{DomainError, NoteId, PlayedNote};

/// Merges runs of identical adjacent notes into single [`PlayedNote`]s with
/// summed durations, removing per-frame detection jitter. The result never
/// holds two consecutive entries with the same note.
///
/// Empty input is a caller contract violation; zero-length pitch extraction
/// must be handled upstream instead of reaching this stage.
pub fn group_notes(notes: &[NoteId], durations: &[f64]) -> Result<Vec<PlayedNote>, DomainError> {
    if notes.is_empty() || durations.is_empty() {
        return Err(DomainError::EmptySequence("note grouping"));
    }
    if notes.len() != durations.len() {
        return Err(DomainError::LengthMismatch {
            notes: notes.len(),
            durations: durations.len(),
        });
    }

    let mut melody = Vec::new();
    let mut running = PlayedNote::new(notes[0], durations[0]);
    for (&note, &duration) in notes[1..].iter().zip(&durations[1..]) {
        if note == running.note {
            running.duration_sec += duration;
        } else {
            melody.push(running);
            running = PlayedNote::new(note, duration);
        }
    }
    melody.push(running);
    Ok(melody)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn merges_adjacent_duplicates() {
        let notes = [NoteId::new(60), NoteId::new(60), NoteId::new(62)];
        let melody = group_notes(&notes, &[0.1, 0.2, 0.3]).unwrap();
        assert_eq!(melody.len(), 2);
        assert_eq!(melody[0].note, NoteId::new(60));
        assert_relative_eq!(melody[0].duration_sec, 0.3);
        assert_eq!(melody[1].note, NoteId::new(62));
        assert_relative_eq!(melody[1].duration_sec, 0.3);
    }

    #[test]
    fn idempotent_on_already_grouped_melody() {
        let notes = [NoteId::new(60), NoteId::new(62), NoteId::new(60)];
        let durations = [0.5, 0.25, 1.0];
        let melody = group_notes(&notes, &durations).unwrap();
        let renotes: Vec<NoteId> = melody.iter().map(|p| p.note).collect();
        let redurations: Vec<f64> = melody.iter().map(|p| p.duration_sec).collect();
        let regrouped = group_notes(&renotes, &redurations).unwrap();
        assert_eq!(regrouped, melody);
    }

    #[test]
    fn single_observation_passes_through() {
        let melody = group_notes(&[NoteId::new(72)], &[0.4]).unwrap();
        assert_eq!(melody, vec![PlayedNote::new(NoteId::new(72), 0.4)]);
    }

    #[test]
    fn rejects_empty_input() {
        let err = group_notes(&[], &[]).unwrap_err();
        assert!(matches!(err, DomainError::EmptySequence(_)));
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = group_notes(&[NoteId::new(60)], &[0.1, 0.2]).unwrap_err();
        assert!(matches!(
            err,
            DomainError::LengthMismatch {
                notes: 1,
                durations: 2
            }
        ));
    }
}
