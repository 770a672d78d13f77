use tonesketch_domain::{DurationBucket, PlayedNote, QuantizedNote};

/// Maps an elapsed duration to a note-length bucket at the given tempo.
///
/// Buckets are lower-bound inclusive: exactly 0.5 beats is a quarter note,
/// exactly 1.5 beats is still a half note, and anything longer than 1.5
/// beats becomes a whole note. Notes shorter than a sixteenth are not
/// dropped; they land in the sixteenth bucket. Each note is quantized
/// independently, with no cross-note smoothing.
pub fn quantize_duration(duration_sec: f64, tempo_bpm: f64) -> DurationBucket {
    let seconds_per_beat = 60.0 / tempo_bpm;
    let beats = duration_sec / seconds_per_beat;
    if beats > 1.5 {
        DurationBucket::Whole
    } else if beats >= 1.0 {
        DurationBucket::Half
    } else if beats >= 0.5 {
        DurationBucket::Quarter
    } else if beats >= 0.25 {
        DurationBucket::Eighth
    } else {
        DurationBucket::Sixteenth
    }
}

pub fn quantize_melody(melody: &[PlayedNote], tempo_bpm: f64) -> Vec<QuantizedNote> {
    melody
        .iter()
        .map(|played| {
            QuantizedNote::new(
                played.note,
                quantize_duration(played.duration_sec, tempo_bpm),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonesketch_domain::NoteId;

    // At 120 BPM one beat is 0.5 s.
    const TEMPO: f64 = 120.0;

    #[test]
    fn bucket_lower_bounds_are_inclusive() {
        assert_eq!(quantize_duration(0.75, TEMPO), DurationBucket::Half);
        assert_eq!(quantize_duration(0.25, TEMPO), DurationBucket::Quarter);
        assert_eq!(quantize_duration(0.125, TEMPO), DurationBucket::Eighth);
    }

    #[test]
    fn long_durations_become_whole_notes() {
        assert_eq!(quantize_duration(1.0, TEMPO), DurationBucket::Whole);
        assert_eq!(quantize_duration(10.0, TEMPO), DurationBucket::Whole);
    }

    #[test]
    fn one_beat_is_a_half_note() {
        assert_eq!(quantize_duration(0.5, TEMPO), DurationBucket::Half);
    }

    #[test]
    fn short_durations_collapse_to_sixteenth() {
        assert_eq!(quantize_duration(0.1, TEMPO), DurationBucket::Sixteenth);
        assert_eq!(quantize_duration(0.0, TEMPO), DurationBucket::Sixteenth);
    }

    #[test]
    fn tempo_scales_the_beat() {
        // At 60 BPM one beat is a full second.
        assert_eq!(quantize_duration(0.5, 60.0), DurationBucket::Quarter);
        assert_eq!(quantize_duration(2.0, 60.0), DurationBucket::Whole);
    }

    #[test]
    fn melody_quantizes_per_note() {
        let melody = [
            PlayedNote::new(NoteId::new(69), 0.1),
            PlayedNote::new(NoteId::new(81), 0.3),
        ];
        let quantized = quantize_melody(&melody, TEMPO);
        assert_eq!(quantized[0].bucket, DurationBucket::Sixteenth);
        assert_eq!(quantized[1].bucket, DurationBucket::Quarter);
    }
}
