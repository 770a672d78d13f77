/// Converts observation timestamps into per-observation elapsed durations.
///
/// Entry `i` (for `i >= 1`) is `timestamps[i] - timestamps[i - 1]`. Entry 0
/// is the raw first timestamp, treating the recording as starting from
/// silence at time zero. That first entry is therefore not an interval
/// between observations; downstream grouping relies on this convention and
/// it is kept for compatibility with existing sketches.
pub fn elapsed_durations(timestamps: &[f64]) -> Vec<f64> {
    let mut durations = Vec::with_capacity(timestamps.len());
    let mut previous = 0.0;
    for &timestamp in timestamps {
        durations.push(timestamp - previous);
        previous = timestamp;
    }
    durations
}
