use tonesketch_domain::LimitMethod;

/// Reduces a melody to at most `max_size` entries.
///
/// Returns the input unchanged when it already fits or when no maximum is
/// given. `Truncate` keeps the head of the recording; `Downsample` keeps
/// `max_size` evenly spaced entries (source index `i * len / max_size`),
/// which may skip short notes or repeat emphasis near indices that map
/// identically. Unknown selectors are unrepresentable here; they are
/// rejected when parsing [`LimitMethod`].
pub fn limit_len<T: Clone>(items: &[T], max_size: Option<usize>, method: LimitMethod) -> Vec<T> {
    let max = match max_size {
        Some(max) if max < items.len() => max,
        _ => return items.to_vec(),
    };
    match method {
        LimitMethod::Truncate => items[..max].to_vec(),
        LimitMethod::Downsample => (0..max)
            .map(|i| items[i * items.len() / max].clone())
            .collect(),
    }
}
