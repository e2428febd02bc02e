//! Shannon entropy over character frequencies

/// Base-2 Shannon entropy of `s`; 0 for the empty string.
///
/// Frequencies are accumulated and summed in first-occurrence order so the
/// floating-point result is reproducible bit for bit.
pub fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut counts: Vec<(char, usize)> = Vec::new();
    let mut total = 0usize;
    for c in s.chars() {
        total += 1;
        match counts.iter_mut().find(|(seen, _)| *seen == c) {
            Some((_, count)) => *count += 1,
            None => counts.push((c, 1)),
        }
    }

    let total = total as f64;
    let mut entropy = 0.0;
    for (_, count) in counts {
        let probability = count as f64 / total;
        entropy -= probability * probability.log2();
    }
    entropy
}
