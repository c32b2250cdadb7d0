//! Voting weight normalization

/// Normalize a weight set so it sums to 1.
///
/// A degenerate sum (zero, negative, or non-finite, which can happen once
/// every responder has been slashed to nothing) falls back to uniform
/// weighting instead of dividing by it.
pub fn normalize(weights: &[f64]) -> Vec<f64> {
    if weights.is_empty() {
        return Vec::new();
    }

    let sum: f64 = weights.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        return uniform(weights.len());
    }

    weights.iter().map(|w| w / sum).collect()
}

/// Equal weights for `n` voters.
pub fn uniform(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    vec![1.0 / n as f64; n]
}
