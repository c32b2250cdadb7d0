//! Weighted consensus aggregation
//!
//! Folds the predictions that survived a round into one probability vector
//! and one class index. Vector length is fixed by the first responder; any
//! later responder disagreeing on it fails the round rather than silently
//! truncating.

use verdict_core::Prediction;

use crate::ConsensusError;

/// The agreed result of one round.
#[derive(Debug, Clone, PartialEq)]
pub struct Consensus {
    /// Class probabilities after weighted averaging, same length as every
    /// responder's vector.
    pub probability: Vec<f64>,
    /// Index of the most probable class. Ties resolve to the lowest index.
    pub prediction: usize,
}

/// Combine responder predictions under the given voting weights.
///
/// `weights` must be parallel to `predictions` and already normalized
/// (see [`crate::weights::normalize`]).
pub fn form_consensus(
    predictions: &[&Prediction],
    weights: &[f64],
) -> Result<Consensus, ConsensusError> {
    let probability = weighted_average(predictions, weights)?;
    let prediction = argmax(&probability).ok_or(ConsensusError::EmptyVector)?;

    Ok(Consensus {
        probability,
        prediction,
    })
}

/// Element-wise weighted average of responder probability vectors.
///
/// The first responder fixes the expected vector length.
pub fn weighted_average(
    predictions: &[&Prediction],
    weights: &[f64],
) -> Result<Vec<f64>, ConsensusError> {
    debug_assert_eq!(predictions.len(), weights.len());

    let first = predictions.first().ok_or(ConsensusError::NoPredictions)?;
    let expected = first.probability.len();
    if expected == 0 {
        return Err(ConsensusError::EmptyVector);
    }

    let mut combined = vec![0.0; expected];
    for (prediction, &weight) in predictions.iter().zip(weights) {
        if prediction.probability.len() != expected {
            return Err(ConsensusError::VectorLengthMismatch {
                expected,
                got: prediction.probability.len(),
            });
        }
        for (slot, p) in combined.iter_mut().zip(&prediction.probability) {
            *slot += weight * p;
        }
    }

    Ok(combined)
}

/// Index of the largest value, first occurrence winning ties.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in values.iter().enumerate() {
        match best {
            // Strictly greater, so an equal later value never displaces an
            // earlier one.
            Some((_, current)) if value > current => best = Some((index, value)),
            None => best = Some((index, value)),
            _ => {}
        }
    }
    best.map(|(index, _)| index)
}

/// Euclidean distance between two probability vectors.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Unweighted mean of responder self-reported accuracies.
pub fn mean_accuracy(predictions: &[&Prediction]) -> f64 {
    if predictions.is_empty() {
        return 0.0;
    }
    let total: f64 = predictions.iter().map(|p| p.model_accuracy).sum();
    total / predictions.len() as f64
}
