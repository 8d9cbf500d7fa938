//! Shot sampling from a fixed probability vector.
//!
//! Sampling never touches the amplitudes, so repeated runs draw from the same
//! distribution.

use crate::api::{Result, SimError};
use crate::state::format_bitstring;
use rand::Rng;
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// Outcome bitstring -> number of times it was drawn.
pub type Counts = HashMap<String, usize>;

/// Inverse-CDF lookup: the smallest index whose cumulative probability
/// exceeds `r`.
///
/// If drift leaves the total below `r`, the last index with nonzero
/// probability is returned instead.
pub fn sample_index(probabilities: &[f64], r: f64) -> usize {
    let mut cumulative = 0.0;
    for (i, p) in probabilities.iter().enumerate() {
        cumulative += p;
        if r < cumulative {
            return i;
        }
    }
    probabilities
        .iter()
        .rposition(|&p| p > 0.0)
        .unwrap_or(probabilities.len().saturating_sub(1))
}

fn check_shots(shots: usize) -> Result<()> {
    if shots == 0 {
        return Err(SimError::InvalidShotCount(shots));
    }
    Ok(())
}

/// Sequential sampler driven by a caller-supplied RNG, reproducible when seeded.
pub fn sample_counts_with_rng<R: Rng + ?Sized>(
    probabilities: &[f64],
    num_qubits: usize,
    shots: usize,
    rng: &mut R,
) -> Result<Counts> {
    check_shots(shots)?;
    let mut counts = Counts::new();
    for _ in 0..shots {
        let idx = sample_index(probabilities, rng.r#gen::<f64>());
        *counts.entry(format_bitstring(idx, num_qubits)).or_insert(0) += 1;
    }
    debug!(shots, outcomes = counts.len(), "sampled sequentially");
    Ok(counts)
}

/// Parallel sampler. Each rayon worker fills its own map with its thread-local
/// RNG; the partial maps are merged once all shots are drawn.
pub fn sample_counts(probabilities: &[f64], num_qubits: usize, shots: usize) -> Result<Counts> {
    check_shots(shots)?;
    let counts = (0..shots)
        .into_par_iter()
        .fold(Counts::new, |mut acc, _| {
            let idx = sample_index(probabilities, rand::thread_rng().r#gen::<f64>());
            *acc.entry(format_bitstring(idx, num_qubits)).or_insert(0) += 1;
            acc
        })
        .reduce(Counts::new, merge_counts);
    debug!(shots, outcomes = counts.len(), "sampled in parallel");
    Ok(counts)
}

fn merge_counts(mut left: Counts, right: Counts) -> Counts {
    for (outcome, n) in right {
        *left.entry(outcome).or_insert(0) += n;
    }
    left
}
