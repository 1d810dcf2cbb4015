//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through PatientRng instances, one per patient,
//! seeded by the patient id. This means:
//!   - Two runs with the same cohort id and size are bit-identical.
//!   - Each patient's stream is reproducible in isolation, so patients
//!     can be simulated in any order (or concurrently) with the same result.

use crate::{
    error::{SimError, SimResult},
    types::PatientId,
};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// Allowed deviation of a probability vector's total from 1.0.
pub const PROBABILITY_TOLERANCE: f64 = 1e-4;

/// A deterministic RNG stream owned by a single patient.
pub struct PatientRng {
    pub patient_id: PatientId,
    inner: Pcg64Mcg,
}

impl PatientRng {
    pub fn new(patient_id: PatientId) -> Self {
        Self {
            patient_id,
            inner: Pcg64Mcg::seed_from_u64(patient_id),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Categorical distribution over outcomes `0..K`, sampled by inverse CDF.
#[derive(Debug, Clone)]
pub struct Empirical {
    cdf: Vec<f64>,
    /// Last outcome with positive mass. Absorbs rounding when the
    /// cumulative total lands a hair below the uniform draw.
    last_positive: usize,
}

impl Empirical {
    /// Build from a probability vector. Rejects empty vectors, negative or
    /// non-finite entries, and totals outside 1.0 ± PROBABILITY_TOLERANCE.
    pub fn new(probabilities: &[f64]) -> SimResult<Self> {
        if probabilities.is_empty() {
            return Err(SimError::DegenerateDistribution {
                reason: "empty probability vector".into(),
            });
        }

        let mut cdf = Vec::with_capacity(probabilities.len());
        let mut total = 0.0;
        let mut last_positive = None;
        for (i, &p) in probabilities.iter().enumerate() {
            if !p.is_finite() || p < 0.0 {
                return Err(SimError::DegenerateDistribution {
                    reason: format!("probability {p} at index {i}"),
                });
            }
            if p > 0.0 {
                last_positive = Some(i);
            }
            total += p;
            cdf.push(total);
        }

        let last_positive = last_positive.ok_or_else(|| SimError::DegenerateDistribution {
            reason: "all probabilities are zero".into(),
        })?;
        if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(SimError::DegenerateDistribution {
                reason: format!("probabilities sum to {total}"),
            });
        }

        Ok(Self { cdf, last_positive })
    }

    /// Number of outcomes.
    pub fn len(&self) -> usize {
        self.cdf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cdf.is_empty()
    }

    /// Draw one outcome index.
    pub fn sample(&self, rng: &mut PatientRng) -> usize {
        self.outcome_for(rng.next_f64())
    }

    /// Inverse CDF: the first outcome whose cumulative probability
    /// exceeds `u` (numpy's `searchsorted(side="right")`). Differs from a
    /// `cdf >= u` rule only when `u` lands exactly on a cumulative
    /// boundary. Zero-mass outcomes are never returned.
    fn outcome_for(&self, u: f64) -> usize {
        let j = self.cdf.partition_point(|&c| c <= u);
        j.min(self.last_positive)
    }
}
