//! Immutable per-therapy parameters.
//!
//! RULE: everything here is validated at construction. A Cohort can only
//! be built from a TherapyParameters, so no patient is ever simulated on
//! a malformed matrix or cost table.

use crate::{
    config::SimConfig,
    error::{SimError, SimResult},
    health::{HealthState, Therapy, NUM_HEALTH_STATES},
    rng::{Empirical, PatientRng, PROBABILITY_TOLERANCE},
};

/// Square matrix of annual transition probabilities, indexed by
/// HealthState. Each live row carries a prebuilt sampler; the Death
/// row (all zero or a distribution) carries none, so sampling out of
/// Death cannot happen.
#[derive(Debug, Clone)]
pub struct TransitionMatrix {
    rows: Vec<Vec<f64>>,
    distributions: Vec<Option<Empirical>>,
}

impl TransitionMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> SimResult<Self> {
        if rows.len() != NUM_HEALTH_STATES {
            return Err(SimError::MatrixShape {
                expected: NUM_HEALTH_STATES,
                actual:   rows.len(),
            });
        }

        let mut distributions = Vec::with_capacity(NUM_HEALTH_STATES);
        for (state, row) in HealthState::ALL.iter().copied().zip(rows.iter()) {
            if row.len() != NUM_HEALTH_STATES {
                return Err(SimError::RowLength {
                    state,
                    expected: NUM_HEALTH_STATES,
                    actual:   row.len(),
                });
            }
            if let Some((column, &value)) = row
                .iter()
                .enumerate()
                .find(|(_, p)| !p.is_finite() || **p < 0.0)
            {
                return Err(SimError::InvalidProbability { state, column, value });
            }

            let sum: f64 = row.iter().sum();
            if state.is_absorbing() {
                // All zero or a self-loop style distribution; never sampled.
                if sum != 0.0 && (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
                    return Err(SimError::InvalidDeathRow { sum });
                }
                distributions.push(None);
                continue;
            }
            if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
                return Err(SimError::RowSum { state, sum });
            }
            distributions.push(Some(Empirical::new(row)?));
        }

        Ok(Self { rows, distributions })
    }

    pub fn probability(&self, from: HealthState, to: HealthState) -> f64 {
        self.rows[from.index()][to.index()]
    }

    pub fn row(&self, from: HealthState) -> &[f64] {
        &self.rows[from.index()]
    }

    /// Draw the next state. Returns None from the absorbing state.
    pub fn sample_next(&self, from: HealthState, rng: &mut PatientRng) -> Option<HealthState> {
        self.distributions[from.index()]
            .as_ref()
            .map(|dist| HealthState::ALL[dist.sample(rng)])
    }
}

/// Everything one cohort needs to simulate a therapy.
#[derive(Debug, Clone)]
pub struct TherapyParameters {
    pub therapy:               Therapy,
    pub initial_state:         HealthState,
    pub transition_matrix:     TransitionMatrix,
    pub annual_state_costs:    [f64; NUM_HEALTH_STATES],
    pub annual_treatment_cost: f64,
    pub discount_rate:         f64,
}

impl TherapyParameters {
    /// Resolve the parameters of `therapy` from the simulation config.
    pub fn new(therapy: Therapy, config: &SimConfig) -> SimResult<Self> {
        Self::from_parts(
            therapy,
            config.transition_rows(therapy).to_vec(),
            &config.annual_state_costs,
            config.annual_treatment_cost(therapy),
            config.discount_rate,
        )
    }

    /// Build directly from raw tables. Patients always start in Remission.
    pub fn from_parts(
        therapy: Therapy,
        transition_rows: Vec<Vec<f64>>,
        annual_state_costs: &[f64],
        annual_treatment_cost: f64,
        discount_rate: f64,
    ) -> SimResult<Self> {
        if !(0.0..1.0).contains(&discount_rate) {
            return Err(SimError::InvalidDiscountRate(discount_rate));
        }
        if !annual_treatment_cost.is_finite() || annual_treatment_cost <= 0.0 {
            return Err(SimError::InvalidTreatmentCost {
                therapy,
                value: annual_treatment_cost,
            });
        }

        let annual_state_costs: [f64; NUM_HEALTH_STATES] = annual_state_costs
            .try_into()
            .map_err(|_| SimError::CostVectorLength {
                expected: NUM_HEALTH_STATES,
                actual:   annual_state_costs.len(),
            })?;
        for state in HealthState::ALL {
            let value = annual_state_costs[state.index()];
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::InvalidStateCost { state, value });
            }
        }

        Ok(Self {
            therapy,
            initial_state: HealthState::Remission,
            transition_matrix: TransitionMatrix::new(transition_rows)?,
            annual_state_costs,
            annual_treatment_cost,
            discount_rate,
        })
    }

    pub fn annual_state_cost(&self, state: HealthState) -> f64 {
        self.annual_state_costs[state.index()]
    }
}
