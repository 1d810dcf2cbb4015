//! Shared builders for integration tests.
#![allow(dead_code)]

use markov_core::{
    health::{HealthState, Therapy, NUM_HEALTH_STATES},
    params::TherapyParameters,
};

/// Every live state stays put; Death row is all zero.
pub fn identity_rows() -> Vec<Vec<f64>> {
    HealthState::ALL
        .iter()
        .map(|s| {
            let mut row = vec![0.0; NUM_HEALTH_STATES];
            if !s.is_absorbing() {
                row[s.index()] = 1.0;
            }
            row
        })
        .collect()
}

/// Identity rows, except `from` moves to `to` with certainty.
pub fn rows_with_certain_move(moves: &[(HealthState, HealthState)]) -> Vec<Vec<f64>> {
    let mut rows = identity_rows();
    for (from, to) in moves {
        rows[from.index()] = vec![0.0; NUM_HEALTH_STATES];
        rows[from.index()][to.index()] = 1.0;
    }
    rows
}

pub fn state_costs(remission: f64, mild: f64) -> Vec<f64> {
    let mut costs = vec![0.0; NUM_HEALTH_STATES];
    costs[HealthState::Remission.index()] = remission;
    costs[HealthState::Mild.index()] = mild;
    costs
}

pub fn params(rows: Vec<Vec<f64>>, costs: &[f64], treatment: f64, discount: f64) -> TherapyParameters {
    TherapyParameters::from_parts(Therapy::Aminosalicylate, rows, costs, treatment, discount)
        .expect("valid test parameters")
}
