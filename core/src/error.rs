use crate::health::{HealthState, Therapy};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    // ── Configuration errors ───────────────────────────────────
    #[error("Transition matrix must have {expected} rows, got {actual}")]
    MatrixShape { expected: usize, actual: usize },

    #[error("Transition row for {state:?} has {actual} columns, expected {expected}")]
    RowLength {
        state: HealthState,
        expected: usize,
        actual: usize,
    },

    #[error("Transition row for {state:?} sums to {sum}, expected 1.0")]
    RowSum { state: HealthState, sum: f64 },

    #[error("Transition row for {state:?} has invalid probability {value} in column {column}")]
    InvalidProbability {
        state: HealthState,
        column: usize,
        value: f64,
    },

    #[error("Transition row for Death must be all zero or sum to 1.0, sums to {sum}")]
    InvalidDeathRow { sum: f64 },

    #[error("Annual state cost vector must have {expected} entries, got {actual}")]
    CostVectorLength { expected: usize, actual: usize },

    #[error("Annual cost for {state:?} must be finite and non-negative, got {value}")]
    InvalidStateCost { state: HealthState, value: f64 },

    #[error("Annual treatment cost for {therapy:?} must be positive, got {value}")]
    InvalidTreatmentCost { therapy: Therapy, value: f64 },

    #[error("Discount rate must lie in [0, 1), got {0}")]
    InvalidDiscountRate(f64),

    #[error("Simulation length must be finite and non-negative, got {0}")]
    InvalidSimLength(f64),

    #[error("Significance level must lie in (0, 1), got {0}")]
    InvalidAlpha(f64),

    #[error("Population size must be positive")]
    EmptyPopulation,

    #[error("Patient ids of cohort {cohort} with {pop_size} patients overflow u64")]
    PatientIdOverflow { cohort: u64, pop_size: usize },

    // ── Sampling errors ────────────────────────────────────────
    #[error("Degenerate distribution: {reason}")]
    DegenerateDistribution { reason: String },
}

pub type SimResult<T> = Result<T, SimError>;
