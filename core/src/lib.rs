//! Discrete-time Markov cohort simulation for comparing two therapies
//! by survival, disease-state trajectory and discounted cost.
//!
//! Data flow:
//!   SimConfig -> TherapyParameters -> Cohort -> N x Patient
//!   (each with its own PatientRng seeded by patient id)
//!   -> PatientStateMonitor -> CohortOutcomes -> PrevalencePath

pub mod cohort;
pub mod config;
pub mod econ;
pub mod error;
pub mod health;
pub mod monitor;
pub mod outcomes;
pub mod params;
pub mod patient;
pub mod prevalence;
pub mod rng;
pub mod summary;
pub mod types;
