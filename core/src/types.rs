//! Shared primitive types used across the entire simulation.

/// A simulation time step. One step = one year.
pub type Step = u64;

/// A globally unique patient identifier. Also the seed of the
/// patient's private RNG stream.
pub type PatientId = u64;

/// The cohort identifier. Patient ids are derived from it.
pub type CohortId = u64;
