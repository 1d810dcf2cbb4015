//! Cohort orchestrator.
//!
//! RULES:
//!   - Patient ids are cohort_id * pop_size + index, so every patient in
//!     the process has its own seed, even across cohorts.
//!   - Patients never interact; each is run to completion on its own.
//!   - Aggregation happens exactly once, after every patient has finished.

use crate::{
    error::{SimError, SimResult},
    outcomes::CohortOutcomes,
    params::TherapyParameters,
    patient::Patient,
    types::{CohortId, PatientId, Step},
};

pub struct Cohort {
    pub id:           CohortId,
    initial_pop_size: usize,
    params:           TherapyParameters,
    patients:         Vec<Patient>,
    outcomes:         Option<CohortOutcomes>,
}

impl Cohort {
    pub fn new(id: CohortId, pop_size: usize, params: TherapyParameters) -> SimResult<Self> {
        if pop_size == 0 {
            return Err(SimError::EmptyPopulation);
        }

        let first_id = (pop_size as PatientId)
            .checked_mul(id)
            .filter(|first| first.checked_add(pop_size as PatientId - 1).is_some())
            .ok_or(SimError::PatientIdOverflow { cohort: id, pop_size })?;
        let patients = (0..pop_size)
            .map(|i| Patient::new(first_id + i as PatientId, &params))
            .collect();

        Ok(Self {
            id,
            initial_pop_size: pop_size,
            params,
            patients,
            outcomes: None,
        })
    }

    /// Run every patient for at most `n_time_steps`, then aggregate.
    /// Patients run once: later calls return the stored outcomes.
    pub fn simulate(&mut self, n_time_steps: Step) -> &CohortOutcomes {
        let Self { id, initial_pop_size, params, patients, outcomes } = self;
        if outcomes.is_some() {
            log::debug!("cohort={id}: already simulated, reusing outcomes");
        }
        outcomes.get_or_insert_with(|| {
            run_patients(*id, *initial_pop_size, params, patients, n_time_steps)
        })
    }

    pub fn initial_pop_size(&self) -> usize {
        self.initial_pop_size
    }

    pub fn params(&self) -> &TherapyParameters {
        &self.params
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    /// Outcomes of simulate(), once it has run.
    pub fn outcomes(&self) -> Option<&CohortOutcomes> {
        self.outcomes.as_ref()
    }
}

fn run_patients(
    id: CohortId,
    pop_size: usize,
    params: &TherapyParameters,
    patients: &mut [Patient],
    n_time_steps: Step,
) -> CohortOutcomes {
    log::info!(
        "cohort={id} therapy={:?}: simulating {pop_size} patients for {n_time_steps} steps",
        params.therapy
    );

    for patient in patients.iter_mut() {
        patient.simulate(params, n_time_steps);
    }

    let outcomes = CohortOutcomes::extract(patients);
    if outcomes.num_deaths() == 0 {
        log::warn!("cohort={id}: no deaths within {n_time_steps} steps, all survival times censored");
    }
    log::info!(
        "cohort={id} done: deaths={} alive_at_end={}",
        outcomes.num_deaths(),
        outcomes.n_living_patients.final_value()
    );
    outcomes
}
