//! Patient trajectory engine.
//!
//! EXECUTION ORDER per step k (fixed, never reordered):
//!   1. Liveness check (counts an alive step); stop at Death or k == n.
//!   2. Look up the current state's transition row.
//!   3. Sample the next state from this patient's own RNG stream.
//!   4. Hand the new state to the monitor (survival time, cost).
//!   5. k += 1.

use crate::{
    monitor::PatientStateMonitor,
    params::TherapyParameters,
    rng::PatientRng,
    types::{PatientId, Step},
};

pub struct Patient {
    id:      PatientId,
    rng:     PatientRng,
    monitor: PatientStateMonitor,
}

impl Patient {
    pub fn new(id: PatientId, params: &TherapyParameters) -> Self {
        Self {
            id,
            rng:     PatientRng::new(id),
            monitor: PatientStateMonitor::new(params),
        }
    }

    /// Simulate for at most `n_time_steps` annual cycles.
    pub fn simulate(&mut self, params: &TherapyParameters, n_time_steps: Step) {
        let mut k: Step = 0;

        // The liveness check goes first so it is counted even on the
        // iteration where the step budget runs out.
        while self.monitor.check_alive() && k < n_time_steps {
            let current = self.monitor.current_state();
            let Some(new_state) = params
                .transition_matrix
                .sample_next(current, &mut self.rng)
            else {
                break;
            };

            self.monitor.update(params, k, new_state);

            if new_state.is_absorbing() {
                log::debug!(
                    "patient={} died at step {k} (from {})",
                    self.id,
                    current.name()
                );
            }

            k += 1;
        }
    }

    pub fn id(&self) -> PatientId {
        self.id
    }

    pub fn monitor(&self) -> &PatientStateMonitor {
        &self.monitor
    }
}
