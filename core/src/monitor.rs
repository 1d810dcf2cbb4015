//! Per-patient outcome bookkeeping: health state, survival time,
//! alive-step count and discounted cost.
//!
//! RULE: once a patient is in Death, update() is a no-op. Survival time
//! is therefore written at most once and cost never moves again.

use crate::{
    econ::{half_cycle_period, pv_single_payment},
    health::HealthState,
    params::TherapyParameters,
    types::Step,
};

/// Half-cycle correction: transitions happen, on average, mid-step.
pub const HALF_CYCLE: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct PatientStateMonitor {
    current_state: HealthState,
    survival_time: Option<f64>,
    num_alive:     u64,
    cost_monitor:  PatientCostMonitor,
}

impl PatientStateMonitor {
    pub fn new(params: &TherapyParameters) -> Self {
        Self {
            current_state: params.initial_state,
            survival_time: None,
            num_alive:     0,
            cost_monitor:  PatientCostMonitor::default(),
        }
    }

    /// Move the patient to `new_state` during `step`.
    pub fn update(&mut self, params: &TherapyParameters, step: Step, new_state: HealthState) {
        if self.current_state.is_absorbing() {
            return;
        }

        if new_state.is_absorbing() {
            self.survival_time = Some(step as f64 + HALF_CYCLE);
        }

        self.cost_monitor
            .update(params, step, self.current_state, new_state);

        self.current_state = new_state;
    }

    /// Liveness check made before every step. Each check that finds the
    /// patient alive counts one alive step, including the final check
    /// that ends a run at the horizon.
    pub fn check_alive(&mut self) -> bool {
        if self.current_state.is_absorbing() {
            return false;
        }
        self.num_alive += 1;
        true
    }

    pub fn current_state(&self) -> HealthState {
        self.current_state
    }

    /// Time of death, half-cycle corrected. None if the patient was
    /// still alive at the horizon (right-censored).
    pub fn survival_time(&self) -> Option<f64> {
        self.survival_time
    }

    pub fn num_alive(&self) -> u64 {
        self.num_alive
    }

    pub fn total_discounted_cost(&self) -> f64 {
        self.cost_monitor.total_discounted_cost()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PatientCostMonitor {
    total_discounted_cost: f64,
}

impl PatientCostMonitor {
    /// Accrue the discounted cost of moving from `current` to `next` during `step`.
    pub fn update(
        &mut self,
        params: &TherapyParameters,
        step: Step,
        current: HealthState,
        next: HealthState,
    ) {
        let cost = step_cost(params, current, next);
        self.total_discounted_cost += pv_single_payment(
            cost,
            params.discount_rate / 2.0,
            half_cycle_period(step),
        );
    }

    pub fn total_discounted_cost(&self) -> f64 {
        self.total_discounted_cost
    }
}

/// Undiscounted cost of one step: the average of the two state costs
/// plus treatment, which stops half-way through the step if the patient dies.
pub fn step_cost(params: &TherapyParameters, current: HealthState, next: HealthState) -> f64 {
    let state_cost =
        0.5 * (params.annual_state_cost(current) + params.annual_state_cost(next));
    let treatment_cost = if next.is_absorbing() {
        0.5 * params.annual_treatment_cost
    } else {
        params.annual_treatment_cost
    };
    state_cost + treatment_cost
}
