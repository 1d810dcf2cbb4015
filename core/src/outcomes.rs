//! Cohort-level aggregation of patient outcomes.
//!
//! This module is REACTIVE. It never simulates anything; it reduces a
//! set of finished patients into the vectors consumed by reporting,
//! plotting and cost-effectiveness tooling.

use crate::{
    patient::Patient,
    prevalence::PrevalencePath,
    summary::{DifferenceStat, SummaryStat},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortOutcomes {
    /// Survival times of patients who died within the horizon, in
    /// patient order. Survivors are right-censored and absent here.
    pub survival_times:     Vec<f64>,
    /// Discounted cost of every patient, in patient order.
    pub costs:              Vec<f64>,
    /// Alive-step count of every patient, in patient order.
    pub num_patients_alive: Vec<u64>,
    /// Number of living patients over time.
    pub n_living_patients:  PrevalencePath,
}

impl CohortOutcomes {
    /// Reduce a set of simulated patients.
    pub fn extract(patients: &[Patient]) -> Self {
        let mut survival_times = Vec::new();
        let mut costs = Vec::with_capacity(patients.len());
        let mut num_patients_alive = Vec::with_capacity(patients.len());

        for patient in patients {
            let monitor = patient.monitor();
            if let Some(t) = monitor.survival_time() {
                survival_times.push(t);
            }
            costs.push(monitor.total_discounted_cost());
            num_patients_alive.push(monitor.num_alive());
        }

        let n_living_patients = PrevalencePath::from_decrements(
            "# of living patients",
            patients.len() as i64,
            &survival_times,
        );

        log::debug!(
            "extracted outcomes: patients={} deaths={}",
            patients.len(),
            survival_times.len()
        );

        Self {
            survival_times,
            costs,
            num_patients_alive,
            n_living_patients,
        }
    }

    pub fn num_deaths(&self) -> usize {
        self.survival_times.len()
    }

    pub fn summaries(&self) -> OutcomeSummaries {
        let alive: Vec<f64> = self.num_patients_alive.iter().map(|&n| n as f64).collect();
        OutcomeSummaries {
            survival_time: SummaryStat::new("Survival time", &self.survival_times),
            cost:          SummaryStat::new("Discounted cost", &self.costs),
            alive:         SummaryStat::new("Number of patients alive", &alive),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeSummaries {
    pub survival_time: SummaryStat,
    pub cost:          SummaryStat,
    pub alive:         SummaryStat,
}

/// Incremental cost-effectiveness of the alternative therapy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Icer {
    /// Incremental cost per additional alive step. Always positive.
    Ratio(f64),
    /// Alternative is no more costly and more effective.
    Dominant,
    /// Alternative is no cheaper and less effective.
    Dominated,
    /// Effect difference is zero or undefined.
    Undefined,
}

impl Icer {
    pub fn from_increments(increase_cost: f64, increase_effect: f64) -> Self {
        if !increase_effect.is_finite() || !increase_cost.is_finite() || increase_effect == 0.0 {
            Icer::Undefined
        } else if increase_effect > 0.0 && increase_cost <= 0.0 {
            Icer::Dominant
        } else if increase_effect < 0.0 && increase_cost >= 0.0 {
            Icer::Dominated
        } else {
            Icer::Ratio(increase_cost / increase_effect)
        }
    }
}

/// Differences in mean outcomes of an alternative therapy relative to a
/// reference therapy, treating the two cohorts as independent samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparativeOutcomes {
    pub increase_survival_time: DifferenceStat,
    pub increase_cost:          DifferenceStat,
    pub increase_alive:         DifferenceStat,
    pub icer:                   Icer,
}

impl ComparativeOutcomes {
    pub fn between(reference: &CohortOutcomes, alternative: &CohortOutcomes) -> Self {
        let reference = reference.summaries();
        let alternative = alternative.summaries();

        let increase_survival_time = DifferenceStat::new(
            "Increase in mean survival time",
            &alternative.survival_time,
            &reference.survival_time,
        );
        let increase_cost = DifferenceStat::new(
            "Increase in mean discounted cost",
            &alternative.cost,
            &reference.cost,
        );
        let increase_alive = DifferenceStat::new(
            "Increase in mean number of patients alive",
            &alternative.alive,
            &reference.alive,
        );
        let icer = Icer::from_increments(increase_cost.mean, increase_alive.mean);

        Self {
            increase_survival_time,
            increase_cost,
            increase_alive,
            icer,
        }
    }
}
