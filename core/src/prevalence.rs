//! Prevalence (survival) path: a step function of remaining population
//! size over time.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrevalencePath {
    pub name: String,
    initial_size: i64,
    /// (time, value) steps. The first point is always (0.0, initial_size);
    /// each later point is one distinct event time.
    points: Vec<(f64, i64)>,
}

impl PrevalencePath {
    /// Build the path from a batch of (time, increment) changes.
    /// Changes may arrive in any order; they are replayed by time, and
    /// changes sharing a time collapse into one step.
    pub fn batch_update(name: &str, initial_size: i64, changes: &[(f64, i64)]) -> Self {
        let mut ordered = changes.to_vec();
        ordered.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut points = vec![(0.0, initial_size)];
        let mut value = initial_size;
        for (time, increment) in ordered {
            value += increment;
            let same_time = points.len() > 1 && points.last().map(|p| p.0) == Some(time);
            if same_time {
                if let Some(last) = points.last_mut() {
                    last.1 = value;
                }
            } else {
                points.push((time, value));
            }
        }

        Self {
            name: name.to_string(),
            initial_size,
            points,
        }
    }

    /// One patient leaves the population at each of `times`.
    pub fn from_decrements(name: &str, initial_size: i64, times: &[f64]) -> Self {
        let changes: Vec<(f64, i64)> = times.iter().map(|&t| (t, -1)).collect();
        Self::batch_update(name, initial_size, &changes)
    }

    pub fn initial_size(&self) -> i64 {
        self.initial_size
    }

    pub fn points(&self) -> &[(f64, i64)] {
        &self.points
    }

    /// Value after every change at or before `time`.
    pub fn value_at(&self, time: f64) -> i64 {
        self.points
            .iter()
            .take_while(|(t, _)| *t <= time)
            .last()
            .map(|(_, v)| *v)
            .unwrap_or(self.initial_size)
    }

    pub fn final_value(&self) -> i64 {
        self.points
            .last()
            .map(|(_, v)| *v)
            .unwrap_or(self.initial_size)
    }
}
