//! Health states and therapies.
//!
//! RULE: a state's discriminant IS its row/column index in the
//! transition matrix and the cost vector. Never reorder variants.

use serde::{Deserialize, Serialize};

pub const NUM_HEALTH_STATES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(usize)]
pub enum HealthState {
    Remission            = 0,
    Mild                 = 1,
    DrugResponsive       = 2,
    DrugDependent        = 3,
    DrugRefractory       = 4,
    Surgery              = 5,
    PostSurgeryRemission = 6,
    Death                = 7,
}

impl HealthState {
    /// Every state, in index order.
    pub const ALL: [HealthState; NUM_HEALTH_STATES] = [
        Self::Remission,
        Self::Mild,
        Self::DrugResponsive,
        Self::DrugDependent,
        Self::DrugRefractory,
        Self::Surgery,
        Self::PostSurgeryRemission,
        Self::Death,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Death is the only absorbing state.
    pub fn is_absorbing(self) -> bool {
        self == Self::Death
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Remission            => "remission",
            Self::Mild                 => "mild",
            Self::DrugResponsive       => "drug_responsive",
            Self::DrugDependent        => "drug_dependent",
            Self::DrugRefractory       => "drug_refractory",
            Self::Surgery              => "surgery",
            Self::PostSurgeryRemission => "post_surgery_remission",
            Self::Death                => "death",
        }
    }
}

/// The two compared therapies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Therapy {
    /// Aminosalicylate monotherapy.
    Aminosalicylate,
    /// Immunosuppressive therapy, given in combination with aminosalicylate.
    Immunosuppressive,
}

impl Therapy {
    pub const ALL: [Therapy; 2] = [Self::Aminosalicylate, Self::Immunosuppressive];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Aminosalicylate   => "Aminosalicylate Therapy",
            Self::Immunosuppressive => "Immunosuppressive Therapy",
        }
    }
}
