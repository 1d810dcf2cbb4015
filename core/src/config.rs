use crate::{
    error::{SimError, SimResult},
    health::Therapy,
    params::TherapyParameters,
    types::Step,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TherapyConfig {
    /// Annual cost of this therapy's own drug.
    pub annual_drug_cost: f64,
    /// Therapy-specific transition matrix. When absent the shared
    /// matrix applies.
    #[serde(default)]
    pub transition_matrix: Option<Vec<Vec<f64>>>,
}

#[derive(Debug, Clone, Deserialize)]
struct SimulationFile {
    pop_size: usize,
    sim_length: f64,
    alpha: f64,
    discount_rate: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct TransitionMatrixFile {
    rows: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
struct StateCostsFile {
    annual_state_costs: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct TherapyCostsFile {
    aminosalicylate: TherapyConfig,
    immunosuppressive: TherapyConfig,
}

#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Patients per cohort.
    pub pop_size: usize,
    /// Simulation horizon in years. May be fractional.
    pub sim_length: f64,
    /// Significance level for reported intervals.
    pub alpha: f64,
    /// Annual discount rate.
    pub discount_rate: f64,
    pub transition_matrix: Vec<Vec<f64>>,
    pub annual_state_costs: Vec<f64>,
    pub aminosalicylate: TherapyConfig,
    pub immunosuppressive: TherapyConfig,
}

impl SimConfig {
    /// Load from the data/ directory and validate.
    /// In tests, use SimConfig::builtin().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let sim_path = format!("{data_dir}/simulation.json");
        let sim_content = std::fs::read_to_string(&sim_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {sim_path}: {e}"))?;
        let sim_file: SimulationFile = serde_json::from_str(&sim_content)?;

        let matrix_path = format!("{data_dir}/transitions/transition_matrix.json");
        let matrix_content = std::fs::read_to_string(&matrix_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {matrix_path}: {e}"))?;
        let matrix_file: TransitionMatrixFile = serde_json::from_str(&matrix_content)?;

        let state_cost_path = format!("{data_dir}/costs/state_costs.json");
        let state_cost_content = std::fs::read_to_string(&state_cost_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {state_cost_path}: {e}"))?;
        let state_cost_file: StateCostsFile = serde_json::from_str(&state_cost_content)?;

        let therapy_path = format!("{data_dir}/costs/therapy_costs.json");
        let therapy_content = std::fs::read_to_string(&therapy_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {therapy_path}: {e}"))?;
        let therapy_file: TherapyCostsFile = serde_json::from_str(&therapy_content)?;

        let config = Self {
            pop_size: sim_file.pop_size,
            sim_length: sim_file.sim_length,
            alpha: sim_file.alpha,
            discount_rate: sim_file.discount_rate,
            transition_matrix: matrix_file.rows,
            annual_state_costs: state_cost_file.annual_state_costs,
            aminosalicylate: therapy_file.aminosalicylate,
            immunosuppressive: therapy_file.immunosuppressive,
        };
        config.validate()?;
        log::info!("Loaded simulation inputs from {data_dir}");
        Ok(config)
    }

    /// Reference inputs for the Crohn's disease therapy comparison.
    pub fn builtin() -> Self {
        Self {
            pop_size: 1000,
            sim_length: 2.0 / 12.0, // two months
            alpha: 0.05,
            discount_rate: 0.05,
            transition_matrix: vec![
                vec![0.89688, 0.07016, 0.00939, 0.00639, 0.00363, 0.00793, 0.00395, 0.00167], // remission
                vec![0.05751, 0.90952, 0.00829, 0.00619, 0.00968, 0.00585, 0.00281, 0.00015], // mild
                vec![0.25261, 0.22170, 0.41262, 0.02563, 0.00817, 0.04569, 0.02733, 0.00626], // drug-responsive
                vec![0.05274, 0.03484, 0.00193, 0.88626, 0.00592, 0.01071, 0.00543, 0.00217], // drug-dependent
                vec![0.06174, 0.05888, 0.00392, 0.02599, 0.74207, 0.06435, 0.03466, 0.00839], // drug-refractory
                vec![0.00657, 0.06906, 0.00801, 0.03421, 0.02397, 0.33714, 0.52022, 0.00082], // surgery
                vec![0.00054, 0.00849, 0.00100, 0.00152, 0.00096, 0.00436, 0.98126, 0.00187], // post-surgery remission
                vec![0.0; 8],                                                                 // death
            ],
            annual_state_costs: vec![
                4849.0,  // remission
                11467.0, // mild
                1147.0,  // drug-responsive
                1938.0,  // drug-dependent
                2062.0,  // drug-refractory
                17526.0, // surgery
                916.0,   // post-surgery remission
                0.0,     // death
            ],
            aminosalicylate: TherapyConfig {
                annual_drug_cost: 11467.0,
                transition_matrix: None,
            },
            immunosuppressive: TherapyConfig {
                annual_drug_cost: 5147.0,
                transition_matrix: None,
            },
        }
    }

    /// Run every configuration check. Building the parameters of both
    /// therapies validates the matrices and cost tables.
    pub fn validate(&self) -> SimResult<()> {
        if self.pop_size == 0 {
            return Err(SimError::EmptyPopulation);
        }
        if !self.sim_length.is_finite() || self.sim_length < 0.0 {
            return Err(SimError::InvalidSimLength(self.sim_length));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(SimError::InvalidAlpha(self.alpha));
        }
        for therapy in Therapy::ALL {
            let drug_cost = self.therapy(therapy).annual_drug_cost;
            if !drug_cost.is_finite() || drug_cost <= 0.0 {
                return Err(SimError::InvalidTreatmentCost {
                    therapy,
                    value: drug_cost,
                });
            }
            TherapyParameters::new(therapy, self)?;
        }
        Ok(())
    }

    /// Number of annual steps covering the horizon. Step `k` runs while
    /// `k < sim_length`, so a fractional horizon still gets its partial year.
    pub fn n_time_steps(&self) -> Step {
        self.sim_length.ceil() as Step
    }

    pub fn therapy(&self, therapy: Therapy) -> &TherapyConfig {
        match therapy {
            Therapy::Aminosalicylate   => &self.aminosalicylate,
            Therapy::Immunosuppressive => &self.immunosuppressive,
        }
    }

    /// Immunosuppressive therapy is given on top of aminosalicylate,
    /// so its treatment cost is the sum of both drugs.
    pub fn annual_treatment_cost(&self, therapy: Therapy) -> f64 {
        match therapy {
            Therapy::Aminosalicylate => self.aminosalicylate.annual_drug_cost,
            Therapy::Immunosuppressive => {
                self.aminosalicylate.annual_drug_cost + self.immunosuppressive.annual_drug_cost
            }
        }
    }

    pub fn transition_rows(&self, therapy: Therapy) -> &[Vec<f64>] {
        self.therapy(therapy)
            .transition_matrix
            .as_deref()
            .unwrap_or(&self.transition_matrix)
    }
}
