//! Configuration loading and validation.

mod common;

use common::{identity_rows, state_costs};
use markov_core::{
    config::SimConfig,
    error::SimError,
    health::{HealthState, Therapy},
    params::{TherapyParameters, TransitionMatrix},
    rng::PatientRng,
};
use std::{fs, path::PathBuf};

fn repo_data_dir() -> String {
    format!("{}/../data", env!("CARGO_MANIFEST_DIR"))
}

/// Copy the repo data/ tree into a fresh temp dir so a test can edit it.
fn scratch_data_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("markov-config-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    for sub in ["transitions", "costs"] {
        fs::create_dir_all(dir.join(sub)).unwrap();
    }
    for file in [
        "simulation.json",
        "transitions/transition_matrix.json",
        "costs/state_costs.json",
        "costs/therapy_costs.json",
    ] {
        fs::copy(format!("{}/{file}", repo_data_dir()), dir.join(file)).unwrap();
    }
    dir
}

#[test]
fn builtin_config_is_valid() {
    let config = SimConfig::builtin();
    config.validate().expect("builtin inputs must validate");
    assert_eq!(config.pop_size, 1000);
    assert_eq!(config.n_time_steps(), 1);
}

#[test]
fn data_dir_matches_builtin_inputs() {
    let loaded = SimConfig::load(&repo_data_dir()).expect("load data/");
    let builtin = SimConfig::builtin();

    assert_eq!(loaded.pop_size, builtin.pop_size);
    assert!((loaded.sim_length - builtin.sim_length).abs() < 1e-12);
    assert_eq!(loaded.alpha, builtin.alpha);
    assert_eq!(loaded.discount_rate, builtin.discount_rate);
    assert_eq!(loaded.transition_matrix, builtin.transition_matrix);
    assert_eq!(loaded.annual_state_costs, builtin.annual_state_costs);
    for therapy in Therapy::ALL {
        assert_eq!(
            loaded.annual_treatment_cost(therapy),
            builtin.annual_treatment_cost(therapy)
        );
    }
}

#[test]
fn missing_file_reports_its_path() {
    let err = SimConfig::load("/nonexistent/markov-data").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Cannot read /nonexistent/markov-data/simulation.json"), "{msg}");
}

#[test]
fn invalid_file_contents_fail_at_load() {
    let dir = scratch_data_dir("bad-discount");
    fs::write(
        dir.join("simulation.json"),
        r#"{ "pop_size": 10, "sim_length": 5, "alpha": 0.05, "discount_rate": 1.5 }"#,
    )
    .unwrap();

    let err = SimConfig::load(dir.to_str().unwrap()).unwrap_err();
    assert!(
        matches!(err.downcast_ref::<SimError>(), Some(SimError::InvalidDiscountRate(_))),
        "unexpected error: {err}"
    );
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn therapy_matrix_override_is_used() {
    let dir = scratch_data_dir("override");
    let mut rows = identity_rows();
    rows[HealthState::Remission.index()] = vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0];
    let therapy_costs = serde_json::json!({
        "aminosalicylate":   { "annual_drug_cost": 100.0 },
        "immunosuppressive": { "annual_drug_cost": 40.0, "transition_matrix": rows },
    });
    fs::write(dir.join("costs/therapy_costs.json"), therapy_costs.to_string()).unwrap();

    let config = SimConfig::load(dir.to_str().unwrap()).expect("load with override");
    assert_eq!(config.transition_rows(Therapy::Aminosalicylate), &config.transition_matrix[..]);
    assert_eq!(config.transition_rows(Therapy::Immunosuppressive), &rows[..]);

    let immuno = TherapyParameters::new(Therapy::Immunosuppressive, &config).unwrap();
    assert_eq!(
        immuno.transition_matrix.probability(HealthState::Remission, HealthState::Death),
        1.0
    );
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn combination_treatment_cost_is_additive() {
    let config = SimConfig::builtin();
    assert_eq!(config.annual_treatment_cost(Therapy::Aminosalicylate), 11467.0);
    assert_eq!(config.annual_treatment_cost(Therapy::Immunosuppressive), 11467.0 + 5147.0);

    let p = TherapyParameters::new(Therapy::Immunosuppressive, &config).unwrap();
    assert_eq!(p.annual_treatment_cost, 16614.0);
    assert_eq!(p.initial_state, HealthState::Remission);
}

#[test]
fn bad_settings_are_rejected() {
    let mut config = SimConfig::builtin();
    config.pop_size = 0;
    assert!(matches!(config.validate(), Err(SimError::EmptyPopulation)));

    let mut config = SimConfig::builtin();
    config.sim_length = -1.0;
    assert!(matches!(config.validate(), Err(SimError::InvalidSimLength(_))));

    let mut config = SimConfig::builtin();
    config.alpha = 0.0;
    assert!(matches!(config.validate(), Err(SimError::InvalidAlpha(_))));

    let mut config = SimConfig::builtin();
    config.immunosuppressive.annual_drug_cost = 0.0;
    assert!(matches!(
        config.validate(),
        Err(SimError::InvalidTreatmentCost { therapy: Therapy::Immunosuppressive, .. })
    ));
}

#[test]
fn malformed_matrices_are_rejected() {
    let mut short = identity_rows();
    short.pop();
    assert!(matches!(
        TransitionMatrix::new(short),
        Err(SimError::MatrixShape { expected: 8, actual: 7 })
    ));

    let mut ragged = identity_rows();
    ragged[HealthState::Mild.index()].push(0.0);
    assert!(matches!(
        TransitionMatrix::new(ragged),
        Err(SimError::RowLength { state: HealthState::Mild, .. })
    ));

    let mut off_sum = identity_rows();
    off_sum[HealthState::Surgery.index()][0] = 0.5;
    assert!(matches!(
        TransitionMatrix::new(off_sum),
        Err(SimError::RowSum { state: HealthState::Surgery, .. })
    ));

    let mut negative = identity_rows();
    negative[HealthState::Remission.index()] = vec![1.2, -0.2, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    assert!(matches!(
        TransitionMatrix::new(negative),
        Err(SimError::InvalidProbability { state: HealthState::Remission, column: 1, .. })
    ));

    let mut partial_death = identity_rows();
    partial_death[HealthState::Death.index()][0] = 0.5;
    assert!(matches!(
        TransitionMatrix::new(partial_death),
        Err(SimError::InvalidDeathRow { .. })
    ));

    let mut dead_row = identity_rows();
    dead_row[HealthState::Mild.index()] = vec![0.0; 8];
    assert!(matches!(
        TransitionMatrix::new(dead_row),
        Err(SimError::RowSum { state: HealthState::Mild, .. })
    ));
}

#[test]
fn absorbing_self_loop_death_row_is_accepted() {
    let mut rows = identity_rows();
    rows[HealthState::Death.index()][HealthState::Death.index()] = 1.0;

    let matrix = TransitionMatrix::new(rows.clone()).expect("self-loop Death row is valid");
    assert_eq!(matrix.probability(HealthState::Death, HealthState::Death), 1.0);
    let mut rng = PatientRng::new(3);
    assert!(matrix.sample_next(HealthState::Death, &mut rng).is_none());

    TherapyParameters::from_parts(
        Therapy::Aminosalicylate,
        rows,
        &state_costs(100.0, 0.0),
        10.0,
        0.05,
    )
    .expect("parameters accept a self-loop Death row");
}

#[test]
fn malformed_costs_are_rejected() {
    let rows = identity_rows;

    let mut negative = state_costs(100.0, 0.0);
    negative[HealthState::Surgery.index()] = -1.0;
    assert!(matches!(
        TherapyParameters::from_parts(Therapy::Aminosalicylate, rows(), &negative, 10.0, 0.05),
        Err(SimError::InvalidStateCost { state: HealthState::Surgery, .. })
    ));

    assert!(matches!(
        TherapyParameters::from_parts(Therapy::Aminosalicylate, rows(), &[1.0, 2.0], 10.0, 0.05),
        Err(SimError::CostVectorLength { expected: 8, actual: 2 })
    ));

    assert!(matches!(
        TherapyParameters::from_parts(Therapy::Aminosalicylate, rows(), &state_costs(1.0, 1.0), 10.0, 1.0),
        Err(SimError::InvalidDiscountRate(_))
    ));
}
