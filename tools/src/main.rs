//! cohort-runner: headless Markov cohort simulation comparing
//! aminosalicylate and immunosuppressive therapy.
//!
//! Usage:
//!   cohort-runner
//!   cohort-runner --data-dir ./data --pop-size 2000 --sim-length 10
//!   cohort-runner --json > outcomes.json

use anyhow::Result;
use markov_core::{
    cohort::Cohort,
    config::SimConfig,
    health::Therapy,
    outcomes::{CohortOutcomes, ComparativeOutcomes, Icer},
    params::TherapyParameters,
    prevalence::PrevalencePath,
    summary::{DifferenceStat, SummaryStat},
};
use std::env;

#[derive(serde::Serialize)]
struct CohortReport<'a> {
    therapy:            Therapy,
    cohort_id:          u64,
    survival_times:     &'a [f64],
    costs:              &'a [f64],
    num_patients_alive: &'a [u64],
    n_living_patients:  &'a PrevalencePath,
}

#[derive(serde::Serialize)]
struct RunReport<'a> {
    pop_size:    usize,
    sim_length:  f64,
    cohorts:     Vec<CohortReport<'a>>,
    comparative: ComparativeOutcomes,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let json_mode = args.iter().any(|a| a == "--json");
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str());

    let mut config = match data_dir {
        Some(dir) => SimConfig::load(dir)?,
        None => SimConfig::builtin(),
    };
    config.pop_size = parse_arg(&args, "--pop-size", config.pop_size);
    config.sim_length = parse_arg(&args, "--sim-length", config.sim_length);
    config.validate()?;

    let n_time_steps = config.n_time_steps();
    log::debug!("config: {config:?}");

    if !json_mode {
        println!("Markov cohort simulation: therapy comparison");
        println!("  data:       {}", data_dir.unwrap_or("(built-in)"));
        println!("  pop size:   {}", config.pop_size);
        println!("  sim length: {:.3} years ({n_time_steps} steps)", config.sim_length);
        println!("  discount:   {}", config.discount_rate);
        println!();
    }

    // Cohort ids are fixed per therapy so seeds never collide.
    let mut cohorts = Vec::with_capacity(Therapy::ALL.len());
    for (cohort_id, therapy) in Therapy::ALL.into_iter().enumerate() {
        let params = TherapyParameters::new(therapy, &config)?;
        let mut cohort = Cohort::new(cohort_id as u64, config.pop_size, params)?;
        cohort.simulate(n_time_steps);
        cohorts.push(cohort);
    }

    let outcomes: Vec<&CohortOutcomes> = cohorts
        .iter()
        .filter_map(|c| c.outcomes())
        .collect();
    let [amino, immuno] = outcomes.as_slice() else {
        anyhow::bail!("expected outcomes for both cohorts, got {}", outcomes.len());
    };
    let comparative = ComparativeOutcomes::between(amino, immuno);

    if json_mode {
        let report = RunReport {
            pop_size: config.pop_size,
            sim_length: config.sim_length,
            cohorts: cohorts
                .iter()
                .zip(outcomes.iter())
                .map(|(c, o)| CohortReport {
                    therapy:            c.params().therapy,
                    cohort_id:          c.id,
                    survival_times:     &o.survival_times,
                    costs:              &o.costs,
                    num_patients_alive: &o.num_patients_alive,
                    n_living_patients:  &o.n_living_patients,
                })
                .collect(),
            comparative,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for cohort in &cohorts {
        if let Some(o) = cohort.outcomes() {
            print_outcomes(cohort.params().therapy, o, config.alpha);
        }
    }
    print_comparative(&comparative, config.alpha);
    Ok(())
}

fn print_outcomes(therapy: Therapy, outcomes: &CohortOutcomes, alpha: f64) {
    let summaries = outcomes.summaries();
    println!("=== {} ===", therapy.label());
    print_stat(&summaries.survival_time, alpha, 2);
    print_stat(&summaries.cost, alpha, 0);
    print_stat(&summaries.alive, alpha, 2);
    println!(
        "  deaths:     {} of {} (alive at end: {})",
        outcomes.num_deaths(),
        outcomes.costs.len(),
        outcomes.n_living_patients.final_value()
    );
    println!();
}

fn print_stat(stat: &SummaryStat, alpha: f64, decimals: usize) {
    if stat.count == 0 {
        println!("  {}: no observations", stat.name);
        return;
    }
    let level = (1.0 - alpha) * 100.0;
    let (ci_lo, ci_hi) = stat.confidence_interval(alpha);
    let (pi_lo, pi_hi) = stat.percentile_interval(alpha);
    println!(
        "  {}: mean {:.prec$}, {level:.0}% CI [{:.prec$}, {:.prec$}], {level:.0}% percentile interval [{:.prec$}, {:.prec$}]",
        stat.name,
        stat.mean,
        ci_lo,
        ci_hi,
        pi_lo,
        pi_hi,
        prec = decimals
    );
}

fn print_difference(diff: &DifferenceStat, alpha: f64, decimals: usize) {
    let (lo, hi) = diff.confidence_interval(alpha);
    println!(
        "  {}: {:.prec$}, {:.0}% CI [{:.prec$}, {:.prec$}]",
        diff.name,
        diff.mean,
        (1.0 - alpha) * 100.0,
        lo,
        hi,
        prec = decimals
    );
}

fn print_comparative(c: &ComparativeOutcomes, alpha: f64) {
    println!("=== Immunosuppressive vs Aminosalicylate ===");
    print_difference(&c.increase_survival_time, alpha, 2);
    print_difference(&c.increase_cost, alpha, 0);
    print_difference(&c.increase_alive, alpha, 2);
    match c.icer {
        Icer::Ratio(icer) => println!("  ICER (cost per alive step): {icer:.2}"),
        Icer::Dominant => println!("  ICER: immunosuppressive dominates (no costlier, more effective)"),
        Icer::Dominated => println!("  ICER: immunosuppressive is dominated (no cheaper, less effective)"),
        Icer::Undefined => println!("  ICER: undefined (no effect difference)"),
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
