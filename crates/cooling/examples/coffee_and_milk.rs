//! When should the milk go in?
//!
//! Runs a scenario file (the bundled coffee-and-milk one by default),
//! calibrates the coffee's cooling rate from a measured temperature, and
//! compares mixing times.
//!
//! ```text
//! cargo run -p quench-cooling --example coffee_and_milk [scenario.toml]
//! RUST_LOG=quench_cooling=debug cargo run -p quench-cooling --example coffee_and_milk
//! ```

use std::error::Error;

use quench_cooling::{
    CalibrationConfig, NewtonCooling, Parameter, Scenario, Search, analytic, calibrate, simulate,
};
use tracing_subscriber::EnvFilter;

const BUNDLED: &str = include_str!("../scenarios/coffee_and_milk.toml");

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let scenario = match std::env::args().nth(1) {
        Some(path) => Scenario::from_path(path)?,
        None => Scenario::from_toml_str(BUNDLED)?,
    };
    let rule = NewtonCooling;

    let coffee = simulate(&scenario.first, &rule)?;
    println!(
        "coffee alone: {:.2} -> {:.2} after {} min (exact solution {:.2})",
        coffee.initial().temperature,
        coffee.terminal_temperature(),
        scenario.first.end_time,
        analytic::terminal_temperature(&scenario.first),
    );

    let calibrated = calibrate(
        &scenario.first,
        &rule,
        Parameter::Rate,
        70.0,
        Search::Guess(scenario.first.rate),
        &CalibrationConfig::default(),
    )?;
    println!(
        "rate that ends at 70.00: {:.6} ({} iterations; continuous model says {:.6})",
        calibrated.value,
        calibrated.iterations,
        analytic::rate_for_terminal(&scenario.first, 70.0)?,
    );

    let mixed = scenario.run(&rule)?;
    println!("mixed at the end: {:.2}", mixed.final_temperature());

    if let Some(sweep) = scenario.mix_time_sweep(&rule)? {
        println!("\n{:>8}  {:>8}", "mix at", "final");
        for point in sweep.iter() {
            println!("{:>8.1}  {:>8.2}", point.value, point.result);
        }
        if let Some(best) = sweep.max() {
            println!("\nwarmest: add milk at t = {}", best.value);
        }
    }

    Ok(())
}
