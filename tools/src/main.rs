//! demo-runner: headless dataset generator for the demo-mode engine.
//!
//! Usage:
//!   demo-runner --seed 42069
//!   demo-runner --seed 42069 --json > dataset.json

use anyhow::Result;
use funnelsim_core::{
    dataset::{generate_complete_demo_data, DEFAULT_SEED},
    performance::channel_performance,
    validation::validate_dataset,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", DEFAULT_SEED);
    let json = args.iter().any(|a| a == "--json");

    let dataset = generate_complete_demo_data(seed);
    let report = validate_dataset(&dataset);
    log::debug!(
        "seed={seed}: {} errors, {} warnings",
        report.errors.len(),
        report.warnings.len()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&dataset)?);
    } else {
        println!("demo-runner");
        println!("  seed:       {seed}");
        println!("  days:       {}", dataset.metadata.days);
        println!("  channels:   {}", dataset.channels.len());
        println!("  gates:      {}", dataset.gates.len());
        println!("  results:    {}", dataset.metadata.total_results);
        println!("  experiment: {}", dataset.experiment.name);
        println!("  budget:     {:.0}", dataset.experiment.budget_allocated);
        println!();

        println!(
            "{:<20} {:>10} {:>8} {:>8} {:>6} {:>10} {:>8}",
            "channel", "cost", "leads", "mtgs", "wins", "cost/mtg", "win%"
        );
        for rollup in channel_performance(&dataset.results, &dataset.channels) {
            println!(
                "{:<20} {:>10.0} {:>8} {:>8} {:>6} {:>10.0} {:>7.1}%",
                rollup.channel_name,
                rollup.total_cost,
                rollup.total_leads,
                rollup.total_meetings,
                rollup.total_wins,
                rollup.cost_per_meeting,
                rollup.win_rate * 100.0
            );
        }
        println!();

        if report.is_valid {
            println!("validation: OK ({} warnings)", report.warnings.len());
        } else {
            println!("validation: FAILED");
        }
        for error in &report.errors {
            println!("  error:   {error}");
        }
        for warning in &report.warnings {
            println!("  warning: {warning}");
        }
    }

    if !report.is_valid {
        std::process::exit(1);
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
