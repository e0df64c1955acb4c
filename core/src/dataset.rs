//! Dataset assembly — the one generation call that builds the whole
//! consistent object graph.
//!
//! RULE: generation is total. Any integer seed produces a complete
//! dataset; there is no failure path in this module. Everything except
//! metadata.generated_at is a pure function of (seed, options, calendar
//! day).

use crate::channel::{generate_channels, Channel};
use crate::config::GenerationOptions;
use crate::experiment::{generate_experiment, Experiment};
use crate::funnel::simulate_channel;
use crate::gate::{generate_gates, Gate};
use crate::icp::Icp;
use crate::result::DayResult;
use crate::rng::RngBank;
use crate::types::{Seed, SIMULATED_DAYS};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Seed behind the stable reference dataset.
pub const DEFAULT_SEED: Seed = 42069;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoDataset {
    pub icp: Icp,
    pub experiment: Experiment,
    pub channels: Vec<Channel>,
    pub gates: Vec<Gate>,
    pub results: Vec<DayResult>,
    pub metadata: DatasetMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub seed: Seed,
    /// Wall-clock generation time — the only non-deterministic field in
    /// the graph.
    pub generated_at: DateTime<Utc>,
    pub days: u64,
    pub total_results: usize,
}

/// Generate the complete demo dataset with stock customization knobs.
pub fn generate_complete_demo_data(seed: Seed) -> DemoDataset {
    generate_with_options(seed, &GenerationOptions::default())
}

/// Generate the complete demo dataset with explicit knobs.
pub fn generate_with_options(seed: Seed, options: &GenerationOptions) -> DemoDataset {
    generate_at(seed, options, Utc::now().date_naive())
}

/// Core assembly, anchored at an explicit calendar day. The anchor is
/// the last simulated day ("today" in production use).
pub fn generate_at(seed: Seed, options: &GenerationOptions, anchor: NaiveDate) -> DemoDataset {
    let mut experiment = generate_experiment(seed, anchor);
    experiment.budget_allocated *= options.budget_multiplier;

    let channels = generate_channels(
        &experiment.id,
        seed,
        anchor,
        experiment.budget_allocated,
    );
    let gates = generate_gates(&channels, seed, anchor);

    let bank = RngBank::new(seed);
    let results: Vec<DayResult> = channels
        .iter()
        .enumerate()
        .flat_map(|(index, channel)| {
            simulate_channel(channel, index as u64, &bank, options, anchor)
        })
        .collect();

    log::info!(
        "seed={seed}: generated dataset with {} channels, {} gates, {} results",
        channels.len(),
        gates.len(),
        results.len()
    );

    DemoDataset {
        icp: experiment.icp.clone(),
        metadata: DatasetMetadata {
            seed,
            generated_at: Utc::now(),
            days: SIMULATED_DAYS,
            total_results: results.len(),
        },
        experiment,
        channels,
        gates,
        results,
    }
}

/// The stable reference dataset, computed lazily on first use and cached
/// for the life of the process.
pub fn default_dataset() -> &'static DemoDataset {
    static DEFAULT_DATA: OnceLock<DemoDataset> = OnceLock::new();
    DEFAULT_DATA.get_or_init(|| generate_complete_demo_data(DEFAULT_SEED))
}
