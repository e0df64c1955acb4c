//! Structural validation of a generated dataset.
//!
//! Advisory only: this module reports problems, it never repairs or
//! rejects data. Errors flip is_valid; warnings do not.

use crate::dataset::DemoDataset;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Check completeness and funnel monotonicity across the dataset.
///
/// Errors: a channel with zero results.
/// Warnings: a channel with zero gates; any single result whose funnel
/// counts increase down the funnel; results or gates referencing a
/// channel that is not in the channel list.
pub fn validate_dataset(dataset: &DemoDataset) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let channel_ids: HashSet<&str> =
        dataset.channels.iter().map(|c| c.id.as_str()).collect();

    for channel in &dataset.channels {
        let result_count = dataset
            .results
            .iter()
            .filter(|r| r.channel_id == channel.id)
            .count();
        if result_count == 0 {
            errors.push(format!("channel {} has no results", channel.id));
        }

        let gate_count = dataset
            .gates
            .iter()
            .filter(|g| g.channel_id == channel.id)
            .count();
        if gate_count == 0 {
            warnings.push(format!("channel {} has no gates", channel.id));
        }
    }

    for result in &dataset.results {
        if !channel_ids.contains(result.channel_id.as_str()) {
            warnings.push(format!(
                "result {} references unknown channel {}",
                result.id, result.channel_id
            ));
        }
        let m = &result.metrics;
        if m.clicks > m.impressions {
            warnings.push(format!(
                "result {}: clicks ({}) exceed impressions ({})",
                result.id, m.clicks, m.impressions
            ));
        }
        if m.leads > m.clicks {
            warnings.push(format!(
                "result {}: leads ({}) exceed clicks ({})",
                result.id, m.leads, m.clicks
            ));
        }
        if m.wins > m.opportunities {
            warnings.push(format!(
                "result {}: wins ({}) exceed opportunities ({})",
                result.id, m.wins, m.opportunities
            ));
        }
    }

    for gate in &dataset.gates {
        if !channel_ids.contains(gate.channel_id.as_str()) {
            warnings.push(format!(
                "gate {} references unknown channel {}",
                gate.id, gate.channel_id
            ));
        }
    }

    if !errors.is_empty() {
        log::warn!(
            "seed={}: validation found {} error(s)",
            dataset.metadata.seed,
            errors.len()
        );
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}
