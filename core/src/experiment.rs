//! Experiment generation — one experiment per generated dataset.
//!
//! Timestamps are derived from the dataset's date anchor, never from the
//! wall clock, so two runs on the same day produce identical records.

use crate::icp::{generate_icp, Icp};
use crate::rng::{GeneratorSlot, RngBank};
use crate::types::{EntityId, Seed, SIMULATED_DAYS};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub id: EntityId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub description: String,
    pub project_id: EntityId,
    pub status: ExperimentStatus,
    pub icp: Icp,
    /// Target cost per qualified meeting, in dataset currency.
    pub target_cpqm: f64,
    /// Maximum acceptable CAC payback window, in months.
    pub max_cac_payback_months: f64,
    pub budget_allocated: f64,
    pub start_date: NaiveDate,
    pub hypothesis: String,
    pub success_criteria: SuccessCriteria,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentStatus {
    Draft,
    Running,
    Paused,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessCriteria {
    pub primary_metric: String,
    pub target_value: f64,
    pub confidence_level: f64,
    pub min_sample_size: u32,
}

fn experiment_themes() -> &'static [&'static str] {
    &[
        "Multi-channel pipeline acceleration",
        "Qualified meeting cost discovery",
        "Channel payback validation",
        "New segment demand test",
        "Outbound vs. paid efficiency trial",
    ]
}

fn hypotheses() -> &'static [&'static str] {
    &[
        "Direct outreach will produce qualified meetings below the target \
         cost once messaging is matched to the ICP's top pain point",
        "Paid search captures existing demand at a lower cost per meeting \
         than any other channel for this segment",
        "Webinars will out-convert content on meeting show rate because \
         attendees self-select for intent",
        "Splitting budget across five channels and gating each on payback \
         will find at least two channels under the CPQM target",
        "Event-sourced leads will close at a higher win rate despite a \
         higher cost per lead",
    ]
}

/// Build the dataset's single experiment. Embeds the ICP generated from
/// the same master seed; all other draws come from the experiment's own
/// offset stream.
pub fn generate_experiment(seed: Seed, anchor: NaiveDate) -> Experiment {
    let icp = generate_icp(seed);
    let mut rng = RngBank::new(seed).for_generator(GeneratorSlot::Experiment);

    let theme = rng.pick(experiment_themes()).to_string();
    let target_cpqm = rng.int_between(150, 450) as f64;
    let max_cac_payback_months = rng.int_between(6, 18) as f64;
    let budget_allocated = rng.int_between(20, 100) as f64 * 1_000.0;
    let hypothesis = rng.pick(hypotheses()).to_string();
    let confidence_level = *rng.pick(&[0.80, 0.90, 0.95]);
    let min_sample_size = rng.int_between(50, 200) as u32;

    let start_date = anchor - chrono::Duration::days(SIMULATED_DAYS as i64);
    let created_at = start_date
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc();

    Experiment {
        id: format!("exp-{seed}"),
        created_at,
        updated_at: created_at,
        name: format!("{theme} ({})", icp.region_label()),
        description: format!(
            "Fourteen-day budgeted test across five acquisition channels \
             targeting: {}",
            icp.persona
        ),
        project_id: "proj-demo".to_string(),
        status: ExperimentStatus::Running,
        icp,
        target_cpqm,
        max_cac_payback_months,
        budget_allocated,
        start_date,
        hypothesis,
        success_criteria: SuccessCriteria {
            primary_metric: "cost_per_qualified_meeting".to_string(),
            target_value: target_cpqm,
            confidence_level,
            min_sample_size,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn experiment_generation_is_deterministic() {
        let a = generate_experiment(42069, anchor());
        let b = generate_experiment(42069, anchor());
        assert_eq!(a, b);
    }

    #[test]
    fn experiment_embeds_icp_from_same_seed() {
        let experiment = generate_experiment(777, anchor());
        assert_eq!(experiment.icp, generate_icp(777));
    }

    #[test]
    fn start_date_is_fourteen_days_before_anchor() {
        let experiment = generate_experiment(5, anchor());
        assert_eq!(
            anchor() - experiment.start_date,
            chrono::Duration::days(14)
        );
    }

    #[test]
    fn generated_experiment_is_running() {
        let experiment = generate_experiment(9, anchor());
        assert_eq!(experiment.status, ExperimentStatus::Running);
        assert!(experiment.budget_allocated >= 20_000.0);
        assert!(experiment.budget_allocated <= 100_000.0);
    }
}
