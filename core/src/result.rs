//! Per-channel, per-day funnel results.
//!
//! RULE: a result row must satisfy two invariants at construction time:
//!   - funnel monotonicity: each stage count <= the previous stage's count
//!   - cost conservation: media + platform + labor == total (exactly,
//!     because total is computed as their sum)

use crate::types::EntityId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayResult {
    pub id: EntityId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub channel_id: EntityId,
    pub date: NaiveDate,
    pub metrics: FunnelMetrics,
    pub costs: CostBreakdown,
    pub is_simulated: bool,
    /// The combined weekend/trend/noise factor applied to this day.
    pub variance_applied: f64,
}

/// Funnel stage counts in order, plus derived revenue values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelMetrics {
    pub impressions: u64,
    pub clicks: u64,
    pub leads: u64,
    pub replies: u64,
    pub meetings_scheduled: u64,
    pub meetings_held: u64,
    pub opportunities: u64,
    pub wins: u64,
    pub pipeline_value: f64,
    pub closed_value: f64,
}

impl FunnelMetrics {
    /// Stage counts in funnel order, for monotonicity checks.
    pub fn stages(&self) -> [u64; 8] {
        [
            self.impressions,
            self.clicks,
            self.leads,
            self.replies,
            self.meetings_scheduled,
            self.meetings_held,
            self.opportunities,
            self.wins,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub media_spend: f64,
    pub platform_fees: f64,
    pub labor_cost: f64,
    pub total_cost: f64,
}
