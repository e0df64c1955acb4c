//! Channel performance roll-ups.
//!
//! Aggregation is advisory reporting over an already-generated dataset.
//! A channel with no results yields an all-zero record — never an error.

use crate::channel::Channel;
use crate::result::DayResult;
use crate::types::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelPerformance {
    pub channel_id: EntityId,
    pub channel_name: String,
    pub total_cost: f64,
    pub total_impressions: u64,
    pub total_leads: u64,
    pub total_meetings: u64,
    pub total_opportunities: u64,
    pub total_wins: u64,
    pub cost_per_lead: f64,
    pub cost_per_meeting: f64,
    pub cost_per_opportunity: f64,
    /// Leads over impressions.
    pub conversion_rate: f64,
    /// Wins over opportunities.
    pub win_rate: f64,
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Roll results up per channel, in channel order.
pub fn channel_performance(
    results: &[DayResult],
    channels: &[Channel],
) -> Vec<ChannelPerformance> {
    channels
        .iter()
        .map(|channel| {
            let mut total_cost = 0.0;
            let mut impressions = 0u64;
            let mut leads = 0u64;
            let mut meetings = 0u64;
            let mut opportunities = 0u64;
            let mut wins = 0u64;

            for result in results.iter().filter(|r| r.channel_id == channel.id) {
                total_cost += result.costs.total_cost;
                impressions += result.metrics.impressions;
                leads += result.metrics.leads;
                meetings += result.metrics.meetings_held;
                opportunities += result.metrics.opportunities;
                wins += result.metrics.wins;
            }

            ChannelPerformance {
                channel_id: channel.id.clone(),
                channel_name: channel.name.clone(),
                total_cost,
                total_impressions: impressions,
                total_leads: leads,
                total_meetings: meetings,
                total_opportunities: opportunities,
                total_wins: wins,
                cost_per_lead: ratio(total_cost, leads as f64),
                cost_per_meeting: ratio(total_cost, meetings as f64),
                cost_per_opportunity: ratio(total_cost, opportunities as f64),
                conversion_rate: ratio(leads as f64, impressions as f64),
                win_rate: ratio(wins as f64, opportunities as f64),
            }
        })
        .collect()
}
