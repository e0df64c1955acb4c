//! Pass/fail gate generation.
//!
//! Every channel gets two universal gates (cost per meeting, CAC payback)
//! plus one type-specific gate. Each gate's RNG is seeded
//! master_seed + channel_index*100 + gate_index, so thresholds stay
//! independent across channels and gate positions.

use crate::channel::{Channel, ChannelType};
use crate::rng::{DemoRng, RngBank};
use crate::types::{EntityId, Seed};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub id: EntityId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub channel_id: EntityId,
    pub name: String,
    pub metric: GateMetric,
    pub operator: GateOperator,
    pub threshold: f64,
    pub evaluation_window_days: u32,
    pub is_critical: bool,
    pub benchmark: Option<Benchmark>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateMetric {
    CostPerMeeting,
    CacPaybackMonths,
    ClickThroughRate,
    ReplyRate,
    MeetingShowRate,
}

/// Comparison applied as `observed <op> threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateOperator {
    AtMost,
    AtLeast,
}

/// Where a gate threshold sits relative to published reference numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub source: String,
    pub low: f64,
    pub high: f64,
    pub percentile: u8,
}

fn evaluation_window(rng: &mut DemoRng) -> u32 {
    *rng.pick(&[7u32, 14])
}

fn benchmark(rng: &mut DemoRng, source: &str, low: f64, high: f64) -> Benchmark {
    Benchmark {
        source: source.to_string(),
        low,
        high,
        percentile: *rng.pick(&[25u8, 50, 75]),
    }
}

/// The two gates every channel carries, regardless of type.
fn universal_gate(
    gate_index: u64,
    channel: &Channel,
    rng: &mut DemoRng,
    created_at: DateTime<Utc>,
) -> Gate {
    match gate_index {
        0 => Gate {
            id: format!("gate-{}-{gate_index}", channel.id),
            created_at,
            updated_at: created_at,
            channel_id: channel.id.clone(),
            name: "Cost per meeting under target".to_string(),
            metric: GateMetric::CostPerMeeting,
            operator: GateOperator::AtMost,
            threshold: rng.int_between(150, 450) as f64,
            evaluation_window_days: evaluation_window(rng),
            is_critical: true,
            benchmark: Some(benchmark(rng, "b2b_outbound_benchmarks", 120.0, 500.0)),
        },
        _ => Gate {
            id: format!("gate-{}-{gate_index}", channel.id),
            created_at,
            updated_at: created_at,
            channel_id: channel.id.clone(),
            name: "CAC payback within window".to_string(),
            metric: GateMetric::CacPaybackMonths,
            operator: GateOperator::AtMost,
            threshold: rng.int_between(6, 18) as f64,
            evaluation_window_days: evaluation_window(rng),
            is_critical: true,
            benchmark: Some(benchmark(rng, "saas_finance_benchmarks", 5.0, 24.0)),
        },
    }
}

/// The gate each channel type adds on top of the universal pair.
fn type_specific_gate(
    gate_index: u64,
    channel: &Channel,
    rng: &mut DemoRng,
    created_at: DateTime<Utc>,
) -> Gate {
    let (name, metric, threshold, bench_low, bench_high) = match channel.channel_type {
        ChannelType::PaidSearch => (
            "Click-through rate above floor",
            GateMetric::ClickThroughRate,
            rng.between(0.015, 0.04),
            0.01,
            0.06,
        ),
        ChannelType::DirectOutreach => (
            "Reply rate above floor",
            GateMetric::ReplyRate,
            rng.between(0.04, 0.12),
            0.02,
            0.15,
        ),
        ChannelType::Webinar => (
            "Meeting show rate above floor",
            GateMetric::MeetingShowRate,
            rng.between(0.50, 0.80),
            0.40,
            0.90,
        ),
        ChannelType::Content => (
            "Click-through rate above floor",
            GateMetric::ClickThroughRate,
            rng.between(0.008, 0.02),
            0.005,
            0.03,
        ),
        ChannelType::Events => (
            "Meeting show rate above floor",
            GateMetric::MeetingShowRate,
            rng.between(0.60, 0.85),
            0.50,
            0.95,
        ),
    };

    Gate {
        id: format!("gate-{}-{gate_index}", channel.id),
        created_at,
        updated_at: created_at,
        channel_id: channel.id.clone(),
        name: name.to_string(),
        metric,
        operator: GateOperator::AtLeast,
        threshold,
        evaluation_window_days: evaluation_window(rng),
        is_critical: rng.chance(0.4),
        benchmark: Some(benchmark(rng, "channel_benchmarks", bench_low, bench_high)),
    }
}

/// Build all gates for the given channels: two universal plus one
/// type-specific gate per channel.
pub fn generate_gates(channels: &[Channel], seed: Seed, anchor: NaiveDate) -> Vec<Gate> {
    let bank = RngBank::new(seed);
    let created_at = anchor
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc();

    let mut gates = Vec::with_capacity(channels.len() * 3);
    for (channel_index, channel) in channels.iter().enumerate() {
        for gate_index in 0..3u64 {
            let mut rng = bank.for_gate(channel_index as u64, gate_index);
            let gate = if gate_index < 2 {
                universal_gate(gate_index, channel, &mut rng, created_at)
            } else {
                type_specific_gate(gate_index, channel, &mut rng, created_at)
            };
            gates.push(gate);
        }
    }
    gates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::generate_channels;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn gates_for(seed: Seed) -> (Vec<Channel>, Vec<Gate>) {
        let channels = generate_channels("exp-1", seed, anchor(), 50_000.0);
        let gates = generate_gates(&channels, seed, anchor());
        (channels, gates)
    }

    #[test]
    fn every_channel_gets_three_gates() {
        let (channels, gates) = gates_for(42069);
        assert_eq!(gates.len(), channels.len() * 3);
        for channel in &channels {
            let count = gates.iter().filter(|g| g.channel_id == channel.id).count();
            assert_eq!(count, 3, "channel {} has {count} gates", channel.id);
        }
    }

    #[test]
    fn universal_gates_lead_each_channel_block() {
        let (_, gates) = gates_for(7);
        for block in gates.chunks(3) {
            assert_eq!(block[0].metric, GateMetric::CostPerMeeting);
            assert_eq!(block[0].operator, GateOperator::AtMost);
            assert_eq!(block[1].metric, GateMetric::CacPaybackMonths);
            assert_eq!(block[1].operator, GateOperator::AtMost);
            assert_eq!(block[2].operator, GateOperator::AtLeast);
        }
    }

    #[test]
    fn gate_generation_is_deterministic() {
        let (_, a) = gates_for(123);
        let (_, b) = gates_for(123);
        assert_eq!(a, b);
    }

    #[test]
    fn thresholds_fall_in_type_ranges() {
        let (_, gates) = gates_for(9);
        for gate in &gates {
            match gate.metric {
                GateMetric::CostPerMeeting => {
                    assert!((150.0..=450.0).contains(&gate.threshold))
                }
                GateMetric::CacPaybackMonths => {
                    assert!((6.0..=18.0).contains(&gate.threshold))
                }
                GateMetric::ClickThroughRate => {
                    assert!((0.008..0.04).contains(&gate.threshold))
                }
                GateMetric::ReplyRate => {
                    assert!((0.04..0.12).contains(&gate.threshold))
                }
                GateMetric::MeetingShowRate => {
                    assert!((0.50..0.85).contains(&gate.threshold))
                }
            }
        }
    }
}
