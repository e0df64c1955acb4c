//! Funnel simulation — one result per channel per day.
//!
//! Per channel: a baseline profile is drawn ONCE and reused across all
//! fourteen days; each day combines three multiplicative factors
//! (weekend dip, linear trend, daily noise) on top of it. Each funnel
//! stage applies its baseline conversion rate plus an independent tight
//! noise draw, then clamps to the prior stage's count — compounding
//! noise and rounding could otherwise exceed the parent stage on rare
//! seeds, and monotonicity is a hard invariant here.

use crate::channel::{Channel, ChannelType};
use crate::config::GenerationOptions;
use crate::costs::allocate_costs;
use crate::result::{DayResult, FunnelMetrics};
use crate::rng::{DemoRng, GeneratorSlot, RngBank};
use crate::types::{DayIndex, SIMULATED_DAYS};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

pub const WEEKEND_FACTOR: f64 = 0.7;
pub const TREND_LIFT: f64 = 0.1;
pub const DAILY_NOISE_HALF_WIDTH: f64 = 0.15;

// Per-stage noise half-widths: adjacent stages are correlated but not
// identical day to day. 5–15% depending on stage.
const CLICK_NOISE: f64 = 0.05;
const LEAD_NOISE: f64 = 0.08;
const REPLY_NOISE: f64 = 0.10;
const MEETING_NOISE: f64 = 0.10;
const SHOW_NOISE: f64 = 0.05;
const OPPORTUNITY_NOISE: f64 = 0.12;
const WIN_NOISE: f64 = 0.15;

/// Channel-type baseline drawn once per channel and reused for every day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelBaseline {
    pub daily_impressions: f64,
    pub click_rate: f64,
    pub lead_rate: f64,
    pub reply_rate: f64,
    pub meeting_rate: f64,
    pub show_rate: f64,
    pub opportunity_rate: f64,
    pub win_rate: f64,
    pub avg_deal_size: f64,
}

struct BaselineRanges {
    impressions: (f64, f64),
    click: (f64, f64),
    lead: (f64, f64),
    reply: (f64, f64),
    meeting: (f64, f64),
    show: (f64, f64),
    opportunity: (f64, f64),
    win: (f64, f64),
    deal_size: (f64, f64),
}

fn ranges_for(channel_type: ChannelType) -> BaselineRanges {
    match channel_type {
        ChannelType::PaidSearch => BaselineRanges {
            impressions: (3_000.0, 8_000.0),
            click: (0.020, 0.045),
            lead: (0.08, 0.18),
            reply: (0.50, 0.80),
            meeting: (0.30, 0.50),
            show: (0.60, 0.80),
            opportunity: (0.40, 0.60),
            win: (0.15, 0.30),
            deal_size: (8_000.0, 20_000.0),
        },
        // Outreach has no click step: a contacted prospect IS the click,
        // so click_rate is pinned at 1.0. The degenerate range still
        // consumes one draw, keeping the draw layout uniform per type.
        ChannelType::DirectOutreach => BaselineRanges {
            impressions: (120.0, 400.0),
            click: (1.0, 1.0),
            lead: (0.20, 0.40),
            reply: (0.06, 0.15),
            meeting: (0.40, 0.70),
            show: (0.60, 0.85),
            opportunity: (0.35, 0.55),
            win: (0.18, 0.32),
            deal_size: (12_000.0, 28_000.0),
        },
        ChannelType::Webinar => BaselineRanges {
            impressions: (2_000.0, 6_000.0),
            click: (0.03, 0.08),
            lead: (0.30, 0.50),
            reply: (0.35, 0.60),
            meeting: (0.15, 0.30),
            show: (0.65, 0.85),
            opportunity: (0.30, 0.50),
            win: (0.15, 0.28),
            deal_size: (9_000.0, 22_000.0),
        },
        ChannelType::Content => BaselineRanges {
            impressions: (4_000.0, 12_000.0),
            click: (0.010, 0.030),
            lead: (0.05, 0.12),
            reply: (0.30, 0.50),
            meeting: (0.15, 0.30),
            show: (0.60, 0.80),
            opportunity: (0.30, 0.50),
            win: (0.12, 0.25),
            deal_size: (7_000.0, 18_000.0),
        },
        ChannelType::Events => BaselineRanges {
            impressions: (300.0, 900.0),
            click: (0.25, 0.50),
            lead: (0.30, 0.50),
            reply: (0.50, 0.75),
            meeting: (0.35, 0.60),
            show: (0.70, 0.90),
            opportunity: (0.40, 0.60),
            win: (0.20, 0.35),
            deal_size: (15_000.0, 35_000.0),
        },
    }
}

/// Draw the per-channel baseline. Fixed draw order — reordering these
/// draws changes every downstream metric for the channel.
pub fn draw_baseline(channel_type: ChannelType, rng: &mut DemoRng) -> FunnelBaseline {
    let r = ranges_for(channel_type);
    FunnelBaseline {
        daily_impressions: rng.between(r.impressions.0, r.impressions.1),
        click_rate: rng.between(r.click.0, r.click.1),
        lead_rate: rng.between(r.lead.0, r.lead.1),
        reply_rate: rng.between(r.reply.0, r.reply.1),
        meeting_rate: rng.between(r.meeting.0, r.meeting.1),
        show_rate: rng.between(r.show.0, r.show.1),
        opportunity_rate: rng.between(r.opportunity.0, r.opportunity.1),
        win_rate: rng.between(r.win.0, r.win.1),
        avg_deal_size: rng.between(r.deal_size.0, r.deal_size.1),
    }
}

/// Advance one funnel stage: prior count × baseline rate × tight noise,
/// rounded, clamped to the prior count.
fn next_stage(rng: &mut DemoRng, prior: u64, rate: f64, noise_half: f64) -> u64 {
    let noised = prior as f64 * rate * rng.between(1.0 - noise_half, 1.0 + noise_half);
    (noised.round() as u64).min(prior)
}

/// Whether a day index lands on the simulated weekend.
pub fn is_weekend(day: DayIndex) -> bool {
    matches!(day % 7, 5 | 6)
}

/// Simulate all fourteen days for one channel.
///
/// `channel_index` is the channel's position in the catalog; it selects
/// the channel's funnel and cost streams from the bank.
pub fn simulate_channel(
    channel: &Channel,
    channel_index: u64,
    bank: &RngBank,
    options: &GenerationOptions,
    anchor: NaiveDate,
) -> Vec<DayResult> {
    let mut funnel_rng = bank.for_channel(GeneratorSlot::Funnel, channel_index);
    let mut cost_rng = bank.for_channel(GeneratorSlot::Costs, channel_index);

    let baseline = draw_baseline(channel.channel_type, &mut funnel_rng);
    let daily_budget = channel.budget_allocated / SIMULATED_DAYS as f64;
    // Cap the noise band below 1.0 so extreme variance settings can
    // never produce a negative daily factor.
    let noise_half = (DAILY_NOISE_HALF_WIDTH * options.performance_variance).min(0.95);

    let mut results = Vec::with_capacity(SIMULATED_DAYS as usize);
    for day in 0..SIMULATED_DAYS {
        let weekend_factor = if options.seasonal_effects && is_weekend(day) {
            WEEKEND_FACTOR
        } else {
            1.0
        };
        let trend_factor = if options.trend_enabled {
            1.0 + (day as f64 / SIMULATED_DAYS as f64) * TREND_LIFT
        } else {
            1.0
        };
        let daily_noise = funnel_rng.between(1.0 - noise_half, 1.0 + noise_half);
        let total_factor = weekend_factor * trend_factor * daily_noise;

        let impressions = (baseline.daily_impressions * total_factor).round() as u64;
        let clicks = next_stage(&mut funnel_rng, impressions, baseline.click_rate, CLICK_NOISE);
        let leads = next_stage(&mut funnel_rng, clicks, baseline.lead_rate, LEAD_NOISE);
        let replies = next_stage(&mut funnel_rng, leads, baseline.reply_rate, REPLY_NOISE);
        let meetings_scheduled =
            next_stage(&mut funnel_rng, replies, baseline.meeting_rate, MEETING_NOISE);
        let meetings_held =
            next_stage(&mut funnel_rng, meetings_scheduled, baseline.show_rate, SHOW_NOISE);
        let opportunities = next_stage(
            &mut funnel_rng,
            meetings_held,
            baseline.opportunity_rate,
            OPPORTUNITY_NOISE,
        );
        let wins = next_stage(&mut funnel_rng, opportunities, baseline.win_rate, WIN_NOISE);

        let pipeline_value =
            opportunities as f64 * baseline.avg_deal_size * funnel_rng.between(0.8, 1.2);
        let closed_value = wins as f64 * baseline.avg_deal_size * funnel_rng.between(0.9, 1.1);

        let date = anchor - Duration::days((SIMULATED_DAYS - 1 - day) as i64);
        let created_at = date
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always valid")
            .and_utc();

        results.push(DayResult {
            id: format!("result-{}-{day}", channel.id),
            created_at,
            updated_at: created_at,
            channel_id: channel.id.clone(),
            date,
            metrics: FunnelMetrics {
                impressions,
                clicks,
                leads,
                replies,
                meetings_scheduled,
                meetings_held,
                opportunities,
                wins,
                pipeline_value,
                closed_value,
            },
            costs: allocate_costs(&mut cost_rng, daily_budget),
            is_simulated: true,
            variance_applied: total_factor,
        });
    }

    log::debug!(
        "channel={} type={:?}: simulated {} days, baseline impressions {:.0}/day",
        channel.id,
        channel.channel_type,
        results.len(),
        baseline.daily_impressions
    );

    results
}
