//! Channel generation.
//!
//! The channel catalog is a FIXED, ORDERED list of five entries.
//! NEVER reorder entries — channel index feeds seed derivation for the
//! channel, funnel, cost, and gate streams. Budget weights must sum to 1.

use crate::rng::{DemoRng, GeneratorSlot, RngBank};
use crate::types::{EntityId, Seed, CHANNEL_COUNT};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: EntityId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub experiment_id: EntityId,
    pub channel_type: ChannelType,
    pub name: String,
    pub description: String,
    pub params: ChannelParams,
    pub is_active: bool,
    pub budget_allocated: f64,
    /// Fraction of the experiment budget carried by this channel.
    pub current_weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    PaidSearch,
    DirectOutreach,
    Webinar,
    Content,
    Events,
}

/// Type-specific channel configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChannelParams {
    PaidSearch {
        keywords: Vec<String>,
        bid_strategy: BidStrategy,
        max_cpc: f64,
    },
    DirectOutreach {
        target_titles: Vec<String>,
        target_industries: Vec<String>,
        touches_per_prospect: u32,
    },
    Webinar {
        topic: String,
        duration_minutes: u32,
        co_hosted: bool,
    },
    Content {
        content_type: String,
        distribution: Vec<String>,
    },
    Events {
        event_type: String,
        booth: bool,
        staff_count: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidStrategy {
    ManualCpc,
    MaximizeClicks,
    TargetCpa,
}

/// One fixed catalog row. Weights: 0.35 / 0.25 / 0.15 / 0.15 / 0.10.
pub struct CatalogEntry {
    pub channel_type: ChannelType,
    pub name: &'static str,
    pub description: &'static str,
    pub weight: f64,
}

/// The five channels every dataset gets, in canonical order.
pub fn channel_catalog() -> [CatalogEntry; CHANNEL_COUNT] {
    [
        CatalogEntry {
            channel_type: ChannelType::PaidSearch,
            name: "Paid search",
            description: "High-intent keyword capture on search engines",
            weight: 0.35,
        },
        CatalogEntry {
            channel_type: ChannelType::DirectOutreach,
            name: "Direct outreach",
            description: "Sequenced email and phone outreach to named prospects",
            weight: 0.25,
        },
        CatalogEntry {
            channel_type: ChannelType::Webinar,
            name: "Webinar series",
            description: "Monthly expert webinar with live Q&A",
            weight: 0.15,
        },
        CatalogEntry {
            channel_type: ChannelType::Content,
            name: "Content marketing",
            description: "Long-form content distributed through owned and earned media",
            weight: 0.15,
        },
        CatalogEntry {
            channel_type: ChannelType::Events,
            name: "Industry events",
            description: "Regional conference presence and booth conversations",
            weight: 0.10,
        },
    ]
}

fn keyword_pool() -> &'static [&'static str] {
    &[
        "marketing analytics platform",
        "b2b attribution software",
        "pipeline forecasting tool",
        "demand gen reporting",
        "cac payback calculator",
        "funnel analytics",
    ]
}

fn title_pool() -> &'static [&'static str] {
    &[
        "VP Marketing",
        "Head of Growth",
        "Director of Demand Generation",
        "Chief Revenue Officer",
        "RevOps Manager",
    ]
}

fn industry_pool() -> &'static [&'static str] {
    &["SaaS", "Fintech", "Healthcare IT", "Developer Tools", "Logistics"]
}

fn webinar_topics() -> &'static [&'static str] {
    &[
        "Cutting CAC without cutting pipeline",
        "Gate-based budget allocation in practice",
        "From channel chaos to one funnel",
        "What a qualified meeting really costs",
    ]
}

fn content_types() -> &'static [&'static str] {
    &["benchmark_report", "case_study", "technical_guide", "newsletter"]
}

fn distribution_pool() -> &'static [&'static str] {
    &["organic_social", "newsletter", "partner_syndication", "community", "seo"]
}

fn event_types() -> &'static [&'static str] {
    &["regional_conference", "trade_show", "executive_dinner", "user_group"]
}

fn sample_strings(rng: &mut DemoRng, pool: &[&'static str], n: usize) -> Vec<String> {
    let mut remaining: Vec<&'static str> = pool.to_vec();
    let mut picked = Vec::with_capacity(n);
    for _ in 0..n.min(pool.len()) {
        let index = rng.int_between(0, remaining.len() as i64 - 1) as usize;
        picked.push(remaining.remove(index).to_string());
    }
    picked
}

/// Draw the type-specific parameter bag for one channel.
fn generate_params(channel_type: ChannelType, rng: &mut DemoRng) -> ChannelParams {
    match channel_type {
        ChannelType::PaidSearch => {
            let keyword_count = rng.int_between(3, 5) as usize;
            ChannelParams::PaidSearch {
                keywords: sample_strings(rng, keyword_pool(), keyword_count),
                bid_strategy: *rng.pick(&[
                    BidStrategy::ManualCpc,
                    BidStrategy::MaximizeClicks,
                    BidStrategy::TargetCpa,
                ]),
                max_cpc: rng.between(2.0, 12.0),
            }
        }
        ChannelType::DirectOutreach => {
            let title_count = rng.int_between(2, 3) as usize;
            let target_titles = sample_strings(rng, title_pool(), title_count);
            let industry_count = rng.int_between(2, 3) as usize;
            ChannelParams::DirectOutreach {
                target_titles,
                target_industries: sample_strings(rng, industry_pool(), industry_count),
                touches_per_prospect: rng.int_between(4, 9) as u32,
            }
        }
        ChannelType::Webinar => ChannelParams::Webinar {
            topic: rng.pick(webinar_topics()).to_string(),
            duration_minutes: *rng.pick(&[30u32, 45, 60]),
            co_hosted: rng.chance(0.4),
        },
        ChannelType::Content => {
            let distribution_count = rng.int_between(2, 4) as usize;
            ChannelParams::Content {
                content_type: rng.pick(content_types()).to_string(),
                distribution: sample_strings(rng, distribution_pool(), distribution_count),
            }
        }
        ChannelType::Events => ChannelParams::Events {
            event_type: rng.pick(event_types()).to_string(),
            booth: rng.chance(0.7),
            staff_count: rng.int_between(2, 6) as u32,
        },
    }
}

/// Build the five channels for an experiment. Each channel's parameter
/// draws come from its own derived stream, so changing one channel's
/// generator never shifts another channel's output.
pub fn generate_channels(
    experiment_id: &str,
    seed: Seed,
    anchor: NaiveDate,
    experiment_budget: f64,
) -> Vec<Channel> {
    let bank = RngBank::new(seed);
    let created_at = anchor
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc();

    channel_catalog()
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let mut rng = bank.for_channel(GeneratorSlot::Channels, index as u64);
            let params = generate_params(entry.channel_type, &mut rng);
            Channel {
                id: format!("channel-{seed}-{index}"),
                created_at,
                updated_at: created_at,
                experiment_id: experiment_id.to_string(),
                channel_type: entry.channel_type,
                name: entry.name.to_string(),
                description: entry.description.to_string(),
                params,
                is_active: true,
                budget_allocated: experiment_budget * entry.weight,
                current_weight: entry.weight,
            }
        })
        .collect()
}
