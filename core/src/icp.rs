//! Ideal-customer-profile generation using curated option lists.
//!
//! All generation is deterministic (same seed = same profile).
//! The ICP stream is the master stream: generate_icp(seed) reads the
//! unmodified seed, and the experiment embeds its output.

use crate::rng::{DemoRng, GeneratorSlot, RngBank};
use crate::types::Seed;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Icp {
    pub persona: String,
    pub company_size: CompanySize,
    pub region: Region,
    pub acv_range: AcvRange,
    pub gross_margin: f64,
    pub sales_motion: SalesMotion,
    pub decision_window_days: u32,
    pub pain_points: Vec<String>,
    pub use_cases: Vec<String>,
}

/// Annual-contract-value band the ICP buys in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcvRange {
    pub min: f64,
    pub max: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanySize {
    Micro,      // 1-10
    Small,      // 11-50
    MidMarket,  // 51-500
    Enterprise, // 500+
}

impl CompanySize {
    pub fn employee_band(&self) -> &'static str {
        match self {
            Self::Micro => "1-10",
            Self::Small => "11-50",
            Self::MidMarket => "51-500",
            Self::Enterprise => "500+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    NorthAmerica,
    Europe,
    AsiaPacific,
    LatinAmerica,
}

impl Icp {
    pub fn region_label(&self) -> &'static str {
        match self.region {
            Region::NorthAmerica => "North America",
            Region::Europe => "Europe",
            Region::AsiaPacific => "Asia-Pacific",
            Region::LatinAmerica => "Latin America",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalesMotion {
    SelfServe,
    InsideSales,
    FieldSales,
}

const COMPANY_SIZES: &[CompanySize] = &[
    CompanySize::Micro,
    CompanySize::Small,
    CompanySize::MidMarket,
    CompanySize::Enterprise,
];

const REGIONS: &[Region] = &[
    Region::NorthAmerica,
    Region::Europe,
    Region::AsiaPacific,
    Region::LatinAmerica,
];

const SALES_MOTIONS: &[SalesMotion] = &[
    SalesMotion::SelfServe,
    SalesMotion::InsideSales,
    SalesMotion::FieldSales,
];

fn personas() -> &'static [&'static str] {
    &[
        "VP of Marketing at a B2B SaaS company",
        "Head of Growth at a product-led startup",
        "Director of Demand Generation at a mid-market software vendor",
        "Chief Revenue Officer at a services firm",
        "Founder-led sales at an early-stage company",
        "VP of Sales at an enterprise software company",
        "Head of Revenue Operations at a fintech",
        "Director of Marketing at a developer-tools company",
    ]
}

fn pain_point_pool() -> &'static [&'static str] {
    &[
        "Pipeline coverage is below target for the next two quarters",
        "CAC has been rising faster than ACV",
        "Outbound reply rates have collapsed since last year",
        "Marketing and sales disagree on what a qualified lead is",
        "No reliable attribution across paid and organic channels",
        "Sales cycle keeps slipping past the forecasted close date",
        "Webinar attendance is high but conversion to meetings is poor",
        "Budget is spread across too many channels to measure any of them",
    ]
}

fn use_case_pool() -> &'static [&'static str] {
    &[
        "Consolidating channel reporting into a single funnel view",
        "Finding the cheapest repeatable source of qualified meetings",
        "Cutting spend on channels that fail payback targets",
        "Testing a new vertical before committing annual budget",
        "Proving channel ROI to the board with gate-based criteria",
        "Rebalancing budget weekly based on cost per meeting",
        "Standing up an outbound motion alongside paid acquisition",
        "Validating ICP assumptions with controlled spend",
    ]
}

/// Sample `n` distinct items from a pool, preserving pool order of draws.
fn sample(rng: &mut DemoRng, pool: &[&'static str], n: usize) -> Vec<String> {
    let mut remaining: Vec<&'static str> = pool.to_vec();
    let mut picked = Vec::with_capacity(n);
    for _ in 0..n.min(pool.len()) {
        let index = rng.int_between(0, remaining.len() as i64 - 1) as usize;
        picked.push(remaining.remove(index).to_string());
    }
    picked
}

/// Build one ideal customer profile, fully determined by the seed.
pub fn generate_icp(seed: Seed) -> Icp {
    let mut rng = RngBank::new(seed).for_generator(GeneratorSlot::Icp);

    let persona = rng.pick(personas()).to_string();
    let company_size = *rng.pick(COMPANY_SIZES);
    let region = *rng.pick(REGIONS);

    let acv_min = rng.int_between(5, 25) as f64 * 1_000.0;
    let acv_max = acv_min + rng.int_between(10, 75) as f64 * 1_000.0;
    let gross_margin = rng.between(0.60, 0.90);
    let sales_motion = *rng.pick(SALES_MOTIONS);
    let decision_window_days = rng.int_between(14, 90) as u32;

    let pain_count = rng.int_between(2, 4) as usize;
    let pain_points = sample(&mut rng, pain_point_pool(), pain_count);
    let use_case_count = rng.int_between(2, 3) as usize;
    let use_cases = sample(&mut rng, use_case_pool(), use_case_count);

    Icp {
        persona,
        company_size,
        region,
        acv_range: AcvRange {
            min: acv_min,
            max: acv_max,
            currency: "USD".to_string(),
        },
        gross_margin,
        sales_motion,
        decision_window_days,
        pain_points,
        use_cases,
    }
}
