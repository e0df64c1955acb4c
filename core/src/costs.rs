//! Daily cost allocation.
//!
//! The three cost ratios are drawn independently and are NOT normalized
//! to sum to 1, so total_cost legitimately drifts from the day's budget
//! share — actual spend over/under-runs allocation. Tests assert the raw
//! ratio bounds, not a normalized split.

use crate::result::CostBreakdown;
use crate::rng::DemoRng;

pub const MEDIA_RATIO_RANGE: (f64, f64) = (0.70, 0.85);
pub const PLATFORM_RATIO_RANGE: (f64, f64) = (0.05, 0.10);
pub const LABOR_RATIO_RANGE: (f64, f64) = (0.10, 0.20);

/// Split one day's budget share into media spend, platform fees, and
/// labor cost. Total is the sum of the three components.
pub fn allocate_costs(rng: &mut DemoRng, daily_budget: f64) -> CostBreakdown {
    let media_ratio = rng.between(MEDIA_RATIO_RANGE.0, MEDIA_RATIO_RANGE.1);
    let platform_ratio = rng.between(PLATFORM_RATIO_RANGE.0, PLATFORM_RATIO_RANGE.1);
    let labor_ratio = rng.between(LABOR_RATIO_RANGE.0, LABOR_RATIO_RANGE.1);

    let media_spend = media_ratio * daily_budget;
    let platform_fees = platform_ratio * daily_budget;
    let labor_cost = labor_ratio * daily_budget;

    CostBreakdown {
        media_spend,
        platform_fees,
        labor_cost,
        total_cost: media_spend + platform_fees + labor_cost,
    }
}
