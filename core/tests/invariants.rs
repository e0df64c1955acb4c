//! Structural invariants that must hold for every seed-generated dataset.

use funnelsim_core::costs::{LABOR_RATIO_RANGE, MEDIA_RATIO_RANGE, PLATFORM_RATIO_RANGE};
use funnelsim_core::dataset::{generate_complete_demo_data, DemoDataset};
use funnelsim_core::funnel::is_weekend;
use funnelsim_core::types::SIMULATED_DAYS;
use funnelsim_core::validation::validate_dataset;

const SAMPLE_SEEDS: [u64; 8] = [1, 7, 42, 777, 42069, 31_337, 99_999, 123_456];

fn day_index(dataset: &DemoDataset, result_date: chrono::NaiveDate) -> u64 {
    let last_day = dataset
        .results
        .iter()
        .map(|r| r.date)
        .max()
        .expect("dataset has results");
    (SIMULATED_DAYS - 1) - (last_day - result_date).num_days() as u64
}

#[test]
fn funnel_stages_never_increase_along_the_funnel() {
    for seed in SAMPLE_SEEDS {
        let dataset = generate_complete_demo_data(seed);
        for result in &dataset.results {
            let stages = result.metrics.stages();
            for (i, pair) in stages.windows(2).enumerate() {
                assert!(
                    pair[1] <= pair[0],
                    "seed {seed}, result {}: stage {} exceeds stage {} ({:?})",
                    result.id,
                    i + 1,
                    i,
                    stages
                );
            }
        }
    }
}

#[test]
fn cost_components_sum_to_total() {
    for seed in SAMPLE_SEEDS {
        let dataset = generate_complete_demo_data(seed);
        for result in &dataset.results {
            let c = &result.costs;
            let sum = c.media_spend + c.platform_fees + c.labor_cost;
            assert!(
                (sum - c.total_cost).abs() < 1e-9,
                "seed {seed}, result {}: {sum} != {}",
                result.id,
                c.total_cost
            );
        }
    }
}

#[test]
fn cost_ratios_respect_configured_bounds() {
    // Division re-rounds the drawn ratio; allow 1e-9 slack at the edges.
    fn in_band(ratio: f64, band: (f64, f64)) -> bool {
        ratio >= band.0 - 1e-9 && ratio < band.1 + 1e-9
    }

    for seed in SAMPLE_SEEDS {
        let dataset = generate_complete_demo_data(seed);
        for channel in &dataset.channels {
            let daily_budget = channel.budget_allocated / SIMULATED_DAYS as f64;
            for result in dataset.results.iter().filter(|r| r.channel_id == channel.id) {
                let media = result.costs.media_spend / daily_budget;
                let platform = result.costs.platform_fees / daily_budget;
                let labor = result.costs.labor_cost / daily_budget;
                assert!(
                    in_band(media, MEDIA_RATIO_RANGE),
                    "seed {seed}: media ratio {media} out of bounds"
                );
                assert!(
                    in_band(platform, PLATFORM_RATIO_RANGE),
                    "seed {seed}: platform ratio {platform} out of bounds"
                );
                assert!(
                    in_band(labor, LABOR_RATIO_RANGE),
                    "seed {seed}: labor ratio {labor} out of bounds"
                );
            }
        }
    }
}

#[test]
fn channel_weights_sum_to_one() {
    for seed in SAMPLE_SEEDS {
        let dataset = generate_complete_demo_data(seed);
        assert_eq!(dataset.channels.len(), 5);
        let total: f64 = dataset.channels.iter().map(|c| c.current_weight).sum();
        assert!(
            (total - 1.0).abs() < 1e-6,
            "seed {seed}: weights sum to {total}"
        );
    }
}

#[test]
fn every_channel_has_results_and_gates() {
    for seed in SAMPLE_SEEDS {
        let dataset = generate_complete_demo_data(seed);
        for channel in &dataset.channels {
            let results = dataset
                .results
                .iter()
                .filter(|r| r.channel_id == channel.id)
                .count();
            let gates = dataset
                .gates
                .iter()
                .filter(|g| g.channel_id == channel.id)
                .count();
            assert_eq!(results, 14, "seed {seed}: channel {} results", channel.id);
            assert!(gates >= 1, "seed {seed}: channel {} has no gates", channel.id);
        }
    }
}

#[test]
fn generated_datasets_validate_clean() {
    for seed in SAMPLE_SEEDS {
        let dataset = generate_complete_demo_data(seed);
        let report = validate_dataset(&dataset);
        assert!(report.is_valid, "seed {seed}: {:?}", report.errors);
        assert!(
            report.errors.is_empty(),
            "seed {seed}: unexpected errors {:?}",
            report.errors
        );
        assert!(
            report.warnings.is_empty(),
            "seed {seed}: unexpected warnings {:?}",
            report.warnings
        );
    }
}

/// Weekend-indexed days must average fewer impressions than weekdays
/// for the same channel, once averaged over several seeds.
#[test]
fn weekend_impressions_dip_below_weekday_impressions() {
    let mut weekend_by_channel = [0.0f64; 5];
    let mut weekday_by_channel = [0.0f64; 5];
    let mut weekend_days = 0u64;
    let mut weekday_days = 0u64;

    for seed in SAMPLE_SEEDS {
        let dataset = generate_complete_demo_data(seed);
        for (index, channel) in dataset.channels.iter().enumerate() {
            for result in dataset.results.iter().filter(|r| r.channel_id == channel.id) {
                let day = day_index(&dataset, result.date);
                if is_weekend(day) {
                    weekend_by_channel[index] += result.metrics.impressions as f64;
                    weekend_days += 1;
                } else {
                    weekday_by_channel[index] += result.metrics.impressions as f64;
                    weekday_days += 1;
                }
            }
        }
    }

    // 4 weekend days and 10 weekdays per channel per seed.
    assert_eq!(weekend_days, SAMPLE_SEEDS.len() as u64 * 5 * 4);
    assert_eq!(weekday_days, SAMPLE_SEEDS.len() as u64 * 5 * 10);

    for index in 0..5 {
        let weekend_mean = weekend_by_channel[index] / (SAMPLE_SEEDS.len() as f64 * 4.0);
        let weekday_mean = weekday_by_channel[index] / (SAMPLE_SEEDS.len() as f64 * 10.0);
        assert!(
            weekend_mean < weekday_mean,
            "channel {index}: weekend mean {weekend_mean:.1} not below weekday mean {weekday_mean:.1}"
        );
    }
}
