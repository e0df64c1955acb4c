//! Channel performance aggregation tests.

use funnelsim_core::dataset::generate_complete_demo_data;
use funnelsim_core::performance::channel_performance;

#[test]
fn totals_match_manual_sums() {
    let dataset = generate_complete_demo_data(42069);
    let rollups = channel_performance(&dataset.results, &dataset.channels);
    assert_eq!(rollups.len(), dataset.channels.len());

    let channel = &dataset.channels[0];
    let rollup = &rollups[0];
    assert_eq!(rollup.channel_id, channel.id);

    let rows: Vec<_> = dataset
        .results
        .iter()
        .filter(|r| r.channel_id == channel.id)
        .collect();
    let expected_cost: f64 = rows.iter().map(|r| r.costs.total_cost).sum();
    let expected_leads: u64 = rows.iter().map(|r| r.metrics.leads).sum();
    let expected_wins: u64 = rows.iter().map(|r| r.metrics.wins).sum();

    assert!((rollup.total_cost - expected_cost).abs() < 1e-9);
    assert_eq!(rollup.total_leads, expected_leads);
    assert_eq!(rollup.total_wins, expected_wins);
}

#[test]
fn derived_rates_follow_their_formulas() {
    let dataset = generate_complete_demo_data(7);
    for rollup in channel_performance(&dataset.results, &dataset.channels) {
        if rollup.total_leads > 0 {
            let expected = rollup.total_cost / rollup.total_leads as f64;
            assert!((rollup.cost_per_lead - expected).abs() < 1e-9);
        }
        if rollup.total_impressions > 0 {
            let expected = rollup.total_leads as f64 / rollup.total_impressions as f64;
            assert!((rollup.conversion_rate - expected).abs() < 1e-12);
        }
        if rollup.total_opportunities > 0 {
            let expected = rollup.total_wins as f64 / rollup.total_opportunities as f64;
            assert!((rollup.win_rate - expected).abs() < 1e-12);
        }
    }
}

/// A channel with no matching results yields an all-zero record — the
/// aggregation must not divide by zero or skip the channel.
#[test]
fn channel_without_results_yields_all_zero_record() {
    let mut dataset = generate_complete_demo_data(5);
    let victim = dataset.channels[1].id.clone();
    dataset.results.retain(|r| r.channel_id != victim);

    let rollups = channel_performance(&dataset.results, &dataset.channels);
    assert_eq!(rollups.len(), dataset.channels.len());

    let empty = rollups
        .iter()
        .find(|r| r.channel_id == victim)
        .expect("empty channel still present in rollups");
    assert_eq!(empty.total_impressions, 0);
    assert_eq!(empty.total_leads, 0);
    assert_eq!(empty.total_wins, 0);
    assert_eq!(empty.total_cost, 0.0);
    assert_eq!(empty.cost_per_lead, 0.0);
    assert_eq!(empty.cost_per_meeting, 0.0);
    assert_eq!(empty.cost_per_opportunity, 0.0);
    assert_eq!(empty.conversion_rate, 0.0);
    assert_eq!(empty.win_rate, 0.0);
}

#[test]
fn rollups_preserve_channel_order() {
    let dataset = generate_complete_demo_data(9);
    let rollups = channel_performance(&dataset.results, &dataset.channels);
    for (rollup, channel) in rollups.iter().zip(dataset.channels.iter()) {
        assert_eq!(rollup.channel_id, channel.id);
        assert_eq!(rollup.channel_name, channel.name);
    }
}
