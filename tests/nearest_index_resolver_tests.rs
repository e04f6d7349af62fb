use chart_viewport::core::{Timeline, TimelineAddressing, nearest_timestamp_index};

const DAY_MS: f64 = 86_400_000.0;
const T0: f64 = 1_600_000_000_000.0;

fn daily_timestamps(len: usize) -> Vec<f64> {
    (0..len).map(|i| T0 + i as f64 * DAY_MS).collect()
}

#[test]
fn daily_series_resolves_to_nearest_day() {
    let timestamps = daily_timestamps(1_000);
    let timeline = Timeline::new(&timestamps, timestamps.len());

    assert_eq!(timeline.addressing(), TimelineAddressing::Timestamps);
    assert_eq!(timeline.resolve(T0 + 4.6 * DAY_MS), 5);
    assert_eq!(timeline.resolve(T0 + 4.4 * DAY_MS), 4);
}

#[test]
fn exact_matches_return_their_own_index() {
    let timestamps = daily_timestamps(1_000);
    let timeline = Timeline::new(&timestamps, timestamps.len());

    for (index, timestamp) in timestamps.iter().enumerate() {
        assert_eq!(timeline.resolve(*timestamp), index);
    }
}

#[test]
fn equidistant_values_resolve_to_lower_index() {
    let timestamps = daily_timestamps(10);
    let timeline = Timeline::new(&timestamps, timestamps.len());

    assert_eq!(timeline.resolve(T0 + 2.5 * DAY_MS), 2);
    assert_eq!(nearest_timestamp_index(&[0.0, 10.0], 5.0), Some(0));
}

#[test]
fn out_of_range_values_clamp_to_ends() {
    let timestamps = daily_timestamps(10);
    let timeline = Timeline::new(&timestamps, timestamps.len());

    assert_eq!(timeline.resolve(0.0), 0);
    assert_eq!(timeline.resolve(T0 + 1_000.0 * DAY_MS), 9);
    assert_eq!(timeline.resolve(f64::NAN), 0);
}

#[test]
fn duplicate_timestamps_resolve_to_first_occurrence() {
    let timestamps = [10.0, 20.0, 20.0, 20.0, 30.0];
    assert_eq!(nearest_timestamp_index(&timestamps, 20.0), Some(1));
    assert_eq!(nearest_timestamp_index(&timestamps, 21.0), Some(1));
    assert_eq!(nearest_timestamp_index(&timestamps, 26.0), Some(4));
}

#[test]
fn mismatched_lengths_fall_back_to_index_addressing() {
    let timestamps = daily_timestamps(9);
    let timeline = Timeline::new(&timestamps, 10);

    assert_eq!(timeline.addressing(), TimelineAddressing::Index);
    assert_eq!(timeline.len(), 10);
    assert_eq!(timeline.resolve(3.4), 3);
    assert_eq!(timeline.resolve(3.6), 4);
    assert_eq!(timeline.resolve(-8.0), 0);
    assert_eq!(timeline.resolve(T0), 9);
}

#[test]
fn unsorted_or_non_finite_timestamps_fall_back_to_index_addressing() {
    let unsorted = [3.0, 1.0, 2.0];
    assert!(!Timeline::new(&unsorted, 3).is_timestamped());

    let with_nan = [1.0, f64::NAN, 3.0];
    assert!(!Timeline::new(&with_nan, 3).is_timestamped());

    let empty: [f64; 0] = [];
    let timeline = Timeline::new(&empty, 4);
    assert!(!timeline.is_timestamped());
    assert_eq!(timeline.positions(), &[0.0, 1.0, 2.0, 3.0]);
}

#[test]
fn empty_timeline_resolves_to_zero() {
    let timeline = Timeline::indexed(0);
    assert!(timeline.is_empty());
    assert_eq!(timeline.resolve(42.0), 0);
    assert_eq!(nearest_timestamp_index(&[], 42.0), None);
}

#[test]
fn positions_format_as_dates_or_indices() {
    let timestamps = daily_timestamps(3);
    let timeline = Timeline::new(&timestamps, timestamps.len());
    assert_eq!(timeline.format_position(T0), "2020-09-13");
    assert_eq!(timeline.format_position(T0 + DAY_MS), "2020-09-14");

    let indexed = Timeline::indexed(100);
    assert_eq!(indexed.format_position(42.0), "42");
    assert_eq!(indexed.format_position(41.7), "42");
}
