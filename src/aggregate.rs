use crate::derive::weekday_name;
use crate::filter::FilteredSet;
use crate::stats::{Bin, LinearFit, histogram, linear_regression, mean, sum};
use crate::structs::{EnrichedTrip, FareCategory, HourRange, TransformConfig, Value};
use chrono::{Month, NaiveDateTime};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Label for rows whose grouping column is empty or unparseable.
pub const MISSING_LABEL: &str = "(missing)";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMean {
    pub group: String,
    /// `None` when every value in the group is missing
    pub mean: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackedCount {
    pub group: String,
    pub series: FareCategory,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scatter {
    pub points: Vec<(f64, f64)>,
    pub trend: Option<LinearFit>,
}

/// Display columns for one trip in a table section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRow {
    pub row_index: usize,
    pub city: Option<String>,
    pub product_type: Option<String>,
    pub fare_amount: Option<f64>,
    pub distance: Option<f64>,
    pub request_time: Option<String>,
    pub begin_trip_time: Option<String>,
    pub dropoff_time: Option<String>,
}

impl TripRow {
    fn from_trip(t: &EnrichedTrip) -> Self {
        let ts = |v: &Value<NaiveDateTime>| {
            v.get()
                .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
        };
        Self {
            row_index: t.trip.row_index,
            city: t.trip.city.clone(),
            product_type: t.trip.product_type.clone(),
            fare_amount: t.trip.fare_amount.value(),
            distance: t.trip.distance.value(),
            request_time: ts(&t.trip.request_time),
            begin_trip_time: ts(&t.trip.begin_trip_time),
            dropoff_time: ts(&t.trip.dropoff_time),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMetrics {
    pub total_trips: usize,
    pub total_distance: f64,
    pub total_fare: f64,
}

/// Every summary the dashboard shows for one filtered set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregates {
    pub metrics: KeyMetrics,
    pub status_counts: Vec<CategoryCount>,
    pub avg_fare_by_city: Vec<GroupMean>,
    pub avg_distance_by_product: Vec<GroupMean>,
    pub avg_duration_by_city: Vec<GroupMean>,
    pub avg_distance_by_city: Vec<GroupMean>,
    pub fare_per_km_histogram: Vec<Bin>,
    pub hour_range_counts: Vec<CategoryCount>,
    pub high_fare_threshold: Option<f64>,
    pub fare_category_by_city: Vec<StackedCount>,
    pub longest_distance_city: Option<GroupMean>,
    pub duration_vs_fare: Scatter,
    pub zero_fare_trips: Vec<TripRow>,
    pub city_counts: Vec<CategoryCount>,
    pub hour_counts: Vec<CategoryCount>,
    pub hour_histogram: Vec<Bin>,
    pub day_counts: Vec<CategoryCount>,
    pub duration_histogram: Vec<Bin>,
    pub fare_histogram: Vec<Bin>,
    pub distance_vs_fare: Scatter,
    pub month_counts: Vec<CategoryCount>,
    pub peak_hour: Option<u32>,
    pub peak_day: Option<String>,
    pub most_expensive: Vec<TripRow>,
    pub cheapest: Vec<TripRow>,
}

/// Runs the whole aggregation catalog over a filtered set.
pub fn aggregate(set: &FilteredSet<'_>, config: &TransformConfig) -> Aggregates {
    let trips = &set.trips;
    let avg_distance_by_city = group_mean(
        trips,
        |t| t.trip.city.as_deref(),
        |t| t.trip.distance.value(),
    );

    Aggregates {
        metrics: key_metrics(trips),
        status_counts: value_counts(trips.iter().map(|t| t.trip.status.clone())),
        avg_fare_by_city: group_mean(
            trips,
            |t| t.trip.city.as_deref(),
            |t| t.trip.fare_amount.value(),
        ),
        avg_distance_by_product: group_mean(
            trips,
            |t| t.trip.product_type.as_deref(),
            |t| t.trip.distance.value(),
        ),
        avg_duration_by_city: group_mean(
            trips,
            |t| t.trip.city.as_deref(),
            |t| t.derived.ride_duration_minutes,
        ),
        longest_distance_city: longest_average(&avg_distance_by_city),
        avg_distance_by_city,
        fare_per_km_histogram: histogram(
            &present(trips, |t| t.derived.fare_per_km),
            config.histogram_bins,
        ),
        hour_range_counts: hour_range_counts(trips),
        high_fare_threshold: set.high_fare_threshold,
        fare_category_by_city: fare_category_by_city(set),
        duration_vs_fare: scatter(trips, |t| t.derived.ride_duration_minutes),
        zero_fare_trips: zero_fare_trips(trips),
        city_counts: value_counts(trips.iter().map(|t| t.trip.city.clone())),
        hour_counts: value_counts(trips.iter().map(|t| t.derived.hour.map(|h| h.to_string()))),
        hour_histogram: hour_histogram(trips),
        day_counts: value_counts(
            trips
                .iter()
                .map(|t| t.derived.day_of_week.map(|d| weekday_name(d).to_string())),
        ),
        duration_histogram: histogram(
            &present(trips, |t| t.derived.ride_duration_minutes),
            config.histogram_bins,
        ),
        fare_histogram: histogram(
            &present(trips, |t| t.trip.fare_amount.value()),
            config.histogram_bins,
        ),
        distance_vs_fare: scatter(trips, |t| t.trip.distance.value()),
        month_counts: month_counts(trips),
        peak_hour: mode(trips.iter().filter_map(|t| t.derived.hour)),
        peak_day: mode(trips.iter().filter_map(|t| t.derived.day_of_week))
            .map(|d| weekday_name(d).to_string()),
        most_expensive: top_by_fare(trips, config.top_n, true),
        cheapest: top_by_fare(trips, config.top_n, false),
    }
}

fn present(trips: &[&EnrichedTrip], f: impl Fn(&EnrichedTrip) -> Option<f64>) -> Vec<f64> {
    trips.iter().filter_map(|t| f(*t)).collect()
}

/// Row count plus distance and fare totals. Missing values contribute nothing.
pub fn key_metrics(trips: &[&EnrichedTrip]) -> KeyMetrics {
    KeyMetrics {
        total_trips: trips.len(),
        total_distance: sum(&present(trips, |t| t.trip.distance.value())),
        total_fare: sum(&present(trips, |t| t.trip.fare_amount.value())),
    }
}

/// Counts per category, most frequent first. Ties keep first-appearance order and
/// missing values are counted under [`MISSING_LABEL`].
pub fn value_counts(values: impl Iterator<Item = Option<String>>) -> Vec<CategoryCount> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<CategoryCount> = Vec::new();

    for value in values {
        let category = value.unwrap_or_else(|| MISSING_LABEL.to_string());
        match index.get(&category) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(category.clone(), counts.len());
                counts.push(CategoryCount { category, count: 1 });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// The most frequent value; the earliest seen wins a tie.
pub fn mode<T: Eq + Hash + Copy>(values: impl Iterator<Item = T>) -> Option<T> {
    let mut order: Vec<T> = Vec::new();
    let mut counts: HashMap<T, usize> = HashMap::new();
    for value in values {
        let count = counts.entry(value).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }

    let mut best: Option<(T, usize)> = None;
    for value in order {
        let count = counts[&value];
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

// Sorts present keys ascending and the missing key last.
type GroupKey = (bool, String);

fn group_key(key: Option<&str>) -> GroupKey {
    match key {
        Some(k) => (false, k.to_string()),
        None => (true, String::new()),
    }
}

fn group_label(key: &GroupKey) -> String {
    if key.0 {
        MISSING_LABEL.to_string()
    } else {
        key.1.clone()
    }
}

/// Mean of `value` per `key`, in sorted key order. Rows with a missing value still
/// create their group but do not contribute to its mean.
pub fn group_mean(
    trips: &[&EnrichedTrip],
    key: impl Fn(&EnrichedTrip) -> Option<&str>,
    value: impl Fn(&EnrichedTrip) -> Option<f64>,
) -> Vec<GroupMean> {
    let mut groups: BTreeMap<GroupKey, Vec<f64>> = BTreeMap::new();
    for t in trips {
        let values = groups.entry(group_key(key(*t))).or_default();
        if let Some(v) = value(*t) {
            values.push(v);
        }
    }

    groups
        .iter()
        .map(|(k, values)| GroupMean {
            group: group_label(k),
            mean: mean(values),
        })
        .collect()
}

/// The named group with the highest defined mean. The first in key order wins a tie.
pub fn longest_average(means: &[GroupMean]) -> Option<GroupMean> {
    let mut best: Option<&GroupMean> = None;
    for candidate in means.iter().filter(|g| g.group != MISSING_LABEL) {
        let Some(value) = candidate.mean else {
            continue;
        };
        if best.and_then(|b| b.mean).is_none_or(|top| value > top) {
            best = Some(candidate);
        }
    }
    best.cloned()
}

/// Trip counts per hour range. All four ranges are always listed.
pub fn hour_range_counts(trips: &[&EnrichedTrip]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = HourRange::ALL
        .iter()
        .map(|r| CategoryCount {
            category: r.label().to_string(),
            count: trips
                .iter()
                .filter(|t| t.derived.hour_range == Some(*r))
                .count(),
        })
        .collect();

    let missing = trips.iter().filter(|t| t.derived.hour_range.is_none()).count();
    if missing > 0 {
        counts.push(CategoryCount {
            category: MISSING_LABEL.to_string(),
            count: missing,
        });
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Counts per (city, fare category) against the set's own threshold.
pub fn fare_category_by_city(set: &FilteredSet<'_>) -> Vec<StackedCount> {
    let mut counts: BTreeMap<(GroupKey, FareCategory), usize> = BTreeMap::new();
    for t in &set.trips {
        let key = (group_key(t.trip.city.as_deref()), set.fare_category(t));
        *counts.entry(key).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|((city, series), count)| StackedCount {
            group: group_label(&city),
            series,
            count,
        })
        .collect()
}

fn scatter(trips: &[&EnrichedTrip], x: impl Fn(&EnrichedTrip) -> Option<f64>) -> Scatter {
    let points: Vec<(f64, f64)> = trips
        .iter()
        .filter_map(|t| Some((x(*t)?, t.trip.fare_amount.value()?)))
        .collect();
    let trend = linear_regression(&points);
    Scatter { points, trend }
}

/// Trips whose fare is exactly zero.
pub fn zero_fare_trips(trips: &[&EnrichedTrip]) -> Vec<TripRow> {
    trips
        .iter()
        .filter(|t| t.trip.fare_amount.value() == Some(0.0))
        .map(|t| TripRow::from_trip(t))
        .collect()
}

/// One unit bin per hour of the day.
pub fn hour_histogram(trips: &[&EnrichedTrip]) -> Vec<Bin> {
    let mut counts = [0usize; 24];
    for hour in trips.iter().filter_map(|t| t.derived.hour) {
        counts[hour as usize] += 1;
    }
    counts
        .iter()
        .enumerate()
        .map(|(h, &count)| Bin {
            start: h as f64,
            end: (h + 1) as f64,
            count,
        })
        .collect()
}

/// Trips per month in calendar order, missing last. Months without trips are left out.
pub fn month_counts(trips: &[&EnrichedTrip]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<Option<u32>, usize> = BTreeMap::new();
    for t in trips {
        let key = t.derived.month.map(|m| m.number_from_month());
        *counts.entry(key).or_default() += 1;
    }

    let (missing, months): (Vec<_>, Vec<_>) = counts.into_iter().partition(|(k, _)| k.is_none());
    months
        .into_iter()
        .chain(missing)
        .map(|(month, count)| CategoryCount {
            category: month
                .and_then(|n| Month::try_from(n as u8).ok())
                .map_or_else(|| MISSING_LABEL.to_string(), |m| m.name().to_string()),
            count,
        })
        .collect()
}

/// The `n` highest (or lowest) fares. Missing fares are skipped and equal fares keep
/// their load order.
pub fn top_by_fare(trips: &[&EnrichedTrip], n: usize, highest: bool) -> Vec<TripRow> {
    let mut priced: Vec<(&EnrichedTrip, f64)> = trips
        .iter()
        .filter_map(|t| t.trip.fare_amount.value().map(|f| (*t, f)))
        .collect();

    if highest {
        priced.sort_by(|a, b| b.1.total_cmp(&a.1));
    } else {
        priced.sort_by(|a, b| a.1.total_cmp(&b.1));
    }

    priced
        .into_iter()
        .take(n)
        .map(|(t, _)| TripRow::from_trip(t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::enrich_trips;
    use crate::filter::apply_filters;
    use crate::ingest::parse_timestamp;
    use crate::structs::{Trip, TripFilter};

    struct Row<'a> {
        request: &'a str,
        city: Option<&'a str>,
        product: &'a str,
        distance: Value<f64>,
        fare: Value<f64>,
        status: &'a str,
    }

    fn row<'a>(request: &'a str, city: &'a str, distance: f64, fare: f64) -> Row<'a> {
        Row {
            request,
            city: Some(city),
            product: "UberX",
            distance: Value::Present(distance),
            fare: Value::Present(fare),
            status: "COMPLETED",
        }
    }

    fn build(rows: Vec<Row<'_>>) -> Vec<EnrichedTrip> {
        let trips = rows
            .into_iter()
            .enumerate()
            .map(|(i, r)| Trip {
                row_index: i,
                request_time: parse_timestamp(r.request),
                begin_trip_time: parse_timestamp(r.request),
                dropoff_time: Value::Missing,
                city: r.city.map(str::to_string),
                product_type: Some(r.product.to_string()),
                distance: r.distance,
                fare_amount: r.fare,
                status: Some(r.status.to_string()),
            })
            .collect();
        enrich_trips(trips)
    }

    fn run(trips: &[EnrichedTrip]) -> Aggregates {
        let set = apply_filters(trips, &TripFilter::default(), 0.75);
        aggregate(&set, &TransformConfig::default())
    }

    #[test]
    fn test_value_counts_descending_with_stable_ties() {
        let values = ["b", "a", "b", "c", "a", "d"]
            .iter()
            .map(|s| Some(s.to_string()))
            .chain(std::iter::once(None));
        let counts = value_counts(values);
        let got: Vec<(&str, usize)> = counts
            .iter()
            .map(|c| (c.category.as_str(), c.count))
            .collect();
        assert_eq!(
            got,
            vec![("b", 2), ("a", 2), ("c", 1), ("d", 1), (MISSING_LABEL, 1)]
        );
    }

    #[test]
    fn test_mode_first_seen_wins() {
        assert_eq!(mode([3, 1, 1, 3, 2].into_iter()), Some(3));
        assert_eq!(mode([5, 7, 7].into_iter()), Some(7));
        assert_eq!(mode(std::iter::empty::<u32>()), None);
    }

    #[test]
    fn test_city_counts_sum_to_total() {
        let mut rows = vec![
            row("2024-01-01 08:00:00", "A", 1.0, 1.0),
            row("2024-01-01 09:00:00", "B", 1.0, 1.0),
            row("2024-01-01 10:00:00", "A", 1.0, 1.0),
        ];
        rows.push(Row {
            city: None,
            ..row("2024-01-01 11:00:00", "", 1.0, 1.0)
        });
        let agg = run(&build(rows));
        let sum: usize = agg.city_counts.iter().map(|c| c.count).sum();
        assert_eq!(sum, agg.metrics.total_trips);
        assert_eq!(agg.metrics.total_trips, 4);
        assert!(agg.city_counts.iter().any(|c| c.category == MISSING_LABEL));
    }

    #[test]
    fn test_sums_skip_missing_values() {
        let mut rows = vec![row("2024-01-01 08:00:00", "A", 2.5, 10.0)];
        rows.push(Row {
            distance: Value::Invalid("x".to_string()),
            fare: Value::Missing,
            ..row("2024-01-01 08:00:00", "A", 0.0, 0.0)
        });
        let agg = run(&build(rows));
        assert_eq!(agg.metrics.total_trips, 2);
        assert_eq!(agg.metrics.total_distance, 2.5);
        assert_eq!(agg.metrics.total_fare, 10.0);
    }

    #[test]
    fn test_group_means_sorted_with_missing_group() {
        let mut rows = vec![
            row("2024-01-01 08:00:00", "B", 8.0, 20.0),
            row("2024-01-01 08:00:00", "A", 10.0, 30.0),
            row("2024-01-01 08:00:00", "A", 14.0, 50.0),
        ];
        rows.push(Row {
            city: None,
            fare: Value::Missing,
            ..row("2024-01-01 08:00:00", "", 3.0, 0.0)
        });
        let agg = run(&build(rows));
        let fares: Vec<(&str, Option<f64>)> = agg
            .avg_fare_by_city
            .iter()
            .map(|g| (g.group.as_str(), g.mean))
            .collect();
        assert_eq!(
            fares,
            vec![("A", Some(40.0)), ("B", Some(20.0)), (MISSING_LABEL, None)]
        );
    }

    #[test]
    fn test_longest_average_distance_city() {
        let rows = vec![
            row("2024-01-01 08:00:00", "Short", 8.0, 1.0),
            row("2024-01-01 08:00:00", "Long", 10.0, 1.0),
            row("2024-01-01 08:00:00", "Long", 14.0, 1.0),
        ];
        let agg = run(&build(rows));
        let longest = agg.longest_distance_city.unwrap();
        assert_eq!(longest.group, "Long");
        assert_eq!(longest.mean, Some(12.0));
    }

    #[test]
    fn test_longest_average_tie_takes_first_key() {
        let means = vec![
            GroupMean {
                group: "Alpha".to_string(),
                mean: Some(5.0),
            },
            GroupMean {
                group: "Beta".to_string(),
                mean: Some(5.0),
            },
            GroupMean {
                group: MISSING_LABEL.to_string(),
                mean: Some(9.0),
            },
        ];
        assert_eq!(longest_average(&means).unwrap().group, "Alpha");
        assert_eq!(longest_average(&[]), None);
    }

    #[test]
    fn test_hour_ranges_always_listed() {
        let rows = vec![
            row("2024-01-01 07:00:00", "A", 1.0, 1.0),
            row("2024-01-01 08:00:00", "A", 1.0, 1.0),
            row("2024-01-01 23:00:00", "A", 1.0, 1.0),
        ];
        let agg = run(&build(rows));
        let got: Vec<(&str, usize)> = agg
            .hour_range_counts
            .iter()
            .map(|c| (c.category.as_str(), c.count))
            .collect();
        assert_eq!(
            got,
            vec![
                ("Morning (6-12)", 2),
                ("Evening (18-24)", 1),
                ("Night (0-6)", 0),
                ("Afternoon (12-18)", 0),
            ]
        );
    }

    #[test]
    fn test_zero_fare_is_exact() {
        let rows = vec![
            row("2024-01-01 08:00:00", "A", 1.0, 0.0),
            row("2024-01-01 08:00:00", "A", 1.0, 0.001),
        ];
        let agg = run(&build(rows));
        assert_eq!(agg.zero_fare_trips.len(), 1);
        assert_eq!(agg.zero_fare_trips[0].row_index, 0);
    }

    #[test]
    fn test_top_and_bottom_fares_tie_by_row_order() {
        let rows = vec![
            row("2024-01-01 08:00:00", "A", 1.0, 5.0),
            row("2024-01-01 08:00:00", "A", 1.0, 9.0),
            row("2024-01-01 08:00:00", "A", 1.0, 9.0),
            row("2024-01-01 08:00:00", "A", 1.0, 1.0),
            row("2024-01-01 08:00:00", "A", 1.0, 5.0),
        ];
        let trips = build(rows);
        let set = apply_filters(&trips, &TripFilter::default(), 0.75);
        let top: Vec<usize> = top_by_fare(&set.trips, 3, true)
            .iter()
            .map(|r| r.row_index)
            .collect();
        let bottom: Vec<usize> = top_by_fare(&set.trips, 3, false)
            .iter()
            .map(|r| r.row_index)
            .collect();
        assert_eq!(top, vec![1, 2, 0]);
        assert_eq!(bottom, vec![3, 0, 4]);
    }

    #[test]
    fn test_peaks_and_calendar_counts() {
        // 2024-01-01 Monday, 2024-02-06 Tuesday
        let rows = vec![
            row("2024-02-06 09:00:00", "A", 1.0, 1.0),
            row("2024-01-01 17:00:00", "A", 1.0, 1.0),
            row("2024-01-01 17:30:00", "A", 1.0, 1.0),
        ];
        let agg = run(&build(rows));
        assert_eq!(agg.peak_hour, Some(17));
        assert_eq!(agg.peak_day.as_deref(), Some("Monday"));
        assert_eq!(agg.hour_histogram.len(), 24);
        assert_eq!(agg.hour_histogram[17].count, 2);

        let months: Vec<(&str, usize)> = agg
            .month_counts
            .iter()
            .map(|c| (c.category.as_str(), c.count))
            .collect();
        assert_eq!(months, vec![("January", 2), ("February", 1)]);
    }

    #[test]
    fn test_scatter_trend_on_complete_pairs() {
        let mut rows = vec![
            row("2024-01-01 08:00:00", "A", 1.0, 12.0),
            row("2024-01-01 08:00:00", "A", 2.0, 14.0),
            row("2024-01-01 08:00:00", "A", 3.0, 16.0),
        ];
        rows.push(Row {
            fare: Value::Missing,
            ..row("2024-01-01 08:00:00", "A", 4.0, 0.0)
        });
        let agg = run(&build(rows));
        assert_eq!(agg.distance_vs_fare.points.len(), 3);
        let trend = agg.distance_vs_fare.trend.unwrap();
        assert!((trend.slope - 2.0).abs() < 1e-9);
        assert!((trend.intercept - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_set_degrades_gracefully() {
        let agg = run(&[]);
        assert_eq!(agg.metrics.total_trips, 0);
        assert_eq!(agg.metrics.total_fare, 0.0);
        assert!(agg.status_counts.is_empty());
        assert!(agg.avg_fare_by_city.is_empty());
        assert!(agg.longest_distance_city.is_none());
        assert!(agg.fare_histogram.is_empty());
        assert!(agg.duration_vs_fare.trend.is_none());
        assert!(agg.zero_fare_trips.is_empty());
        assert_eq!(agg.peak_hour, None);
        assert_eq!(agg.peak_day, None);
        assert!(agg.hour_range_counts.iter().all(|c| c.count == 0));
    }

    #[test]
    fn test_fare_categories_by_city() {
        let rows = vec![
            row("2024-01-01 08:00:00", "A", 1.0, 10.0),
            row("2024-01-01 08:00:00", "A", 1.0, 20.0),
            row("2024-01-01 08:00:00", "B", 1.0, 30.0),
            row("2024-01-01 08:00:00", "B", 1.0, 40.0),
            row("2024-01-01 08:00:00", "B", 1.0, 50.0),
        ];
        let agg = run(&build(rows));
        assert_eq!(agg.high_fare_threshold, Some(40.0));
        let got: Vec<(&str, FareCategory, usize)> = agg
            .fare_category_by_city
            .iter()
            .map(|s| (s.group.as_str(), s.series, s.count))
            .collect();
        assert_eq!(
            got,
            vec![
                ("A", FareCategory::Low, 2),
                ("B", FareCategory::High, 1),
                ("B", FareCategory::Low, 2),
            ]
        );
    }
}
