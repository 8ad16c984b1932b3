use crate::derive::{fare_category, high_fare_threshold};
use crate::structs::{EnrichedTrip, FareCategory, Selector, TripFilter};
use log::{debug, warn};
use serde::Serialize;
use std::collections::HashSet;

/// Option sets for the two selector controls. Each list starts with "All".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectorOptions {
    pub cities: Vec<String>,
    pub product_types: Vec<String>,
}

impl SelectorOptions {
    /// Distinct present values in first-appearance order, behind an "All" entry.
    pub fn from_trips(trips: &[EnrichedTrip]) -> Self {
        Self {
            cities: distinct_with_all(trips.iter().map(|t| t.trip.city.as_deref())),
            product_types: distinct_with_all(trips.iter().map(|t| t.trip.product_type.as_deref())),
        }
    }

    /// Logs selector values that no loaded row carries. Such a filter yields no rows.
    pub fn warn_unknown(&self, filter: &TripFilter) {
        if let Selector::Value(city) = &filter.city {
            if !self.cities.contains(city) {
                warn!("City {:?} does not occur in the data; no trips will match", city);
            }
        }
        if let Selector::Value(product) = &filter.product_type {
            if !self.product_types.contains(product) {
                warn!(
                    "Product type {:?} does not occur in the data; no trips will match",
                    product
                );
            }
        }
    }
}

fn distinct_with_all<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = vec!["All".to_string()];
    for value in values.flatten() {
        if seen.insert(value) {
            out.push(value.to_string());
        }
    }
    out
}

/// The trips left after filtering, plus the fare threshold of exactly that population.
#[derive(Debug, Clone)]
pub struct FilteredSet<'a> {
    pub trips: Vec<&'a EnrichedTrip>,
    pub high_fare_threshold: Option<f64>,
}

impl FilteredSet<'_> {
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn fare_category(&self, trip: &EnrichedTrip) -> FareCategory {
        fare_category(trip.trip.fare_amount.value(), self.high_fare_threshold)
    }
}

/// Keeps the rows matching both selectors and recomputes the high fare threshold
/// over the result.
pub fn apply_filters<'a>(
    trips: &'a [EnrichedTrip],
    filter: &TripFilter,
    high_fare_quantile: f64,
) -> FilteredSet<'a> {
    let kept: Vec<&EnrichedTrip> = trips
        .iter()
        .filter(|t| filter.city.matches(t.trip.city.as_deref()))
        .filter(|t| filter.product_type.matches(t.trip.product_type.as_deref()))
        .collect();

    let threshold = high_fare_threshold(&kept, high_fare_quantile);
    debug!(
        "Filter city={} product_type={} kept {} of {} trips (high fare threshold {:?})",
        filter.city,
        filter.product_type,
        kept.len(),
        trips.len(),
        threshold
    );

    FilteredSet {
        trips: kept,
        high_fare_threshold: threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::enrich_trips;
    use crate::structs::{Trip, Value};

    fn sample() -> Vec<EnrichedTrip> {
        let rows = [
            ("A", "UberX", 10.0),
            ("A", "Pool", 20.0),
            ("B", "UberX", 30.0),
            ("A", "UberX", 40.0),
            ("B", "Pool", 50.0),
        ];
        let trips = rows
            .iter()
            .enumerate()
            .map(|(i, (city, product, fare))| Trip {
                row_index: i,
                request_time: Value::Missing,
                begin_trip_time: Value::Missing,
                dropoff_time: Value::Missing,
                city: Some(city.to_string()),
                product_type: Some(product.to_string()),
                distance: Value::Missing,
                fare_amount: Value::Present(*fare),
                status: None,
            })
            .collect();
        enrich_trips(trips)
    }

    fn rows(set: &FilteredSet<'_>) -> Vec<usize> {
        set.trips.iter().map(|t| t.trip.row_index).collect()
    }

    fn city(c: &str) -> TripFilter {
        TripFilter {
            city: Selector::Value(c.to_string()),
            product_type: Selector::All,
        }
    }

    #[test]
    fn test_selector_options_first_appearance() {
        let options = SelectorOptions::from_trips(&sample());
        assert_eq!(options.cities, vec!["All", "A", "B"]);
        assert_eq!(options.product_types, vec!["All", "UberX", "Pool"]);
    }

    #[test]
    fn test_all_is_noop() {
        let trips = sample();
        let set = apply_filters(&trips, &TripFilter::default(), 0.75);
        assert_eq!(set.len(), trips.len());
    }

    #[test]
    fn test_filters_commute_and_are_idempotent() {
        let trips = sample();
        let both = TripFilter {
            city: Selector::Value("A".to_string()),
            product_type: Selector::Value("UberX".to_string()),
        };
        let set = apply_filters(&trips, &both, 0.75);
        assert_eq!(rows(&set), vec![0, 3]);

        // filtering the already filtered rows again changes nothing
        let owned: Vec<EnrichedTrip> = set.trips.iter().map(|t| (*t).clone()).collect();
        let again = apply_filters(&owned, &both, 0.75);
        assert_eq!(rows(&again), vec![0, 3]);

        // product first, then city
        let product_only = TripFilter {
            city: Selector::All,
            product_type: Selector::Value("UberX".to_string()),
        };
        let step: Vec<EnrichedTrip> = apply_filters(&trips, &product_only, 0.75)
            .trips
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(rows(&apply_filters(&step, &city("A"), 0.75)), vec![0, 3]);
    }

    #[test]
    fn test_threshold_recomputed_per_filter() {
        let trips = sample();
        let all = apply_filters(&trips, &TripFilter::default(), 0.75);
        let only_a = apply_filters(&trips, &city("A"), 0.75);
        // fares 10..50 -> 40.0; city A fares 10,20,40 -> 30.0
        assert_eq!(all.high_fare_threshold, Some(40.0));
        assert_eq!(only_a.high_fare_threshold, Some(30.0));

        let high: Vec<usize> = only_a
            .trips
            .iter()
            .filter(|t| only_a.fare_category(t) == FareCategory::High)
            .map(|t| t.trip.row_index)
            .collect();
        assert_eq!(high, vec![3]);
    }

    #[test]
    fn test_unknown_value_yields_empty_set() {
        let trips = sample();
        let set = apply_filters(&trips, &city("Nowhere"), 0.75);
        assert!(set.is_empty());
        assert_eq!(set.high_fare_threshold, None);
    }
}
