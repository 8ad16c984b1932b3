use crate::stats::quantile;
use crate::structs::{DerivedFields, EnrichedTrip, FareCategory, HourRange, Trip};
use chrono::{Datelike, Month, Timelike, Weekday};
use log::debug;
use rayon::prelude::*;

/// Attaches the row-local derived fields to every trip, preserving load order.
pub fn enrich_trips(trips: Vec<Trip>) -> Vec<EnrichedTrip> {
    debug!("Deriving fields for {} trips", trips.len());
    trips
        .into_par_iter()
        .map(|trip| {
            let derived = derive_fields(&trip);
            EnrichedTrip { trip, derived }
        })
        .collect()
}

/// Computes every derived field that depends only on the trip itself.
pub fn derive_fields(trip: &Trip) -> DerivedFields {
    let request = trip.request_time.value();
    let hour = request.map(|dt| dt.hour());

    DerivedFields {
        hour,
        day_of_week: request.map(|dt| dt.weekday()),
        month: request.and_then(|dt| Month::try_from(dt.month() as u8).ok()),
        ride_duration_minutes: ride_duration_minutes(trip),
        fare_per_km: fare_per_km(trip.fare_amount.value(), trip.distance.value()),
        hour_range: hour.and_then(HourRange::from_hour),
    }
}

/// Minutes between trip begin and dropoff. Negative spans are passed through.
pub fn ride_duration_minutes(trip: &Trip) -> Option<f64> {
    let begin = trip.begin_trip_time.value()?;
    let end = trip.dropoff_time.value()?;
    let elapsed = end - begin;
    let seconds = elapsed.num_milliseconds() as f64 / 1000.0;
    Some(seconds / 60.0)
}

/// Fare divided by distance; undefined when either is missing or distance is zero.
pub fn fare_per_km(fare: Option<f64>, distance: Option<f64>) -> Option<f64> {
    match (fare, distance) {
        (Some(fare), Some(distance)) if distance != 0.0 => Some(fare / distance),
        _ => None,
    }
}

/// The fare above which a trip in `trips` is "High Fare".
///
/// Always computed over the set passed in, so it must be called again whenever the
/// filtered population changes. `None` when no trip has a usable fare.
pub fn high_fare_threshold(trips: &[&EnrichedTrip], q: f64) -> Option<f64> {
    let fares: Vec<f64> = trips
        .iter()
        .filter_map(|t| t.trip.fare_amount.value())
        .collect();
    quantile(&fares, q)
}

/// Strictly above the threshold is high; missing fares and a missing threshold are low.
pub fn fare_category(fare: Option<f64>, threshold: Option<f64>) -> FareCategory {
    match (fare, threshold) {
        (Some(fare), Some(threshold)) if fare > threshold => FareCategory::High,
        _ => FareCategory::Low,
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
