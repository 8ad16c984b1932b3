use crate::error::{PipelineError, Result};
use chrono::{Month, NaiveDateTime, Weekday};
use log::{Level, Log, Metadata, Record as LogRecord};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Simple logger implementation
///
/// Warnings and errors go to stderr so they stay visible when stdout is piped.
pub struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &LogRecord) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if record.level() <= Level::Warn {
            eprintln!("[{}] {}", record.level(), record.args());
        } else {
            println!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// A coerced field: either a usable value, an empty cell, or text that failed coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<T> {
    Present(T),
    Missing,
    Invalid(String),
}

impl<T> Value<T> {
    /// Returns the value if present. Missing and invalid cells both yield `None`.
    pub fn get(&self) -> Option<&T> {
        match self {
            Value::Present(v) => Some(v),
            Value::Missing | Value::Invalid(_) => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Value::Present(_))
    }
}

impl<T: Copy> Value<T> {
    pub fn value(&self) -> Option<T> {
        self.get().copied()
    }
}

/// One trip as loaded from the input file, before any derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    /// Position in the loaded file (0-based, header excluded)
    pub row_index: usize,
    pub request_time: Value<NaiveDateTime>,
    pub begin_trip_time: Value<NaiveDateTime>,
    pub dropoff_time: Value<NaiveDateTime>,
    pub city: Option<String>,
    pub product_type: Option<String>,
    pub distance: Value<f64>,
    pub fare_amount: Value<f64>,
    pub status: Option<String>,
}

/// Time-of-day bucket for the request hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HourRange {
    Night,
    Morning,
    Afternoon,
    Evening,
}

impl HourRange {
    pub const ALL: [HourRange; 4] = [
        HourRange::Night,
        HourRange::Morning,
        HourRange::Afternoon,
        HourRange::Evening,
    ];

    /// Buckets an hour using right-exclusive ranges: [0,6) [6,12) [12,18) [18,24).
    pub fn from_hour(hour: u32) -> Option<Self> {
        match hour {
            0..6 => Some(HourRange::Night),
            6..12 => Some(HourRange::Morning),
            12..18 => Some(HourRange::Afternoon),
            18..24 => Some(HourRange::Evening),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HourRange::Night => "Night (0-6)",
            HourRange::Morning => "Morning (6-12)",
            HourRange::Afternoon => "Afternoon (12-18)",
            HourRange::Evening => "Evening (18-24)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FareCategory {
    #[serde(rename = "High Fare")]
    High,
    #[serde(rename = "Low Fare")]
    Low,
}

impl FareCategory {
    pub fn label(&self) -> &'static str {
        match self {
            FareCategory::High => "High Fare",
            FareCategory::Low => "Low Fare",
        }
    }
}

/// Per-trip fields computed from the loaded columns.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedFields {
    pub hour: Option<u32>,
    pub day_of_week: Option<Weekday>,
    pub month: Option<Month>,
    pub ride_duration_minutes: Option<f64>,
    pub fare_per_km: Option<f64>,
    pub hour_range: Option<HourRange>,
}

/// A loaded trip together with its row-local derived fields.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTrip {
    pub trip: Trip,
    pub derived: DerivedFields,
}

/// Equality predicate on one text column. `All` keeps every row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum Selector {
    #[default]
    All,
    Value(String),
}

impl Selector {
    pub fn matches(&self, field: Option<&str>) -> bool {
        match self {
            Selector::All => true,
            Selector::Value(wanted) => field == Some(wanted.as_str()),
        }
    }
}

impl FromStr for Selector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == "All" {
            Ok(Selector::All)
        } else {
            Ok(Selector::Value(s.to_string()))
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str("All"),
            Selector::Value(v) => f.write_str(v),
        }
    }
}

/// The city and product type selections for one rendering pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TripFilter {
    pub city: Selector,
    pub product_type: Selector,
}

/// Configuration for data transformation
#[derive(Debug, Clone)]
pub struct TransformConfig {
    /// Quantile of the filtered fares above which a trip counts as high fare
    pub high_fare_quantile: f64,
    /// Rows shown in the most expensive / cheapest tables
    pub top_n: usize,
    /// Bin count for the continuous histograms
    pub histogram_bins: usize,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            high_fare_quantile: 0.75,
            top_n: 5,
            histogram_bins: 30,
        }
    }
}

impl TransformConfig {
    /// Rejects settings that would make the aggregations meaningless.
    ///
    /// # Errors
    /// Returns `PipelineError::Config` if the quantile lies outside `[0, 1]` or no
    /// histogram bins are requested.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.high_fare_quantile) {
            return Err(PipelineError::Config(format!(
                "high fare quantile must be within [0, 1], got {}",
                self.high_fare_quantile
            )));
        }
        if self.histogram_bins == 0 {
            return Err(PipelineError::Config(
                "histogram bins must be at least 1".to_string(),
            ));
        }
        if self.top_n == 0 {
            return Err(PipelineError::Config(
                "top n must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
