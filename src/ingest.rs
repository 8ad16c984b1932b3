use crate::error::{PipelineError, Result};
use crate::structs::{Trip, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const REQUEST_TIME: &str = "request_time";
pub const BEGIN_TRIP_TIME: &str = "begin_trip_time";
pub const DROPOFF_TIME: &str = "dropoff_time";
pub const CITY: &str = "city";
pub const PRODUCT_TYPE: &str = "product_type";
pub const DISTANCE: &str = "distance";
pub const FARE_AMOUNT: &str = "fare_amount";
pub const STATUS: &str = "status";

/// Columns the input file must carry. Any others are ignored.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    REQUEST_TIME,
    BEGIN_TRIP_TIME,
    DROPOFF_TIME,
    CITY,
    PRODUCT_TYPE,
    DISTANCE,
    FARE_AMOUNT,
    STATUS,
];

// Tried in order after RFC 3339 and after stripping a trailing " UTC".
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f %z", "%Y-%m-%dT%H:%M:%S%.f%z"];
const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Per-column coercion outcome of one load.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    pub rows: usize,
    /// Non-empty cells that could not be coerced, by column
    pub invalid: BTreeMap<String, usize>,
    /// Empty cells, by column
    pub missing: BTreeMap<String, usize>,
}

impl LoadReport {
    fn record<T>(&mut self, column: &str, row: usize, value: &Value<T>) {
        match value {
            Value::Present(_) => {}
            Value::Missing => *self.missing.entry(column.to_string()).or_default() += 1,
            Value::Invalid(raw) => {
                debug!("Row {}: could not coerce {} value {:?}", row, column, raw);
                *self.invalid.entry(column.to_string()).or_default() += 1;
            }
        }
    }

    fn record_text(&mut self, column: &str, value: &Option<String>) {
        if value.is_none() {
            *self.missing.entry(column.to_string()).or_default() += 1;
        }
    }

    pub fn total_invalid(&self) -> usize {
        self.invalid.values().sum()
    }
}

/// Everything the loader produces: the immutable trip list plus its coercion report.
#[derive(Debug, Clone)]
pub struct LoadedTrips {
    pub trips: Vec<Trip>,
    pub report: LoadReport,
}

/// Reads trips from a CSV file on disk.
///
/// # Errors
/// Returns `PipelineError::Io` if the file cannot be opened, and
/// `PipelineError::Schema` for the cases described on [`read_trips`].
pub fn read_trips_from_path(path: &Path) -> Result<LoadedTrips> {
    debug!("Reading CSV file: {}", path.display());
    let file = File::open(path)?;
    read_trips(file)
}

/// Parses CSV trip data into typed rows.
///
/// Timestamp and numeric cells that fail coercion become [`Value::Invalid`] and the
/// row is kept. Rows shorter than the header get [`Value::Missing`] for the absent
/// trailing fields.
///
/// # Errors
/// Returns `PipelineError::Schema` if a required column is absent or the input is
/// not readable as CSV. No partial dataset is returned in either case.
pub fn read_trips<R: Read>(reader: R) -> Result<LoadedTrips> {
    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| PipelineError::Schema(format!("unreadable header row: {}", e)))?
        .clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut trips = Vec::new();
    let mut report = LoadReport::default();

    for (row, result) in csv_reader.records().enumerate() {
        let record =
            result.map_err(|e| PipelineError::Schema(format!("row {}: {}", row + 1, e)))?;
        let trip = columns.parse_row(row, &record);

        report.record(REQUEST_TIME, row, &trip.request_time);
        report.record(BEGIN_TRIP_TIME, row, &trip.begin_trip_time);
        report.record(DROPOFF_TIME, row, &trip.dropoff_time);
        report.record(DISTANCE, row, &trip.distance);
        report.record(FARE_AMOUNT, row, &trip.fare_amount);
        report.record_text(CITY, &trip.city);
        report.record_text(PRODUCT_TYPE, &trip.product_type);
        report.record_text(STATUS, &trip.status);

        trips.push(trip);
    }
    report.rows = trips.len();

    for (column, count) in &report.invalid {
        warn!(
            "{} value(s) in column {} could not be coerced and are treated as missing",
            count, column
        );
    }
    debug!("Loaded {} trips", trips.len());

    Ok(LoadedTrips { trips, report })
}

/// Positions of the required columns in the header row.
struct ColumnIndex {
    request_time: usize,
    begin_trip_time: usize,
    dropoff_time: usize,
    city: usize,
    product_type: usize,
    distance: usize,
    fare_amount: usize,
    status: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| find(name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(PipelineError::Schema(format!(
                "missing required column(s): {}",
                missing.join(", ")
            )));
        }

        let index = |name: &str| {
            find(name).ok_or_else(|| PipelineError::Schema(format!("missing column {}", name)))
        };
        Ok(Self {
            request_time: index(REQUEST_TIME)?,
            begin_trip_time: index(BEGIN_TRIP_TIME)?,
            dropoff_time: index(DROPOFF_TIME)?,
            city: index(CITY)?,
            product_type: index(PRODUCT_TYPE)?,
            distance: index(DISTANCE)?,
            fare_amount: index(FARE_AMOUNT)?,
            status: index(STATUS)?,
        })
    }

    fn parse_row(&self, row: usize, record: &StringRecord) -> Trip {
        let cell = |idx: usize| record.get(idx).unwrap_or("");
        Trip {
            row_index: row,
            request_time: parse_timestamp(cell(self.request_time)),
            begin_trip_time: parse_timestamp(cell(self.begin_trip_time)),
            dropoff_time: parse_timestamp(cell(self.dropoff_time)),
            city: parse_text(cell(self.city)),
            product_type: parse_text(cell(self.product_type)),
            distance: parse_number(cell(self.distance)),
            fare_amount: parse_number(cell(self.fare_amount)),
            status: parse_text(cell(self.status)),
        }
    }
}

fn parse_text(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Coerces a cell to a finite number. `NaN` and infinities count as invalid.
pub fn parse_number(raw: &str) -> Value<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Missing;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Value::Present(v),
        _ => Value::Invalid(raw.to_string()),
    }
}

/// Coerces a cell to a timestamp. Offset-bearing values are converted to UTC.
pub fn parse_timestamp(raw: &str) -> Value<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Missing;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Value::Present(dt.naive_utc());
    }

    let s = trimmed.strip_suffix("UTC").unwrap_or(trimmed).trim_end();

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Value::Present(dt.naive_utc());
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Value::Present(dt);
        }
    }
    if let Some(dt) = NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Value::Present(dt);
    }

    Value::Invalid(raw.to_string())
}
