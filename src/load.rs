use crate::derive::{fare_category, weekday_name};
use crate::error::Result;
use crate::render::render_html;
use crate::structs::{EnrichedTrip, Value};
use crate::transform::Dashboard;
use arrow_array::{
    Float64Array, RecordBatch, StringArray, TimestampMicrosecondArray, UInt32Array, UInt64Array,
};
use arrow_schema::{DataType, Field, Schema, TimeUnit};
use chrono::NaiveDateTime;
use csv::Writer;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use std::{fs, fs::File, path::Path, sync::Arc};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes the rendered dashboard page.
///
/// # Errors
/// Returns error if the file cannot be written.
pub fn write_html(dashboard: &Dashboard, output_path: &Path) -> Result<()> {
    fs::write(output_path, render_html(dashboard))?;
    Ok(())
}

/// Writes the dashboard summaries to a pretty-formatted JSON file.
///
/// # Arguments
/// * `dashboard` - Aggregation results of one pass
/// * `output_path` - Path where the JSON file will be created
///
/// # Errors
/// Returns error if file cannot be created or serialization fails.
pub fn write_json(dashboard: &Dashboard, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    serde_json::to_writer_pretty(file, dashboard)?;
    Ok(())
}

/// Writes the filtered trips with their derived fields to a CSV file.
///
/// Missing values are written as empty cells.
///
/// # Arguments
/// * `dashboard` - Dashboard whose filtered trips are exported
/// * `output_path` - Path where the CSV file will be created
///
/// # Errors
/// Returns error if file cannot be created or written to.
pub fn write_csv(dashboard: &Dashboard, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = Writer::from_writer(file);
    let threshold = dashboard.aggregates.high_fare_threshold;

    writer.write_record([
        "row_index",
        "request_time",
        "begin_trip_time",
        "dropoff_time",
        "city",
        "product_type",
        "distance",
        "fare_amount",
        "status",
        "hour",
        "day_of_week",
        "month",
        "ride_duration",
        "fare_per_km",
        "hour_range",
        "fare_category",
    ])?;

    for t in &dashboard.trips {
        let d = &t.derived;
        writer.write_record(&[
            t.trip.row_index.to_string(),
            timestamp_text(&t.trip.request_time),
            timestamp_text(&t.trip.begin_trip_time),
            timestamp_text(&t.trip.dropoff_time),
            t.trip.city.clone().unwrap_or_default(),
            t.trip.product_type.clone().unwrap_or_default(),
            number_text(t.trip.distance.value()),
            number_text(t.trip.fare_amount.value()),
            t.trip.status.clone().unwrap_or_default(),
            d.hour.map(|h| h.to_string()).unwrap_or_default(),
            d.day_of_week.map(weekday_name).unwrap_or_default().to_string(),
            d.month.map(|m| m.name()).unwrap_or_default().to_string(),
            number_text(d.ride_duration_minutes),
            number_text(d.fare_per_km),
            d.hour_range.map(|r| r.label()).unwrap_or_default().to_string(),
            category(t, threshold).to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the filtered trips with their derived fields to a columnar Parquet file
/// using Arrow format. Missing values become nulls.
///
/// # Arguments
/// * `dashboard` - Dashboard whose filtered trips are exported
/// * `output_path` - Path where the Parquet file will be created
///
/// # Errors
/// Returns error if file cannot be created, schema is invalid, or Arrow operations fail.
pub fn write_parquet(dashboard: &Dashboard, output_path: &Path) -> Result<()> {
    let ts_type = DataType::Timestamp(TimeUnit::Microsecond, None);
    let schema = Arc::new(Schema::new(vec![
        Field::new("row_index", DataType::UInt64, false),
        Field::new("request_time", ts_type.clone(), true),
        Field::new("begin_trip_time", ts_type.clone(), true),
        Field::new("dropoff_time", ts_type, true),
        Field::new("city", DataType::Utf8, true),
        Field::new("product_type", DataType::Utf8, true),
        Field::new("distance", DataType::Float64, true),
        Field::new("fare_amount", DataType::Float64, true),
        Field::new("status", DataType::Utf8, true),
        Field::new("hour", DataType::UInt32, true),
        Field::new("day_of_week", DataType::Utf8, true),
        Field::new("month", DataType::Utf8, true),
        Field::new("ride_duration", DataType::Float64, true),
        Field::new("fare_per_km", DataType::Float64, true),
        Field::new("hour_range", DataType::Utf8, true),
        Field::new("fare_category", DataType::Utf8, false),
    ]));

    let trips = &dashboard.trips;
    let threshold = dashboard.aggregates.high_fare_threshold;

    let row_indices: UInt64Array = trips.iter().map(|t| t.trip.row_index as u64).collect();
    let request_times = timestamp_array(trips, |t| &t.trip.request_time);
    let begin_times = timestamp_array(trips, |t| &t.trip.begin_trip_time);
    let dropoff_times = timestamp_array(trips, |t| &t.trip.dropoff_time);
    let cities: StringArray = trips.iter().map(|t| t.trip.city.as_deref()).collect();
    let products: StringArray = trips.iter().map(|t| t.trip.product_type.as_deref()).collect();
    let distances: Float64Array = trips.iter().map(|t| t.trip.distance.value()).collect();
    let fares: Float64Array = trips.iter().map(|t| t.trip.fare_amount.value()).collect();
    let statuses: StringArray = trips.iter().map(|t| t.trip.status.as_deref()).collect();
    let hours: UInt32Array = trips.iter().map(|t| t.derived.hour).collect();
    let days: StringArray = trips
        .iter()
        .map(|t| t.derived.day_of_week.map(weekday_name))
        .collect();
    let months: StringArray = trips
        .iter()
        .map(|t| t.derived.month.map(|m| m.name()))
        .collect();
    let durations: Float64Array = trips
        .iter()
        .map(|t| t.derived.ride_duration_minutes)
        .collect();
    let fare_per_km: Float64Array = trips.iter().map(|t| t.derived.fare_per_km).collect();
    let hour_ranges: StringArray = trips
        .iter()
        .map(|t| t.derived.hour_range.map(|r| r.label()))
        .collect();
    let categories: StringArray =
        StringArray::from_iter_values(trips.iter().map(|t| category(t, threshold)));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(row_indices),
            Arc::new(request_times),
            Arc::new(begin_times),
            Arc::new(dropoff_times),
            Arc::new(cities),
            Arc::new(products),
            Arc::new(distances),
            Arc::new(fares),
            Arc::new(statuses),
            Arc::new(hours),
            Arc::new(days),
            Arc::new(months),
            Arc::new(durations),
            Arc::new(fare_per_km),
            Arc::new(hour_ranges),
            Arc::new(categories),
        ],
    )?;

    let file = File::create(output_path)?;
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}

fn category(t: &EnrichedTrip, threshold: Option<f64>) -> &'static str {
    fare_category(t.trip.fare_amount.value(), threshold).label()
}

fn timestamp_array(
    trips: &[EnrichedTrip],
    field: impl Fn(&EnrichedTrip) -> &Value<NaiveDateTime>,
) -> TimestampMicrosecondArray {
    trips
        .iter()
        .map(|t| field(t).get().map(|dt| dt.and_utc().timestamp_micros()))
        .collect()
}

fn timestamp_text(value: &Value<NaiveDateTime>) -> String {
    value
        .get()
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

fn number_text(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
