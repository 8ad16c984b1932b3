use crate::aggregate::{Aggregates, aggregate};
use crate::derive::enrich_trips;
use crate::error::Result;
use crate::filter::{SelectorOptions, apply_filters};
use crate::ingest::{LoadReport, LoadedTrips, read_trips_from_path};
use crate::structs::{EnrichedTrip, TransformConfig, TripFilter};
use log::debug;
use serde::Serialize;
use std::path::Path;

/// Output of one rendering pass.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub filter: TripFilter,
    pub selectors: SelectorOptions,
    pub data_quality: LoadReport,
    pub aggregates: Aggregates,
    /// The filtered trips, for the row-level exports
    #[serde(skip)]
    pub trips: Vec<EnrichedTrip>,
}

/// Processes a trips CSV into a dashboard for the given selectors.
///
/// This function reads the trip history, derives per-trip fields, applies the
/// city and product type selectors, and runs the full aggregation catalog over
/// the remaining trips.
///
/// # Arguments
///
/// * `file_path` - Path to the input CSV file
/// * `filter` - City and product type selections
/// * `config` - Fare quantile, table size and histogram settings
///
/// # Returns
///
/// Returns the `Dashboard` for this pass. An empty filtered set is not an error.
///
/// # Errors
///
/// Returns `PipelineError` if:
/// - The configuration is invalid
/// - File cannot be opened or read
/// - The file is not CSV or lacks a required column
pub fn process_data(
    file_path: &Path,
    filter: &TripFilter,
    config: &TransformConfig,
) -> Result<Dashboard> {
    config.validate()?;
    let loaded = read_trips_from_path(file_path)?;
    println!(
        "Loaded {} trips from {} ({} unparseable values)",
        loaded.trips.len(),
        file_path.display(),
        loaded.report.total_invalid()
    );
    Ok(build_dashboard(loaded, filter, config))
}

/// Derives, filters and aggregates already loaded trips.
pub fn build_dashboard(
    loaded: LoadedTrips,
    filter: &TripFilter,
    config: &TransformConfig,
) -> Dashboard {
    let LoadedTrips { trips, report } = loaded;

    let enriched = enrich_trips(trips);
    let selectors = SelectorOptions::from_trips(&enriched);
    selectors.warn_unknown(filter);

    let set = apply_filters(&enriched, filter, config.high_fare_quantile);
    println!(
        "Filters city={} product_type={} matched {} of {} trips",
        filter.city,
        filter.product_type,
        set.len(),
        enriched.len()
    );

    debug!("Starting aggregation");
    let aggregates = aggregate(&set, config);
    let trips: Vec<EnrichedTrip> = set.trips.iter().map(|t| (*t).clone()).collect();
    debug!("Aggregation completed");

    Dashboard {
        filter: filter.clone(),
        selectors,
        data_quality: report,
        aggregates,
        trips,
    }
}
