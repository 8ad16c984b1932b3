pub mod aggregate;
pub mod derive;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod load;
pub mod render;
pub mod stats;
pub mod structs;
pub mod transform;

// Re-export public API
pub use aggregate::{Aggregates, aggregate};
pub use error::{PipelineError, Result};
pub use filter::{FilteredSet, SelectorOptions, apply_filters};
pub use ingest::{LoadReport, LoadedTrips, read_trips, read_trips_from_path};
pub use load::{write_csv, write_html, write_json, write_parquet};
pub use render::render_html;
pub use structs::{Selector, SimpleLogger, TransformConfig, Trip, TripFilter, Value};
pub use transform::{Dashboard, build_dashboard, process_data};
