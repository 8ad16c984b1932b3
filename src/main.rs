use clap::Parser;
use lib::{
    PipelineError, Selector, SimpleLogger, TransformConfig, TripFilter, process_data,
    render::{format_rounded, format_thousands},
    write_csv, write_html, write_json, write_parquet,
};
use log::debug;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

static LOGGER: SimpleLogger = SimpleLogger;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// input trips CSV file (request_time, begin_trip_time, dropoff_time, city,
    /// product_type, distance, fare_amount, status)
    #[arg(short, long)]
    input_file: PathBuf,

    /// Output base name (will create dir containing .html, .json, .csv, and .parquet files)
    #[arg(short, long, default_value = "dashboard")]
    output: String,

    /// City to restrict the dashboard to, or "All"
    #[arg(long, default_value = "All")]
    city: Selector,

    /// Product type to restrict the dashboard to, or "All"
    #[arg(long, default_value = "All")]
    product_type: Selector,

    /// Fare quantile above which a trip counts as high fare
    #[arg(long, default_value_t = 0.75)]
    high_fare_quantile: f64,

    /// Number of rows in the most expensive / cheapest trip tables
    #[arg(long, default_value_t = 5)]
    top_n: usize,

    /// Bin count for the fare, duration and fare per km histograms
    #[arg(long, default_value_t = 30)]
    bins: usize,

    /// Log level for output
    #[arg(long, default_value = "false")]
    debug: bool,
}

fn main() -> Result<(), PipelineError> {
    // Initialize timer and logger
    let total_start = Instant::now();
    log::set_logger(&LOGGER)
        .map_err(|e| PipelineError::Config(format!("logger already set: {}", e)))?;

    // Acquire CLI args
    let args = Args::parse();
    if args.debug {
        log::set_max_level(log::LevelFilter::Debug);
    } else {
        log::set_max_level(log::LevelFilter::Info);
    }

    // UI
    println!("Tripboard! Trip Data Analysis Dashboard");
    debug!(
        "Input file: {} | City: {} | Product type: {}",
        args.input_file.display(),
        args.city,
        args.product_type
    );

    let config = TransformConfig {
        high_fare_quantile: args.high_fare_quantile,
        top_n: args.top_n,
        histogram_bins: args.bins,
    };
    debug!(
        "Creating transformation configuration | Quantile={}, TopN={}, Bins={}",
        config.high_fare_quantile, config.top_n, config.histogram_bins
    );
    let filter = TripFilter {
        city: args.city,
        product_type: args.product_type,
    };

    // Run the pipeline
    println!("Starting data processing...");
    let processing_start = Instant::now();
    let dashboard = process_data(&args.input_file, &filter, &config)?;
    let processing_time = processing_start.elapsed();
    println!(
        "Data processing completed in {:.2?} | {} trips after filtering",
        processing_time,
        dashboard.trips.len()
    );

    // Create output directory
    let output_dir = PathBuf::from(format!("./output/{}", args.output));
    fs::create_dir_all(&output_dir)?;
    println!(
        "Created output directory: {} | Writing output files...",
        output_dir.display()
    );
    let io_start = Instant::now();

    // Extract just the directory name for the file names (remove path separators)
    let output_name = args
        .output
        .split(['/', '\\'])
        .next_back()
        .unwrap_or(&args.output);
    let html_path = output_dir.join(format!("{}.html", output_name));
    let json_path = output_dir.join(format!("{}.json", output_name));
    let csv_path = output_dir.join(format!("{}.csv", output_name));
    let parquet_path = output_dir.join(format!("{}.parquet", output_name));

    let html_start = Instant::now();
    write_html(&dashboard, &html_path)?;
    println!("HTML write took {:.2?}", html_start.elapsed());

    let json_start = Instant::now();
    write_json(&dashboard, &json_path)?;
    println!("JSON write took {:.2?}", json_start.elapsed());

    let csv_start = Instant::now();
    write_csv(&dashboard, &csv_path)?;
    println!("CSV write took {:.2?}", csv_start.elapsed());

    let parquet_start = Instant::now();
    write_parquet(&dashboard, &parquet_path)?;
    println!("Parquet write took {:.2?}", parquet_start.elapsed());

    let io_time = io_start.elapsed();
    println!("All files took {:.2?}", io_time);
    println!("\nWrote files to directory: {}", output_dir.display());
    debug!("  - {}", html_path.display());
    debug!("  - {}", json_path.display());
    debug!("  - {}", csv_path.display());
    debug!("  - {}", parquet_path.display());

    // Show summary
    let metrics = &dashboard.aggregates.metrics;
    println!("\nKey Trip Insights");
    println!("  Total Trips: {}", metrics.total_trips);
    println!(
        "  Total Distance Traveled (km): {}",
        format_rounded(metrics.total_distance)
    );
    println!(
        "  Total Fare Spent: {}",
        format_thousands(metrics.total_fare)
    );

    let total_time = total_start.elapsed();
    println!("Pipeline completed successfully in {:.2?}", total_time);
    debug!(
        "Performance breakdown: Processing={:.1}%, IO={:.1}%",
        (processing_time.as_secs_f64() / total_time.as_secs_f64()) * 100.0,
        (io_time.as_secs_f64() / total_time.as_secs_f64()) * 100.0
    );

    Ok(())
}
