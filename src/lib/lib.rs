mod aggregate;
mod chart;
mod config;
mod error;
mod io;
mod normalize;
mod store;
mod types;
mod utils;

use tracing::info;

pub use config::PipelineConfig;
pub use error::{EtlError, Result};
pub use store::SalesStore;
pub use types::{
    DailyAggregate, MonetaryAmount, MonthlyAggregate, NormalizedRecord, RunSummary, SalesReport,
};

/// Run the whole batch once: read, normalize, aggregate, persist, render.
/// Strictly sequential, single attempt; any failure aborts the run. Zero
/// matching input files is not an error, and neither is a set of files that
/// carry headers but no rows — either way the run exits early having touched
/// nothing, not even the store, so prior aggregates stay intact.
pub fn run_pipeline(config: &PipelineConfig) -> Result<RunSummary> {
    let files = io::discover_files(config)?;
    if files.is_empty() {
        info!(
            "no files matching {} in {}, nothing to process",
            config.file_pattern, config.data_dir
        );
        return Ok(RunSummary::default());
    }

    let raw = io::read_raw_records(&files)?;
    if raw.is_empty() {
        info!(
            "{} matching files contained no sales rows, nothing to process",
            files.len()
        );
        return Ok(RunSummary {
            files_read: files.len(),
            ..RunSummary::default()
        });
    }
    let records = normalize::normalize(raw)?;
    let report = aggregate::rollup(&records);

    let mut store = SalesStore::open(&config.connection_string)?;
    store.init_schema(config)?;
    store.load(&records, &report, config)?;

    if config.render_charts {
        chart::render_charts(&store, config)?;
    }

    Ok(RunSummary {
        files_read: files.len(),
        rows_loaded: records.len(),
        daily_buckets: report.daily.len(),
        monthly_buckets: report.monthly.len(),
    })
}
