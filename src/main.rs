use std::process;

use sales_etl_lib::{run_pipeline, PipelineConfig};
use tracing::{error, info};

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let config = PipelineConfig::default();
    match run_pipeline(&config) {
        Ok(summary) if summary.rows_loaded == 0 => {
            info!(
                "no sales data found, add {} files to {}",
                config.file_pattern, config.data_dir
            );
        }
        Ok(summary) => {
            info!(
                "loaded {} rows into {} daily and {} monthly buckets",
                summary.rows_loaded, summary.daily_buckets, summary.monthly_buckets
            );
        }
        Err(e) => {
            error!("pipeline failed: {e}");
            process::exit(1);
        }
    }
}
