use std::{collections::HashMap, fs::File, path::Path, path::PathBuf};

use tracing::info;

use crate::config::PipelineConfig;
use crate::error::{EtlError, Result};

/// A row exactly as it appears in an input file: free-form field names,
/// string values, extra columns carried along untouched.
pub type RawRecord = HashMap<String, String>;

/// Enumerate the files under `data_dir` matching `file_pattern`. The order is
/// whatever the filesystem yields. Zero matches is not an error.
pub fn discover_files(config: &PipelineConfig) -> Result<Vec<PathBuf>> {
    let pattern = Path::new(&config.data_dir)
        .join(&config.file_pattern)
        .to_string_lossy()
        .into_owned();

    let paths = glob::glob(&pattern).map_err(|source| EtlError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| EtlError::Read {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;
        files.push(path);
    }
    Ok(files)
}

/// Parse every file as headered CSV and concatenate all rows into one
/// unordered collection.
pub fn read_raw_records(files: &[PathBuf]) -> Result<Vec<RawRecord>> {
    let mut rows: Vec<RawRecord> = Vec::new();
    for path in files {
        info!("extracting {}", path.display());
        let file = File::open(path).map_err(|source| EtlError::Read {
            path: path.clone(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);

        for row in reader.deserialize::<RawRecord>() {
            // fail if a file cannot be parsed, half a dataset is worse than none
            rows.push(row.map_err(|source| EtlError::Csv {
                path: path.clone(),
                source,
            })?);
        }
    }
    Ok(rows)
}
