/// Pipeline configuration, passed explicitly into each stage so the pipeline
/// can be driven in tests without touching the environment.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory scanned for input files.
    pub data_dir: String,
    /// Filename glob applied inside `data_dir`.
    pub file_pattern: String,
    /// SQLite path, or `:memory:` for an in-process store.
    pub connection_string: String,
    /// Append-only raw facts table.
    pub raw_table_name: String,
    /// Daily rollup table, fully replaced each run.
    pub daily_table_name: String,
    /// Monthly rollup table, fully replaced each run.
    pub monthly_table_name: String,
    /// Directory the rendered charts are written to.
    pub chart_dir: String,
    /// Charts are a terminal side effect; tests switch them off.
    pub render_charts: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: String::from("."),
            file_pattern: String::from("*.csv"),
            connection_string: String::from("sales.db"),
            raw_table_name: String::from("raw_sales"),
            daily_table_name: String::from("daily_sales"),
            monthly_table_name: String::from("monthly_sales"),
            chart_dir: String::from("."),
            render_charts: true,
        }
    }
}
