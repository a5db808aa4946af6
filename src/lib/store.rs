use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::types::{NormalizedRecord, SalesReport};

/// Persistence adapter. Only this module talks SQL; the connection lives for
/// the duration of the write phase and is released when the store is dropped.
/// An uncommitted transaction rolls back on drop, so a mid-run failure never
/// leaves a half-updated aggregate table.
pub struct SalesStore {
    conn: Connection,
}

impl SalesStore {
    /// Open the store addressed by the connection string; `:memory:` gives an
    /// in-process database for tests.
    pub fn open(connection_string: &str) -> Result<Self> {
        let conn = if connection_string == ":memory:" {
            Connection::open_in_memory()?
        } else {
            Connection::open(connection_string)?
        };
        Ok(Self { conn })
    }

    /// Create the raw facts table if it does not exist. The aggregate tables
    /// are rebuilt by `load`, never pre-created here.
    pub fn init_schema(&self, config: &PipelineConfig) -> Result<()> {
        self.conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                product_id TEXT NOT NULL,
                quantity INTEGER NOT NULL,
                price REAL NOT NULL,
                revenue REAL NOT NULL
            );",
            config.raw_table_name
        ))?;
        Ok(())
    }

    /// Append the normalized rows to the raw facts table and fully replace
    /// both aggregate tables, all inside one transaction.
    pub fn load(
        &mut self,
        records: &[NormalizedRecord],
        report: &SalesReport,
        config: &PipelineConfig,
    ) -> Result<()> {
        let tx = self.conn.transaction()?;

        {
            let mut insert = tx.prepare(&format!(
                "INSERT INTO {} (date, product_id, quantity, price, revenue)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                config.raw_table_name
            ))?;
            for record in records {
                insert.execute(params![
                    record.date,
                    record.product_id,
                    record.quantity,
                    record.price.to_f64(),
                    record.revenue.to_f64(),
                ])?;
            }
        }

        {
            tx.execute_batch(&format!(
                "DROP TABLE IF EXISTS {table};
                 CREATE TABLE {table} (date TEXT PRIMARY KEY, daily_sales REAL NOT NULL);",
                table = config.daily_table_name
            ))?;
            let mut insert = tx.prepare(&format!(
                "INSERT INTO {} (date, daily_sales) VALUES (?1, ?2)",
                config.daily_table_name
            ))?;
            for aggregate in &report.daily {
                insert.execute(params![aggregate.date, aggregate.daily_sales.to_f64()])?;
            }
        }

        {
            tx.execute_batch(&format!(
                "DROP TABLE IF EXISTS {table};
                 CREATE TABLE {table} (date TEXT PRIMARY KEY, monthly_sales REAL NOT NULL);",
                table = config.monthly_table_name
            ))?;
            let mut insert = tx.prepare(&format!(
                "INSERT INTO {} (date, monthly_sales) VALUES (?1, ?2)",
                config.monthly_table_name
            ))?;
            for aggregate in &report.monthly {
                insert.execute(params![aggregate.date, aggregate.monthly_sales.to_f64()])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Daily aggregates sorted by date ascending.
    pub fn read_daily(&self, config: &PipelineConfig) -> Result<Vec<(NaiveDate, f64)>> {
        self.read_series(&config.daily_table_name, "daily_sales")
    }

    /// Monthly aggregates sorted by date ascending.
    pub fn read_monthly(&self, config: &PipelineConfig) -> Result<Vec<(NaiveDate, f64)>> {
        self.read_series(&config.monthly_table_name, "monthly_sales")
    }

    fn read_series(&self, table: &str, column: &str) -> Result<Vec<(NaiveDate, f64)>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT date, {column} FROM {table} ORDER BY date ASC"))?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        let mut series = Vec::new();
        for row in rows {
            series.push(row?);
        }
        Ok(series)
    }

    pub fn raw_row_count(&self, config: &PipelineConfig) -> Result<i64> {
        let count = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", config.raw_table_name),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
