use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{EtlError, Result};
use crate::io::RawRecord;
use crate::types::{MonetaryAmount, NormalizedRecord};

/// Accepted layouts for the `date` column.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Normalize every raw row into the canonical schema and derive its revenue.
/// Output cardinality equals input cardinality: rows are never dropped for
/// missing numeric values, and an unparsable date rejects the whole dataset.
pub fn normalize(rows: Vec<RawRecord>) -> Result<Vec<NormalizedRecord>> {
    rows.into_iter()
        .enumerate()
        .map(|(row, raw)| normalize_row(row, raw))
        .collect()
}

fn normalize_row(row: usize, raw: RawRecord) -> Result<NormalizedRecord> {
    let fields = canonical_fields(raw);

    let date_value = fields
        .get("date")
        .filter(|v| !v.is_empty())
        .ok_or(EtlError::MissingColumn { row, column: "date" })?;
    let date = parse_date(row, date_value)?;

    let product_id = fields
        .get("product_id")
        .cloned()
        .ok_or(EtlError::MissingColumn {
            row,
            column: "product_id",
        })?;

    let quantity = parse_quantity(row, fields.get("quantity"))?;
    let price = parse_price(row, fields.get("price"))?;

    Ok(NormalizedRecord::new(date, product_id, quantity, price))
}

/// Field matching is case- and whitespace-insensitive on input; the canonical
/// names are `date`, `product_id`, `quantity`, `price`.
fn canonical_fields(raw: RawRecord) -> HashMap<String, String> {
    raw.into_iter()
        .map(|(name, value)| (name.trim().to_lowercase(), value))
        .collect()
}

fn parse_date(row: usize, value: &str) -> Result<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .ok_or_else(|| EtlError::Date {
            row,
            value: value.to_string(),
        })
}

/// Missing or empty quantity becomes 0; any fractional part is truncated.
fn parse_quantity(row: usize, value: Option<&String>) -> Result<i64> {
    let value = match value {
        None => return Ok(0),
        Some(v) if v.is_empty() => return Ok(0),
        Some(v) => v,
    };
    Decimal::from_str(value)
        .ok()
        .and_then(|d| d.trunc().to_i64())
        .ok_or_else(|| EtlError::Number {
            row,
            column: "quantity",
            value: value.clone(),
        })
}

/// Missing or empty price becomes 0.0.
fn parse_price(row: usize, value: Option<&String>) -> Result<MonetaryAmount> {
    let value = match value {
        None => return Ok(MonetaryAmount::default()),
        Some(v) if v.is_empty() => return Ok(MonetaryAmount::default()),
        Some(v) => v,
    };
    Decimal::from_str(value)
        .map(MonetaryAmount::new)
        .map_err(|_| EtlError::Number {
            row,
            column: "price",
            value: value.clone(),
        })
}
