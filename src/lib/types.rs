use std::iter::Sum;
use std::ops::Add;

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Debug)]
pub struct MonetaryAmount(Decimal);

impl MonetaryAmount {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Lossy view for the REAL columns and the chart axes.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }
}

impl Add for MonetaryAmount {
    type Output = MonetaryAmount;

    fn add(self, rhs: Self) -> Self::Output {
        MonetaryAmount(self.value() + rhs.value())
    }
}

impl Sum for MonetaryAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(MonetaryAmount::default(), |acc, x| acc + x)
    }
}

/// Canonical row produced by the normalizer. `revenue` is always recomputed
/// from `quantity` and `price` of the same row, never carried in from input.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub date: NaiveDate,
    pub product_id: String,
    pub quantity: i64,
    pub price: MonetaryAmount,
    pub revenue: MonetaryAmount,
}

impl NormalizedRecord {
    pub fn new(date: NaiveDate, product_id: String, quantity: i64, price: MonetaryAmount) -> Self {
        let revenue = MonetaryAmount::new(Decimal::from(quantity) * price.value());
        Self {
            date,
            product_id,
            quantity,
            price,
            revenue,
        }
    }

    /// First day of the record's calendar month.
    pub fn month_bucket(&self) -> NaiveDate {
        self.date
            .with_day(1)
            .expect("the first of a month is always a valid date")
    }
}

/// One row of the daily rollup; a date with no input rows has no aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub daily_sales: MonetaryAmount,
}

/// One row of the monthly rollup, keyed by the first day of the month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyAggregate {
    pub date: NaiveDate,
    pub monthly_sales: MonetaryAmount,
}

/// Both rollups for one run, each sorted ascending by bucket key.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesReport {
    pub daily: Vec<DailyAggregate>,
    pub monthly: Vec<MonthlyAggregate>,
}

/// What a run did, reported by the binary and asserted on by tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub files_read: usize,
    pub rows_loaded: usize,
    pub daily_buckets: usize,
    pub monthly_buckets: usize,
}
