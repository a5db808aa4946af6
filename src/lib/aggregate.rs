use chrono::NaiveDate;
use im::OrdMap;

use crate::types::{DailyAggregate, MonetaryAmount, MonthlyAggregate, NormalizedRecord, SalesReport};
use crate::utils::OrDefault;

/// Roll the record set up by calendar day and by calendar month. A bucket only
/// exists if at least one record falls into it. Summation is exact decimal
/// arithmetic and the ordered maps fix the output order, so a given input set
/// always produces byte-identical rollups.
pub fn rollup(records: &[NormalizedRecord]) -> SalesReport {
    let daily = bucket_by(records, |r| r.date);
    let monthly = bucket_by(records, |r| r.month_bucket());

    SalesReport {
        daily: daily
            .into_iter()
            .map(|(date, daily_sales)| DailyAggregate { date, daily_sales })
            .collect(),
        monthly: monthly
            .into_iter()
            .map(|(date, monthly_sales)| MonthlyAggregate { date, monthly_sales })
            .collect(),
    }
}

fn bucket_by<F>(records: &[NormalizedRecord], key: F) -> OrdMap<NaiveDate, MonetaryAmount>
where
    F: Fn(&NormalizedRecord) -> NaiveDate,
{
    records.iter().fold(OrdMap::new(), |acc, record| {
        let bucket = key(record);
        let total = acc.get_or_default(&bucket) + record.revenue;
        acc.update(bucket, total)
    })
}
