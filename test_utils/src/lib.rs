use std::{fs, path::Path};

use serde::Serialize;

#[derive(Serialize)]
struct SaleRow {
    date: &'static str,
    product_id: &'static str,
    quantity: &'static str,
    price: &'static str,
}

impl SaleRow {
    fn new(
        date: &'static str,
        product_id: &'static str,
        quantity: &'static str,
        price: &'static str,
    ) -> Self {
        Self {
            date,
            product_id,
            quantity,
            price,
        }
    }
}

// Only used during testing so no need to return result
pub fn create_sales_csv(rows: Vec<[&'static str; 4]>) -> String {
    let sale_rows: Vec<SaleRow> = rows
        .into_iter()
        .map(|r| SaleRow::new(r[0], r[1], r[2], r[3]))
        .collect();

    let mut wtr = csv::Writer::from_writer(vec![]);
    for row in sale_rows {
        wtr.serialize(row).unwrap();
    }
    wtr.flush().unwrap();
    String::from_utf8(wtr.into_inner().unwrap()).unwrap()
}

/// Drop a set of named CSV files into a data directory.
pub fn write_sales_files(dir: &Path, files: &[(&str, String)]) {
    for (name, content) in files {
        fs::write(dir.join(name), content).unwrap();
    }
}
