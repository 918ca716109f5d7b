//! Row-level parsing of the `product_name,price,quantity` ledger format.
//!
//! Parsing is a pure function of the row: a rejected row is reported as a
//! [`RowRejection`], never as an error, so loading can keep going.

use crate::domain::model::{RowRejection, SalesRecord};
use rust_decimal::Decimal;
use std::str::FromStr;

pub const FIELD_DELIMITER: u8 = b',';
pub const FIELD_COUNT: usize = 3;

/// Builds a record from an already-split row.
pub fn parse_row(fields: &[&str]) -> Result<SalesRecord, RowRejection> {
    let [name, price, quantity] = fields else {
        return Err(RowRejection::FieldCount {
            found: fields.len(),
        });
    };

    // Both numbers are parsed before deciding so the rejection names every bad field.
    let price = parse_price(price.trim());
    let quantity = quantity.trim().parse::<i64>();

    match (price, quantity) {
        (Ok(unit_price), Ok(quantity)) => Ok(SalesRecord::new(name.trim(), unit_price, quantity)),
        (Err(_), Ok(_)) => Err(RowRejection::InvalidPrice),
        (Ok(_), Err(_)) => Err(RowRejection::InvalidQuantity),
        (Err(_), Err(_)) => Err(RowRejection::InvalidPriceAndQuantity),
    }
}

/// Plain decimal notation only. `Decimal::from_str` would also take `_` digit separators.
fn parse_price(field: &str) -> Result<Decimal, rust_decimal::Error> {
    if field.contains('_') {
        return Err("Invalid decimal: digit separators are not allowed".into());
    }
    Decimal::from_str(field)
}

/// Splits a raw line on the field delimiter and parses it. No quoting is honoured.
pub fn parse_line(line: &str) -> Result<SalesRecord, RowRejection> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER as char).collect();
    parse_row(&fields)
}
