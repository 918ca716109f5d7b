use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One validated line item of the sales ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i64,
}

impl SalesRecord {
    pub fn new(product_name: impl Into<String>, unit_price: Decimal, quantity: i64) -> Self {
        Self {
            product_name: product_name.into(),
            unit_price,
            quantity,
        }
    }

    /// `unit_price * quantity`, saturating at the bounds of `Decimal`.
    pub fn revenue(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Why a data row did not become a [`SalesRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRejection {
    FieldCount { found: usize },
    InvalidPrice,
    InvalidQuantity,
    InvalidPriceAndQuantity,
    InvalidEncoding,
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowRejection::FieldCount { found } => write!(f, "expected 3 fields, found {}", found),
            RowRejection::InvalidPrice => write!(f, "price is not a decimal number"),
            RowRejection::InvalidQuantity => write!(f, "quantity is not an integer"),
            RowRejection::InvalidPriceAndQuantity => {
                write!(f, "price and quantity are both unparseable")
            }
            RowRejection::InvalidEncoding => write!(f, "row is not valid UTF-8"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub accepted: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopProduct {
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i64,
    pub revenue: Decimal,
}

impl From<&SalesRecord> for TopProduct {
    fn from(record: &SalesRecord) -> Self {
        Self {
            product_name: record.product_name.clone(),
            unit_price: record.unit_price,
            quantity: record.quantity,
            revenue: record.revenue(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SalesReport {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub record_count: usize,
    pub total_revenue: Decimal,
    pub top_product: Option<TopProduct>,
}

/// Advisory messages emitted while loading or querying a ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    MalformedRow {
        line: u64,
        raw: String,
        reason: RowRejection,
    },
    SourceNotFound {
        location: String,
    },
    SourceReadFailure {
        location: String,
        cause: String,
    },
    EmptyDataset,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedRow { line, raw, reason } => {
                write!(f, "Skipping malformed data in row {} ({}): {}", line, reason, raw)
            }
            Diagnostic::SourceNotFound { location } => {
                write!(f, "The file '{}' was not found", location)
            }
            Diagnostic::SourceReadFailure { location, cause } => write!(
                f,
                "An unexpected error occurred while loading data from '{}': {}",
                location, cause
            ),
            Diagnostic::EmptyDataset => {
                write!(f, "No sales data available. Please load data first.")
            }
        }
    }
}
