use crate::domain::model::SalesReport;
use crate::utils::error::{LedgerError, Result};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(LedgerError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Unsupported format. Valid formats: text, json".to_string(),
            }),
        }
    }
}

pub fn render(report: &SalesReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(report)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

fn render_text(report: &SalesReport) -> String {
    let mut out = format!(
        "=== Sales Analysis Report ===\n\nRecords analysed: {}\nTotal sales from {}: {}\n\n",
        report.record_count, report.source, report.total_revenue
    );

    match &report.top_product {
        Some(top) => out.push_str(&format!(
            "Top-selling product by revenue: {}\n  Price: {}\n  Quantity Sold: {}\n  Total Revenue: {}\n",
            top.product_name, top.unit_price, top.quantity, top.revenue
        )),
        None => out.push_str("No sales data available to determine top-selling product.\n"),
    }

    out
}
