use crate::adapters::diagnostics::TracingDiagnostics;
use crate::core::parser::{parse_row, FIELD_DELIMITER};
use crate::domain::model::{
    Diagnostic, LoadSummary, RowRejection, SalesRecord, SalesReport, TopProduct,
};
use crate::domain::ports::{DiagnosticSink, SalesSource};
use crate::utils::error::{LedgerError, Result};
use rust_decimal::Decimal;

/// The first physical line of a ledger is its header, whatever it contains.
const HEADER_LINE: u64 = 1;

/// Loads a sales ledger into memory and answers aggregate queries over it.
///
/// Aggregates are recomputed from the current records on every call.
pub struct SalesAnalyzer<S: SalesSource, D: DiagnosticSink = TracingDiagnostics> {
    source: S,
    records: Vec<SalesRecord>,
    diagnostics: D,
}

impl<S: SalesSource> SalesAnalyzer<S> {
    pub fn new(source: S) -> Self {
        Self::with_diagnostics(source, TracingDiagnostics)
    }
}

impl<S: SalesSource, D: DiagnosticSink> SalesAnalyzer<S, D> {
    pub fn with_diagnostics(source: S, diagnostics: D) -> Self {
        Self {
            source,
            records: Vec::new(),
            diagnostics,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    /// Replaces the current records with the ledger's valid rows.
    ///
    /// Records are cleared before the source is opened and only repopulated
    /// when the whole read succeeds, so a failed load leaves the analyzer empty.
    /// Malformed rows are skipped with a diagnostic and never fail the load.
    pub fn try_load(&mut self) -> Result<LoadSummary> {
        self.records.clear();

        let (records, summary) = read_ledger(&self.source, &self.diagnostics)?;
        self.records = records;

        tracing::info!(
            "Loaded {} records from {} ({} malformed rows skipped)",
            summary.accepted,
            self.source.location(),
            summary.rejected
        );
        Ok(summary)
    }

    /// Like [`try_load`](Self::try_load) but reports failure as `false` plus a diagnostic.
    ///
    /// `true` with zero records is a successful load of an empty ledger.
    pub fn load(&mut self) -> bool {
        match self.try_load() {
            Ok(_) => true,
            Err(e) => {
                let diagnostic = match e {
                    LedgerError::SourceNotFound { location } => {
                        Diagnostic::SourceNotFound { location }
                    }
                    LedgerError::SourceReadFailure { location, cause } => {
                        Diagnostic::SourceReadFailure { location, cause }
                    }
                    other => Diagnostic::SourceReadFailure {
                        location: self.source.location().to_string(),
                        cause: other.to_string(),
                    },
                };
                self.diagnostics.emit(diagnostic);
                false
            }
        }
    }

    /// Sum of `unit_price * quantity` over all records; zero when there are none.
    pub fn total_revenue(&self) -> Decimal {
        if self.records.is_empty() {
            self.diagnostics.emit(Diagnostic::EmptyDataset);
            return Decimal::ZERO;
        }

        self.records
            .iter()
            .fold(Decimal::ZERO, |total, record| {
                total.saturating_add(record.revenue())
            })
    }

    /// The record with the highest revenue. Ties go to the earliest record.
    pub fn top_product(&self) -> Option<&SalesRecord> {
        if self.records.is_empty() {
            self.diagnostics.emit(Diagnostic::EmptyDataset);
            return None;
        }

        // `Iterator::max_by_key` returns the last maximum, so keep the first strictly greater one.
        self.records
            .iter()
            .fold(None, |best: Option<(&SalesRecord, Decimal)>, record| {
                let revenue = record.revenue();
                match best {
                    Some((_, best_revenue)) if revenue <= best_revenue => best,
                    _ => Some((record, revenue)),
                }
            })
            .map(|(record, _)| record)
    }

    pub fn report(&self) -> SalesReport {
        SalesReport {
            source: self.source.location().to_string(),
            generated_at: chrono::Utc::now(),
            record_count: self.records.len(),
            total_revenue: self.total_revenue(),
            top_product: self.top_product().map(TopProduct::from),
        }
    }
}

fn read_ledger<S: SalesSource, D: DiagnosticSink>(
    source: &S,
    diagnostics: &D,
) -> Result<(Vec<SalesRecord>, LoadSummary)> {
    let reader = source.open()?;
    // Headers are handled below: the reader skips blank lines before it would pick one.
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut summary = LoadSummary::default();

    for row in csv_reader.byte_records() {
        let row = row.map_err(|e| LedgerError::SourceReadFailure {
            location: source.location().to_string(),
            cause: e.to_string(),
        })?;

        let line = row.position().map(|p| p.line()).unwrap_or_default();
        if line == HEADER_LINE {
            continue;
        }

        match parse_byte_row(&row) {
            Ok(record) => {
                summary.accepted += 1;
                records.push(record);
            }
            Err(reason) => {
                summary.rejected += 1;
                diagnostics.emit(Diagnostic::MalformedRow {
                    line,
                    raw: raw_line(&row),
                    reason,
                });
            }
        }
    }

    Ok((records, summary))
}

fn parse_byte_row(row: &csv::ByteRecord) -> std::result::Result<SalesRecord, RowRejection> {
    let fields = row
        .iter()
        .map(std::str::from_utf8)
        .collect::<std::result::Result<Vec<&str>, _>>()
        .map_err(|_| RowRejection::InvalidEncoding)?;
    parse_row(&fields)
}

fn raw_line(row: &csv::ByteRecord) -> String {
    row.iter()
        .map(String::from_utf8_lossy)
        .collect::<Vec<_>>()
        .join(",")
}
