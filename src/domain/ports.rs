use crate::domain::model::Diagnostic;
use crate::utils::error::Result;
use std::io::Read;

/// Where sales data comes from. Fixed for the lifetime of an analyzer.
pub trait SalesSource {
    /// Human-readable name of the source, used in diagnostics and reports.
    fn location(&self) -> &str;

    /// Opens a fresh reader positioned at the start of the ledger.
    ///
    /// A missing source must be reported as [`LedgerError::SourceNotFound`];
    /// any other failure as [`LedgerError::SourceReadFailure`].
    ///
    /// [`LedgerError::SourceNotFound`]: crate::utils::error::LedgerError::SourceNotFound
    /// [`LedgerError::SourceReadFailure`]: crate::utils::error::LedgerError::SourceReadFailure
    fn open(&self) -> Result<Box<dyn Read + '_>>;
}

pub trait DiagnosticSink {
    fn emit(&self, diagnostic: Diagnostic);
}

