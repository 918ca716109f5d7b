pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{CollectingDiagnostics, FileSource, InMemorySource, TracingDiagnostics};
pub use app::report::ReportFormat;
pub use config::Settings;
pub use core::analyzer::SalesAnalyzer;
pub use domain::model::{
    Diagnostic, LoadSummary, RowRejection, SalesRecord, SalesReport, TopProduct,
};
pub use utils::error::{LedgerError, Result};
