use crate::domain::model::Diagnostic;
use crate::domain::ports::DiagnosticSink;
use std::sync::{Arc, Mutex};

/// Forwards diagnostics to `tracing`. Anomalies become warnings, source failures errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn emit(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::MalformedRow { line, reason, .. } => {
                tracing::warn!(line = *line, reason = %reason, "⚠️ {}", diagnostic)
            }
            Diagnostic::EmptyDataset => tracing::warn!("⚠️ {}", diagnostic),
            Diagnostic::SourceNotFound { .. } | Diagnostic::SourceReadFailure { .. } => {
                tracing::error!("❌ {}", diagnostic)
            }
        }
    }
}

/// Keeps every diagnostic in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct CollectingDiagnostics {
    entries: Arc<Mutex<Vec<Diagnostic>>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

impl DiagnosticSink for CollectingDiagnostics {
    fn emit(&self, diagnostic: Diagnostic) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(diagnostic);
        }
    }
}
