// Adapters layer: concrete sources and diagnostic sinks behind the domain ports.

pub mod diagnostics;
pub mod source;

pub use diagnostics::{CollectingDiagnostics, TracingDiagnostics};
pub use source::{write_sample_if_missing, FileSource, InMemorySource};
