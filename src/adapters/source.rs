use crate::domain::ports::SalesSource;
use crate::utils::error::{LedgerError, Result};
use std::fs::{self, File};
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

pub const SAMPLE_LEDGER: &str = "product_name,price,quantity\nLaptop,1200.00,5\nMouse,25.50,10\n";

/// A ledger stored as a file on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    location: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let location = path.display().to_string();
        Self { path, location }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SalesSource for FileSource {
    fn location(&self) -> &str {
        &self.location
    }

    fn open(&self) -> Result<Box<dyn Read + '_>> {
        match File::open(&self.path) {
            Ok(file) => Ok(Box::new(file)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(LedgerError::SourceNotFound {
                location: self.location.clone(),
            }),
            Err(e) => Err(LedgerError::SourceReadFailure {
                location: self.location.clone(),
                cause: e.to_string(),
            }),
        }
    }
}

/// A ledger held in memory, e.g. received from another process.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    name: String,
    content: String,
}

impl InMemorySource {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

impl SalesSource for InMemorySource {
    fn location(&self) -> &str {
        &self.name
    }

    fn open(&self) -> Result<Box<dyn Read + '_>> {
        Ok(Box::new(Cursor::new(self.content.as_bytes())))
    }
}

/// Writes [`SAMPLE_LEDGER`] to `path` unless something already exists there.
/// Returns whether the file was created.
pub fn write_sample_if_missing(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, SAMPLE_LEDGER)?;
    tracing::info!("📝 Created sample ledger at {}", path.display());
    Ok(true)
}
