use anyhow::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sales_ledger::adapters::write_sample_if_missing;
use sales_ledger::domain::ports::SalesSource;
use sales_ledger::{
    CollectingDiagnostics, Diagnostic, FileSource, LedgerError, RowRejection, SalesAnalyzer,
};
use std::cell::Cell;
use std::io::{self, Read};
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str = "product_name,price,quantity\n";

fn write_ledger(dir: &TempDir, name: &str, content: &str) -> Result<std::path::PathBuf> {
    let path = dir.path().join(name);
    std::fs::write(&path, content)?;
    Ok(path)
}

fn analyzer_at(
    path: &Path,
) -> (
    SalesAnalyzer<FileSource, CollectingDiagnostics>,
    CollectingDiagnostics,
) {
    let sink = CollectingDiagnostics::new();
    let analyzer = SalesAnalyzer::with_diagnostics(FileSource::new(path), sink.clone());
    (analyzer, sink)
}

fn names(analyzer: &SalesAnalyzer<FileSource, CollectingDiagnostics>) -> Vec<String> {
    analyzer
        .records()
        .iter()
        .map(|r| r.product_name.clone())
        .collect()
}

#[test]
fn test_only_well_formed_rows_are_kept_in_order() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let content = format!(
        "{}Widget,2.50,4\nShort,1.00\nGadget,abc,1\nGizmo,3.00,2\nToo,many,fields,here\nDoohickey,0.75,-1\n",
        HEADER
    );
    let path = write_ledger(&temp_dir, "mixed.csv", &content)?;
    let (mut analyzer, sink) = analyzer_at(&path);

    assert!(analyzer.load());
    assert_eq!(names(&analyzer), vec!["Widget", "Gizmo", "Doohickey"]);
    assert_eq!(sink.entries().len(), 3);
    Ok(())
}

#[test]
fn test_header_only_ledger_is_empty_success() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_ledger(&temp_dir, "header_only.csv", HEADER)?;
    let (mut analyzer, sink) = analyzer_at(&path);

    assert!(analyzer.load());
    assert!(analyzer.records().is_empty());
    assert_eq!(analyzer.total_revenue(), Decimal::ZERO);
    assert!(analyzer.top_product().is_none());
    assert_eq!(
        sink.entries(),
        vec![Diagnostic::EmptyDataset, Diagnostic::EmptyDataset]
    );
    Ok(())
}

#[test]
fn test_zero_byte_ledger_is_empty_success() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_ledger(&temp_dir, "empty.csv", "")?;
    let (mut analyzer, _sink) = analyzer_at(&path);

    assert!(analyzer.load());
    assert!(analyzer.records().is_empty());
    Ok(())
}

#[test]
fn test_total_revenue_is_exact_decimal() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_ledger(
        &temp_dir,
        "sum.csv",
        &format!("{}A,10.00,2\nB,5.00,3\n", HEADER),
    )?;
    let (mut analyzer, _sink) = analyzer_at(&path);

    assert!(analyzer.load());
    assert_eq!(analyzer.total_revenue(), dec!(35.00));
    Ok(())
}

#[test]
fn test_top_product_tie_goes_to_first_row() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_ledger(
        &temp_dir,
        "tie.csv",
        &format!("{}A,10.00,5\nB,50.00,1\n", HEADER),
    )?;
    let (mut analyzer, _sink) = analyzer_at(&path);

    assert!(analyzer.load());
    let top = analyzer.top_product().expect("records were loaded");
    assert_eq!(top.product_name, "A");
    assert_eq!(top.revenue(), dec!(50.00));
    Ok(())
}

#[test]
fn test_malformed_row_is_tolerated() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let content = format!(
        "{}Laptop,1200.00,5\nBadRow,notanumber,5\nMouse,25.50,10\n",
        HEADER
    );
    let path = write_ledger(&temp_dir, "sales_data.csv", &content)?;
    let (mut analyzer, sink) = analyzer_at(&path);

    assert!(analyzer.load());
    assert_eq!(names(&analyzer), vec!["Laptop", "Mouse"]);
    assert_eq!(analyzer.total_revenue(), dec!(6255.00));
    assert_eq!(analyzer.top_product().unwrap().product_name, "Laptop");
    assert_eq!(
        sink.entries(),
        vec![Diagnostic::MalformedRow {
            line: 3,
            raw: "BadRow,notanumber,5".to_string(),
            reason: RowRejection::InvalidPrice,
        }]
    );
    Ok(())
}

#[test]
fn test_missing_source_fails_load() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("does_not_exist.csv");
    let (mut analyzer, sink) = analyzer_at(&path);

    assert!(!analyzer.load());
    assert!(analyzer.records().is_empty());
    assert_eq!(
        sink.entries(),
        vec![Diagnostic::SourceNotFound {
            location: path.display().to_string(),
        }]
    );

    assert!(matches!(
        analyzer.try_load(),
        Err(LedgerError::SourceNotFound { .. })
    ));
    Ok(())
}

#[test]
fn test_reload_does_not_accumulate() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_ledger(
        &temp_dir,
        "reload.csv",
        &format!("{}Laptop,1200.00,5\nMouse,25.50,10\n", HEADER),
    )?;
    let (mut analyzer, _sink) = analyzer_at(&path);

    assert!(analyzer.load());
    let first = analyzer.records().to_vec();
    assert!(analyzer.load());
    assert_eq!(analyzer.records(), first.as_slice());
    assert_eq!(analyzer.records().len(), 2);
    Ok(())
}

#[test]
fn test_reload_after_source_removed_clears_records() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_ledger(
        &temp_dir,
        "vanishing.csv",
        &format!("{}Laptop,1200.00,5\n", HEADER),
    )?;
    let (mut analyzer, _sink) = analyzer_at(&path);

    assert!(analyzer.load());
    assert_eq!(analyzer.records().len(), 1);

    std::fs::remove_file(&path)?;
    assert!(!analyzer.load());
    assert!(analyzer.records().is_empty());
    Ok(())
}

/// Yields a header and one good row, then fails on the second read of the next load.
struct FlakySource {
    loads: Cell<usize>,
}

struct FailingAfter<'a> {
    data: &'a [u8],
    fail: bool,
}

impl Read for FailingAfter<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::Other, "disk went away"));
            }
            return Ok(0);
        }
        let n = self.data.read(buf)?;
        Ok(n)
    }
}

impl SalesSource for FlakySource {
    fn location(&self) -> &str {
        "flaky.csv"
    }

    fn open(&self) -> sales_ledger::Result<Box<dyn Read + '_>> {
        let load = self.loads.get();
        self.loads.set(load + 1);
        Ok(Box::new(FailingAfter {
            data: b"product_name,price,quantity\nLaptop,1200.00,5\n",
            fail: load > 0,
        }))
    }
}

#[test]
fn test_read_failure_mid_load_leaves_records_empty() {
    let sink = CollectingDiagnostics::new();
    let mut analyzer = SalesAnalyzer::with_diagnostics(
        FlakySource {
            loads: Cell::new(0),
        },
        sink.clone(),
    );

    assert!(analyzer.load());
    assert_eq!(analyzer.records().len(), 1);

    assert!(!analyzer.load());
    assert!(analyzer.records().is_empty());
    match sink.entries().as_slice() {
        [Diagnostic::SourceReadFailure { location, cause }] => {
            assert_eq!(location, "flaky.csv");
            assert!(cause.contains("disk went away"));
        }
        other => panic!("unexpected diagnostics: {:?}", other),
    }
}

#[test]
fn test_sample_ledger_round_trip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("sales_data.csv");
    assert!(write_sample_if_missing(&path)?);

    let (mut analyzer, sink) = analyzer_at(&path);
    assert!(analyzer.load());

    let report = analyzer.report();
    assert_eq!(report.record_count, 2);
    assert_eq!(report.total_revenue, dec!(6255.00));
    assert_eq!(report.top_product.map(|t| t.product_name), Some("Laptop".to_string()));
    assert!(sink.entries().is_empty());
    Ok(())
}

#[test]
fn test_blank_first_line_counts_as_header() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_ledger(
        &temp_dir,
        "blank_header.csv",
        "\nLaptop,1200.00,5\nMouse,25.50,10\n",
    )?;
    let (mut analyzer, sink) = analyzer_at(&path);

    assert!(analyzer.load());
    assert_eq!(names(&analyzer), vec!["Laptop", "Mouse"]);
    assert_eq!(analyzer.total_revenue(), dec!(6255.00));
    assert!(sink.entries().is_empty());
    Ok(())
}

#[test]
fn test_blank_lines_between_rows_are_ignored() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let content = format!("{}Laptop,1200.00,5\n\r\n\nMouse,25.50,10\n\n", HEADER);
    let path = write_ledger(&temp_dir, "gaps.csv", &content)?;
    let (mut analyzer, sink) = analyzer_at(&path);

    let summary = analyzer.try_load()?;
    assert_eq!(summary.accepted, 2);
    assert_eq!(summary.rejected, 0);
    assert_eq!(names(&analyzer), vec!["Laptop", "Mouse"]);
    assert!(sink.entries().is_empty());
    Ok(())
}
