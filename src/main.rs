use clap::Parser;
use sales_ledger::adapters::write_sample_if_missing;
use sales_ledger::app::report;
use sales_ledger::utils::logger;
use sales_ledger::{CliConfig, FileSource, SalesAnalyzer, Settings};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = match Settings::resolve(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(2);
        }
    };

    // 初始化日誌
    if settings.log_format == "json" {
        logger::init_json_logger(settings.verbose, settings.log_level.as_deref());
    } else {
        logger::init_cli_logger(settings.verbose, settings.log_level.as_deref());
    }

    tracing::info!("Starting sales-ledger");
    tracing::debug!("Resolved settings: {:?}", settings);

    let source_path = settings.source_path();
    if settings.create_sample {
        write_sample_if_missing(&source_path)?;
    }

    let mut analyzer = SalesAnalyzer::new(FileSource::new(source_path));
    if !analyzer.load() {
        std::process::exit(1);
    }

    let sales_report = analyzer.report();
    let rendered = report::render(&sales_report, settings.report_format()?)?;
    println!("{}", rendered.trim_end());

    Ok(())
}
