use anyhow::Context;
use clap::Parser;
use place_map::core::parser::{decode_input, parse_records};
use place_map::core::ConfigProvider;
use place_map::domain::ports::Storage;
use place_map::utils::error::ErrorSeverity;
use place_map::utils::{logger, validation::Validate};
use place_map::{
    CliConfig, LocalStorage, MapEngine, MapPipeline, MapStyle, NominatimGeocoder, RunSummary, TomlConfig,
};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting place-map");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let outcome = match &cli.config {
        Some(config_path) => {
            tracing::info!("📁 Loading configuration from: {}", config_path);
            let config = TomlConfig::from_file(config_path)
                .with_context(|| format!("failed to load config file '{}'", config_path))?;

            let monitor_enabled = cli.monitor || config.monitoring_enabled();
            let style = config.style().clone();
            execute(config, style, cli.dry_run, monitor_enabled).await
        }
        None => {
            let mut style = MapStyle::default();
            if let Some(title) = &cli.title {
                style.title = title.clone();
            }
            execute(cli.clone(), style, cli.dry_run, cli.monitor).await
        }
    };

    match outcome {
        Ok(Some(summary)) => {
            tracing::info!("✅ Map generation completed");
            println!("✅ Map saved to: {}", summary.output_path);
            println!("📍 Resolved {} of {} locations", summary.resolved, summary.total);
            if let Some(report_path) = &summary.report_path {
                println!("📋 Report saved to: {}", report_path);
            }
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!(
                "❌ Map generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn execute<C>(
    config: C,
    style: MapStyle,
    dry_run: bool,
    monitor_enabled: bool,
) -> place_map::Result<Option<RunSummary>>
where
    C: ConfigProvider + Validate + 'static,
{
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return Err(e);
    }
    tracing::info!("✅ Configuration validated");

    let storage = LocalStorage::default();

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - No lookups will be made");
        perform_dry_run(&storage, &config).await?;
        return Ok(None);
    }

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let geocoder = NominatimGeocoder::new(config.geocoder_endpoint(), config.user_agent(), config.timeout())?;
    let pipeline = MapPipeline::new(storage, config, geocoder).with_style(style);
    let engine = MapEngine::new_with_monitoring(pipeline, monitor_enabled);

    engine.run().await.map(Some)
}

async fn perform_dry_run<C: ConfigProvider>(storage: &LocalStorage, config: &C) -> place_map::Result<()> {
    let data = storage.read_file(config.input_path()).await?;
    let records = parse_records(&decode_input(data)?);

    println!("🔍 Dry Run Analysis:");
    println!("  Input: {}", config.input_path());
    println!("  Geocoder: {}", config.geocoder_endpoint());
    println!("  Timeout: {:?} per lookup", config.timeout());
    println!();

    let mut lookups = 0;
    for (index, record) in records.iter().enumerate() {
        if record.name.is_empty() {
            println!("  {:>3}. (blank line, skipped)", index + 1);
            continue;
        }
        lookups += 1;
        if record.description.is_empty() {
            println!("  {:>3}. {}", index + 1, record.name);
        } else {
            println!("  {:>3}. {} - {}", index + 1, record.name, record.description);
        }
    }

    println!();
    println!("📊 {} records, {} lookups would be made", records.len(), lookups);
    println!(
        "💾 Map would be written to: {}",
        Path::new(config.output_path()).join(config.output_file()).display()
    );
    if let Some(report_file) = config.report_file() {
        println!(
            "📋 Report would be written to: {}",
            Path::new(config.output_path()).join(report_file).display()
        );
    }

    Ok(())
}
