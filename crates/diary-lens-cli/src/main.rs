mod commands;
mod logging;
mod progress;
mod render;

use std::io::{self, Write};
use std::process;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands, DashboardArgs, IngestArgs, OutputFormat, Tab};
use diary_lens_core::analysis::{self, BrowseFilter, SnapshotCache};
use diary_lens_core::sentiment::{SentimentClassifier, SentimentLabel};
use diary_lens_core::storage::Database;
use diary_lens_core::{AppConfig, IngestEngine};
use dotenv::dotenv;
use progress::CliReporter;
use tracing::{error, info};

fn main() {
    dotenv().ok();

    let config = match diary_lens_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {}", "Error loading configuration:".red(), err);
            process::exit(1);
        }
    };

    let _guard = logging::init_logger(&config.log);

    let args = Cli::parse();

    let outcome = match args.command {
        Some(Commands::Ingest(ingest_args)) => run_ingest(config, ingest_args),
        Some(Commands::Dashboard(dashboard_args)) => run_dashboard(&config, dashboard_args),
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:#?}", config);
            Ok(())
        }
        Some(Commands::ClearStore) => run_clear_store(&config),
        None => {
            let _ = Cli::command().print_long_help();
            Ok(())
        }
    };

    if let Err(err) = outcome {
        error!("Error: {:#}", err);
        process::exit(1);
    }
}

fn run_ingest(mut config: AppConfig, args: IngestArgs) -> Result<()> {
    if let Some(source) = args.source {
        config.source_dir = source;
    }

    let classifier = SentimentClassifier::from_config(&config.classifier)
        .context("building sentiment classifier")?;
    let engine = IngestEngine::new(config, classifier);
    let reporter = CliReporter::new();
    let result = engine
        .run(&reporter)
        .with_context(|| format!("ingesting {}", engine.config().source_dir.display()))?;

    println!();
    info!(
        "List: {}, Classify: {}, Store: {}",
        format!("{:.2}s", result.list_duration.as_secs_f64()).green(),
        format!("{:.2}s", result.classify_duration.as_secs_f64()).green(),
        format!("{:.2}s", result.store_duration.as_secs_f64()).green(),
    );
    info!(
        "{} files found, {} records written, {} skipped",
        format!("{}", result.files_found).cyan(),
        format!("{}", result.records_written).cyan(),
        format!("{}", result.skipped_files.len()).red(),
    );
    for label in SentimentLabel::DISPLAY_ORDER {
        let count = result.label_counts.get(&label).copied().unwrap_or(0);
        info!("{:<13} {}", label.as_str(), count);
    }

    Ok(())
}

fn run_dashboard(config: &AppConfig, args: DashboardArgs) -> Result<()> {
    let csv_path = args
        .csv
        .clone()
        .unwrap_or_else(|| config.store.csv_path.clone());
    let cache = SnapshotCache::new(&csv_path, config.dashboard.excluded_months.clone());
    let dataset = cache
        .dataset()
        .with_context(|| format!("loading snapshot {}", csv_path.display()))?;

    let sentiments = args
        .sentiments
        .iter()
        .map(|s| s.parse::<SentimentLabel>())
        .collect::<Result<Vec<_>, _>>()
        .context("parsing --sentiment")?;
    let filter = BrowseFilter {
        months: args.months.clone(),
        sentiments,
    };

    let show = |tab: Tab| args.tab == tab || args.tab == Tab::All;
    let monthly = show(Tab::Monthly).then(|| analysis::monthly_view(dataset));
    let weekday = show(Tab::Weekday).then(|| analysis::weekday_view(dataset));
    let summary = show(Tab::Summary).then(|| analysis::summary_view(dataset, &config.dashboard));
    let entries = show(Tab::Monthly).then(|| analysis::browse(dataset, &filter));

    match args.format {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "monthly": monthly,
                "weekday": weekday,
                "summary": summary,
                "entries": entries,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            let mut sections = Vec::new();
            if let Some(view) = &monthly {
                sections.push(render::monthly(view)?);
            }
            if let Some(rows) = &entries {
                sections.push(render::entries(rows, args.show_content)?);
            }
            if let Some(view) = &weekday {
                sections.push(render::weekday(view)?);
            }
            if let Some(view) = &summary {
                sections.push(render::summary(view)?);
            }
            println!("{}", sections.join("\n"));
        }
    }

    Ok(())
}

fn run_clear_store(config: &AppConfig) -> Result<()> {
    match prompt_confirm(
        "Are you SURE you want to DELETE all stored diary records?",
        Some(false),
    ) {
        Ok(true) => {
            let db = Database::open(&config.store.db_path)
                .with_context(|| format!("opening {}", config.store.db_path.display()))?;
            db.clear()?;
            println!("All diary records deleted");
            Ok(())
        }
        _ => Ok(()),
    }
}

fn prompt_confirm(prompt: &str, default: Option<bool>) -> io::Result<bool> {
    let mut input = String::new();

    loop {
        input.clear();

        match default {
            Some(true) => print!("{} (Y/n): ", prompt),
            Some(false) | None => print!("{} (y/N): ", prompt),
        }
        io::stdout().flush()?;

        io::stdin().read_line(&mut input)?;

        match input.trim().to_uppercase().as_str() {
            "Y" => return Ok(true),
            "N" => return Ok(false),
            "" => match default {
                Some(default) => return Ok(default),
                None => continue,
            },
            _ => continue,
        }
    }
}
