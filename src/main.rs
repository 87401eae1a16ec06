use bookmark_sorter::config::cli::{Command, OutputFormat};
use bookmark_sorter::utils::error::ErrorSeverity;
use bookmark_sorter::utils::{logger, validation::Validate};
use bookmark_sorter::{CliConfig, JsonFileStore, PreviewOptions, SorterEngine, TomlConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = cli.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(1);
    }

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            TomlConfig::from_file(path)?
        }
        None => TomlConfig::default(),
    };
    if let Err(e) = config.validate() {
        eprintln!("{}", e.user_friendly_message());
        eprintln!("Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let store = match JsonFileStore::open(&cli.store).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Could not open bookmark store: {}", e);
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());
            std::process::exit(exit_code(e.severity()));
        }
    };

    let engine = SorterEngine::new(store, config).with_status_listener(|status| eprintln!("{}", status));

    let succeeded = match cli.command {
        Command::Preview {
            merge_subdomains,
            include_folder_path,
            format,
        } => {
            let outcome = engine
                .run_preview(PreviewOptions {
                    merge_subdomains,
                    include_folder_path,
                })
                .await;
            match (format, &outcome.report, &outcome.groups) {
                (OutputFormat::Text, Some(report), _) => println!("{}", report),
                (OutputFormat::Json, _, Some(groups)) => {
                    println!("{}", serde_json::to_string_pretty(groups)?)
                }
                _ => {}
            }
            outcome.succeeded
        }
        Command::Apply { merge_subdomains } => engine.run_apply(merge_subdomains).await.succeeded,
    };

    if !succeeded {
        std::process::exit(exit_code(ErrorSeverity::Medium));
    }
    Ok(())
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
