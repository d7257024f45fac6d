use anyhow::Context;
use clap::Parser;
use deck_validator::domain::format::SourceFormat;
use deck_validator::domain::ports::ConfigProvider;
use deck_validator::utils::{logger, validation::Validate};
use deck_validator::{
    CliConfig, DeckEngine, DeckError, DeckPipeline, DeckValidator, LocalStorage, PipelineOptions,
    ScryfallClient, TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting deck-validator CLI");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = cli.validate() {
        exit_with(&e);
    }

    let outcome = match &cli.config {
        Some(path) => {
            let file_config = TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config file {}", path))?;
            if let Err(e) = file_config.validate() {
                exit_with(&e);
            }
            tracing::info!("Using settings from {} ({})", path, file_config.service.name);
            let report_name = file_config.report_name().to_string();
            run(&cli, &file_config, report_name).await
        }
        None => run(&cli, &cli, cli.report_name.clone()).await,
    };

    match outcome {
        Ok(json) => {
            println!("{}", json);
            Ok(())
        }
        Err(e) => exit_with(&e),
    }
}

/// Wires storage, lookup and pipeline from `settings`, runs once and returns
/// the report as pretty JSON.
async fn run<C: ConfigProvider>(
    cli: &CliConfig,
    settings: &C,
    report_name: String,
) -> deck_validator::Result<String> {
    let lookup = ScryfallClient::from_config(settings)?;
    let validator = DeckValidator::from_config(lookup, settings);

    let options = PipelineOptions {
        input_path: cli.input.clone(),
        output_path: settings.output_path().to_string(),
        report_name,
        source: cli
            .source
            .as_deref()
            .and_then(|source| source.parse::<SourceFormat>().ok()),
        format: cli.format.clone(),
        convert_only: cli.convert_only,
    };

    let pipeline = DeckPipeline::new(LocalStorage::new(".".to_string()), validator, options);
    let summary = DeckEngine::new(pipeline).run().await?;

    tracing::info!("Report saved to: {}", summary.output_path);
    Ok(serde_json::to_string_pretty(&summary.report)?)
}

fn exit_with(e: &DeckError) -> ! {
    tracing::error!(
        "Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("{}", e.user_friendly_message());
    std::process::exit(e.exit_code());
}
