// src/main.rs
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion2docs::{
    AppError, CommandLineInput, DocsPull, HierarchicalLayout, HttpAssetFetcher,
    NotionHttpClient, PipelineConfig, PluginRegistry, RateLimiter, UnofficialColumnSource,
};
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("notion2docs.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Pulls the outline below the configured root page into the docs tree.
async fn execute_pipeline(config: &PipelineConfig) -> Result<(), AppError> {
    let limiter = Arc::new(RateLimiter::new(config.requests_per_second));
    let client = NotionHttpClient::new(&config.api_key, limiter.clone())?;
    let assets = HttpAssetFetcher::new()?;
    let column_formats = UnofficialColumnSource::new(limiter)?;

    let plugins = PluginRegistry::standard()?;
    let options = &config.conversion;
    let layout = HierarchicalLayout::new(options.markdown_output_path.clone());

    log::info!(
        "Pulling {} into {}",
        config.root_page,
        options.markdown_output_path.display()
    );
    let pull = DocsPull::new(options, &plugins, &layout, &client, &assets, &column_formats);
    let summary = pull.run(&config.root_page).await?;

    println!(
        "✓ Wrote {} pages ({} empty, {} by status, {} levels with content skipped)",
        summary.output_normally,
        summary.skipped_because_empty,
        summary.skipped_because_status,
        summary.skipped_because_level_cannot_have_content
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = PipelineConfig::resolve(cli)?;

    execute_pipeline(&config).await?;

    Ok(())
}
