use std::str::FromStr;

use anyhow::Context;
use log::{LevelFilter, debug, info};

use schemaker::{Cli, ConfigManager, DocumentationPipeline, Output, SchemaRequest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", cli.log_level);
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    let config = ConfigManager::load_config(&cli)
        .await
        .context("Failed to load configuration")?;
    debug!(config:?; "Loaded configuration");

    let request = SchemaRequest::from_parts(
        cli.component_set.clone(),
        cli.schema_version.clone(),
        cli.path_segments(),
        &config.docs,
    )?;
    info!(
        component_set = request.component_set.as_str(),
        version = request.version.as_str(),
        class_name = request.class_name();
        "Rendering documentation"
    );

    let pipeline = DocumentationPipeline::from_config(&config);
    let view = pipeline
        .view(&request, &config.docs)
        .await
        .with_context(|| {
            format!(
                "Failed to document {} {}",
                request.component_set, request.version
            )
        })?;

    let output = Output::new(config.output.verbosity());
    let rendered = output.render(&view, config.output.format.into())?;
    println!("{}", rendered.trim_end());

    Ok(())
}
