use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use sift_common::observability::init_logging;
use sift_config::{SiftConfig, SiftConfigLoader};
use tokio::io::AsyncReadExt;

use cli::{Cli, Command};

mod cli;
mod server;
mod wiring;

const DEFAULT_CONFIG_FILE: &str = "sift.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load config (env wins). An explicit --config must exist.
    let loader = match &cli.config {
        Some(path) => SiftConfigLoader::new().with_file(path),
        None => SiftConfigLoader::new().with_optional_file(DEFAULT_CONFIG_FILE),
    };
    let cfg: SiftConfig = loader.load().context("failed to load configuration")?;

    // 2) Logging
    let log_path = init_logging(wiring::log_config(&cfg.logging)?)?;
    tracing::debug!(log = %log_path.display(), "logging.ready");

    match cli.command {
        Command::Serve { bind } => {
            let processor = wiring::build_processor(&cfg)?;
            let addr = bind.unwrap_or_else(|| cfg.server.bind.clone());
            server::serve(&addr, processor).await
        }
        Command::Extract { urls, pretty } => {
            let processor = wiring::build_processor(&cfg)?;
            let results = processor.process(&urls).await?;
            print_json(&results, pretty)
        }
        Command::Text { file, pretty } => {
            let extractor = wiring::build_extractor(&cfg)?;
            let text = read_input(file.as_deref()).await?;
            let entries = extractor.extract(&text)?;
            print_json(&entries, pretty)
        }
    }
}

async fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
