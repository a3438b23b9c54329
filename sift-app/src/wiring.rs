use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use sift_common::observability::{LogConfig, LogFormat};
use sift_config::{LoggingConfig, SiftConfig};
use sift_core::{BatchProcessor, Extractor, FilterSet};
use sift_web::HttpPageFetcher;

pub fn log_config(cfg: &LoggingConfig) -> Result<LogConfig> {
    let format: LogFormat = cfg.format.parse().map_err(|e: String| anyhow!(e))?;
    Ok(LogConfig {
        log_dir: cfg.dir.as_ref().map(PathBuf::from),
        emit_stderr: cfg.emit_stderr,
        format,
        default_filter: cfg.filter.clone(),
        ..LogConfig::default()
    })
}

pub fn build_extractor(cfg: &SiftConfig) -> Result<Extractor> {
    let filters = FilterSet::from_config(&cfg.filters).context("invalid filters")?;
    Ok(Extractor::with_defaults(filters))
}

pub fn build_processor(cfg: &SiftConfig) -> Result<BatchProcessor> {
    let extractor = build_extractor(cfg)?;
    let fetcher = HttpPageFetcher::new(Duration::from_secs(cfg.fetch.timeout_secs), &cfg.fetch.user_agent)
        .context("failed to build http client")?;
    Ok(BatchProcessor::new(Arc::new(extractor), Arc::new(fetcher)).with_concurrency(cfg.fetch.concurrency))
}
