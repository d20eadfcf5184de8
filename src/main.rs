// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use bibdex::{
    check_engine, Catalog, CatalogConfig, LoadSummary, QueryRequest, VerificationReport,
};
use clap::Parser;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};

mod cli;
use cli::{Cli, Commands};

/// Output of `bibdex inspect`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InspectOutput {
    load: LoadSummary,
    index: VerificationReport,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => CatalogConfig::from_file(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => CatalogConfig::default(),
    };
    if let Some(format) = cli.format {
        config.input_format = format.into();
    }
    if let Some(encoding) = cli.encoding {
        config.encoding = encoding.into();
    }
    if let Some(skip) = cli.skip {
        config.skip = skip;
    }

    match cli.command {
        Commands::Search {
            file,
            term,
            year,
            start,
            limit,
        } => {
            let (catalog, _) = load_catalog(&file, config)?;
            let request = QueryRequest {
                term,
                year,
                start,
                limit,
            };
            print_json(&catalog.find(&request))
        }
        Commands::Stats { file, keywords } => {
            if let Some(keywords) = keywords {
                config.keyword_limit = keywords;
            }
            let (catalog, _) = load_catalog(&file, config)?;
            print_json(&catalog.year_report())
        }
        Commands::Inspect { file } => {
            let (catalog, load) = load_catalog(&file, config)?;
            let index = check_engine(catalog.engine()).context("index verification failed")?;
            print_json(&InspectOutput { load, index })
        }
    }
}

/// Logs go to stderr so stdout carries only JSON.
fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .init();
}

fn load_catalog(path: &Path, config: CatalogConfig) -> Result<(Catalog, LoadSummary)> {
    config.validate()?;
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;

    #[cfg(feature = "parallel")]
    let progress = {
        let len = file.metadata().map(|m| m.len()).unwrap_or(0);
        let pb = ProgressBar::new(len);
        pb.set_style(create_progress_style());
        pb.set_prefix("Loading");
        pb
    };
    #[cfg(feature = "parallel")]
    let reader = BufReader::new(progress.wrap_read(file));
    #[cfg(not(feature = "parallel"))]
    let reader = BufReader::new(file);

    let mut catalog = Catalog::new(config);
    let summary = catalog
        .load(reader)
        .with_context(|| format!("failed to load {}", path.display()))?;

    #[cfg(feature = "parallel")]
    progress.finish_and_clear();

    info!(
        records = catalog.len(),
        terms = catalog.engine().dictionary().len(),
        "catalog ready"
    );
    Ok((catalog, summary))
}

#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {bytes}/{total_bytes} {msg}",
    )
    .map(|style| style.progress_chars("━━╸"))
    .unwrap_or_else(|_| ProgressStyle::default_bar())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
