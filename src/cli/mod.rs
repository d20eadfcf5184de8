// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the bibdex command-line interface.
//!
//! Three subcommands: `search` to query a catalog file, `stats` to print the
//! per-year report, and `inspect` to check the index built from a file. Every
//! command loads the whole file into memory first; output is JSON on stdout.

use bibdex::{InputFormat, TextEncoding};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bibdex",
    about = "In-memory inverted index over bibliographic records",
    version
)]
pub struct Cli {
    /// Input file format (overrides the config file)
    #[arg(long, global = true, value_enum)]
    pub format: Option<Format>,

    /// Character set of MARC field data (overrides the config file)
    #[arg(long, global = true, value_enum)]
    pub encoding: Option<Encoding>,

    /// Bytes to discard after each MARC record terminator
    #[arg(long, global = true)]
    pub skip: Option<usize>,

    /// Path to a JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search a catalog file and print matching records
    Search {
        /// Catalog file (ISO 2709 or JSON array)
        file: PathBuf,

        /// Subject term to match
        #[arg(short, long)]
        term: Option<String>,

        /// Publication year to match
        #[arg(short, long)]
        year: Option<String>,

        /// Offset of the first result
        #[arg(long, allow_negative_numbers = true)]
        start: Option<i64>,

        /// Maximum number of results to return
        #[arg(short, long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },

    /// Print per-year record counts and top keywords
    Stats {
        /// Catalog file (ISO 2709 or JSON array)
        file: PathBuf,

        /// Keywords to keep per year
        #[arg(short, long)]
        keywords: Option<usize>,
    },

    /// Build the index from a catalog file and verify its structure
    Inspect {
        /// Catalog file (ISO 2709 or JSON array)
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Format {
    Marc,
    Json,
}

impl From<Format> for InputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Marc => InputFormat::Marc,
            Format::Json => InputFormat::Json,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Encoding {
    Gb18030,
    Utf8,
}

impl From<Encoding> for TextEncoding {
    fn from(encoding: Encoding) -> Self {
        match encoding {
            Encoding::Gb18030 => TextEncoding::Gb18030,
            Encoding::Utf8 => TextEncoding::Utf8,
        }
    }
}
