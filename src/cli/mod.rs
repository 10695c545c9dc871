// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the ayat command-line interface.
//!
//! Three subcommands: `index` to build a persisted index (plus the compact
//! verse export) from the bundled data directory, `inspect` to examine an
//! index file, and `search` to query one.

pub mod display;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ayat",
    about = "Offline full-text search over Quranic text",
    version
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Engine configuration (JSON). Defaults apply when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a search index from a bundled data directory
    Index {
        /// Data directory containing surah-list.json and surah/<edition>/<n>.json
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for the index file and all-ayat.json
        #[arg(short, long)]
        output: PathBuf,

        /// Skip writing the compact all-ayat.json export
        #[arg(long)]
        no_compact: bool,
    },

    /// Inspect an index file
    Inspect {
        /// Path to the index file
        file: PathBuf,
    },

    /// Search an index directory and display results
    Search {
        /// Directory written by `ayat index`
        #[arg(short, long)]
        index_dir: PathBuf,

        /// Search query
        query: String,

        /// Maximum number of results to show
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Match any query word instead of all of them
        #[arg(long)]
        any: bool,

        /// Disable fuzzy matching
        #[arg(long)]
        exact: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
}
