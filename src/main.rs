// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ayat_search::binary::{header::IndexHeader, peek_header};
use ayat_search::corpus::export_compact;
use ayat_search::{
    BundledCorpus, Combine, CompactCorpus, CorpusSource, EngineConfig, FileStore, IndexBuilder,
    IndexStore, SearchEngine, SearchIndex, SearchResult, VerseDocument,
};

mod cli;
use cli::display::{self, BOLD, DIM};
use cli::{Cli, Commands};

/// Compact verse export written next to the index.
const COMPACT_FILE: &str = "all-ayat.json";

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Index { input, output, no_compact } => {
            run_index(&input, &output, !no_compact, &config)
        }
        Commands::Inspect { file } => run_inspect(&file),
        Commands::Search { index_dir, query, limit, any, exact, json } => {
            let mut config = config;
            config.search.limit = Some(limit);
            if any {
                config.search.combine = Combine::Or;
            }
            if exact {
                config.search.fuzzy = 0.0;
            }
            run_search(&index_dir, &query, config, json)
        }
    }
}

// ============================================================================
// INDEX
// ============================================================================

#[cfg(feature = "parallel")]
fn spinner(prefix: &'static str) -> indicatif::ProgressBar {
    let pb = indicatif::ProgressBar::new_spinner();
    pb.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {prefix:>10.bold} {msg}")
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner()),
    );
    pb.set_prefix(prefix);
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

fn run_index(input: &Path, output: &Path, write_compact: bool, config: &EngineConfig) -> Result<()> {
    let start = Instant::now();
    let corpus = BundledCorpus::new(input).with_editions(config.editions.iter().cloned());

    #[cfg(feature = "parallel")]
    let pb = spinner("Loading");
    let records = corpus
        .load()
        .with_context(|| format!("failed to load corpus from {}", input.display()))?;
    #[cfg(feature = "parallel")]
    pb.finish_with_message(format!("{} verses", records.len()));

    if records.is_empty() {
        bail!("no verses found under {}", input.display());
    }

    #[cfg(feature = "parallel")]
    let pb = spinner("Building");
    let mut builder = IndexBuilder::new();
    builder.add_all(records.into_iter().map(VerseDocument::from));
    let compact = if write_compact {
        Some(export_compact(builder.docs()).context("failed to export compact corpus")?)
    } else {
        None
    };
    let index = builder.build();
    #[cfg(feature = "parallel")]
    pb.finish_with_message(format!("{} documents, {} terms", index.len(), index.term_count()));

    #[cfg(feature = "parallel")]
    let pb = spinner("Writing");
    fs::create_dir_all(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let store = FileStore::new(output);
    let bytes = index.to_bytes();
    store.set(&config.cache_key, &bytes)?;
    let index_path = store.path_for(&config.cache_key)?;
    if let Some(json) = compact {
        fs::write(output.join(COMPACT_FILE), json)
            .with_context(|| format!("failed to write {}", COMPACT_FILE))?;
    }
    #[cfg(feature = "parallel")]
    pb.finish_with_message(format!("{}", index_path.display()));

    info!(
        docs = index.len(),
        bytes = bytes.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "index written"
    );

    println!();
    display::section_top("INDEX");
    display::field("Documents", &index.len().to_string());
    display::field("Terms", &index.term_count().to_string());
    display::field("Size", &display::format_size(bytes.len()));
    display::field("Output", &index_path.display().to_string());
    display::field("Time", &display::timing_ms(start.elapsed().as_secs_f64() * 1000.0));
    display::section_bot();
    Ok(())
}

// ============================================================================
// INSPECT
// ============================================================================

fn brotli_size(bytes: &[u8]) -> Result<usize> {
    let mut writer = brotli::CompressorWriter::new(Vec::new(), 4096, 11, 22);
    writer.write_all(bytes)?;
    Ok(writer.into_inner().len())
}

fn run_inspect(file: &Path) -> Result<()> {
    let bytes = fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let header = peek_header(&bytes)?;
    let offsets = header.section_offsets();

    display::section_top("HEADER");
    display::field("File", &file.display().to_string());
    display::field("Version", &header.version.to_string());
    display::field(
        "Normalization",
        if header.flags.nfd_normalized() { "NFD" } else { "plain" },
    );
    display::field("Documents", &header.doc_count.to_string());
    display::field("Terms", &header.term_count.to_string());
    display::section_bot();

    display::section_top("SECTIONS");
    let sections = [
        ("Header", (0, IndexHeader::SIZE)),
        ("Docs", offsets.docs),
        ("Vocabulary", offsets.vocabulary),
        ("Postings", offsets.postings),
        ("Footer", offsets.footer),
    ];
    for (name, (start, end)) in sections {
        display::field(
            name,
            &format!(
                "{:>10}  {}",
                display::format_size(end.saturating_sub(start)),
                display::styled(&[DIM], &format!("[{}..{})", start, end))
            ),
        );
    }
    display::field(
        "Total",
        &format!(
            "{:>10}  brotli {}",
            display::format_size(bytes.len()),
            display::compressed_size(bytes.len(), brotli_size(&bytes)?)
        ),
    );
    display::section_bot();

    display::section_top("VALIDATION");
    match SearchIndex::from_bytes(&bytes) {
        Ok(index) => {
            display::row(&display::styled(&[display::GREEN, BOLD], "valid"));
            display::field("Postings", &index.postings().iter().map(Vec::len).sum::<usize>().to_string());
        }
        Err(e) => display::row(&display::styled(&[display::YELLOW, BOLD], &format!("invalid: {}", e))),
    }
    display::section_bot();
    Ok(())
}

// ============================================================================
// SEARCH
// ============================================================================

fn run_search(index_dir: &Path, query: &str, config: EngineConfig, json: bool) -> Result<()> {
    let store = FileStore::new(index_dir);
    if store.get(&config.cache_key)?.is_none() && !index_dir.join(COMPACT_FILE).exists() {
        bail!("no index in {}; run `ayat index` first", index_dir.display());
    }

    let corpus = CompactCorpus::new(index_dir.join(COMPACT_FILE));
    let engine = SearchEngine::new(corpus, store, config);

    let start = Instant::now();
    let results = engine.search(query);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_results(query, &results, elapsed_ms);
    }
    Ok(())
}

fn print_results(query: &str, results: &[SearchResult], elapsed_ms: f64) {
    display::section_top("SEARCH");
    display::field("Query", query);
    display::field("Results", &results.len().to_string());
    display::field("Time", &display::timing_ms(elapsed_ms));
    display::section_bot();

    if results.is_empty() {
        return;
    }

    display::section_top("RESULTS");
    for result in results {
        display::row(&format!(
            "{} {}  {} {}",
            display::score_value(result.score),
            display::verse_ref(result.surah_number, result.verse_number),
            result.surah_english_name,
            display::styled(&[DIM], &result.edition),
        ));
        display::row(&format!("        {}", result.raw_text));
    }
    display::section_bot();
}
