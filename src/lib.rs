// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Offline full-text search over Quranic text.
//!
//! Verses from several script editions go into one inverted index. Arabic
//! text is normalized (tashkeel, Quranic signs, tatweel and tajweed markup
//! stripped, hamza and taa marbuta forms unified) so an un-vowelled query
//! finds vowelled source text. Query tokens expand by prefix and bounded
//! edit distance, and matches in the verse text outrank matches in the
//! surah name.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   corpus     │────▶│    index     │────▶│   search     │
//! │ (bundled,    │     │ (vocabulary, │     │ (expand,     │
//! │  compact)    │     │  postings)   │     │  score, rank)│
//! └──────────────┘     └──────────────┘     └──────────────┘
//!        │                   │ ▲                   │
//!        │                   ▼ │                   │
//!        │            ┌──────────────┐             │
//!        │            │   binary     │             │
//!        │            │ (to_bytes,   │             │
//!        │            │  from_bytes) │             │
//!        │            └──────────────┘             │
//!        ▼                   │                     ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                     engine                          │
//! │  restore-or-build once, coalesced; persist in the   │
//! │  background through a `storage::IndexStore`         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Everything that turns text into terms goes through [`normalize`], on both
//! the build side and the query side.
//!
//! # Usage
//!
//! ```
//! use ayat_search::{EngineConfig, MemoryStore, SearchEngine, VerseRecord};
//!
//! let corpus = vec![VerseRecord {
//!     surah_number: 1,
//!     verse_number: 1,
//!     edition: "quran-uthmani".to_string(),
//!     surah_name: "سُورَةُ ٱلْفَاتِحَةِ".to_string(),
//!     surah_english_name: "Al-Faatiha".to_string(),
//!     text: "بِسْمِ ٱللَّهِ ٱلرَّحْمَـٰنِ ٱلرَّحِيمِ".to_string(),
//! }];
//!
//! let engine = SearchEngine::new(corpus, MemoryStore::new(), EngineConfig::default());
//! let results = engine.search("الرحمن");
//! assert_eq!(results[0].document_id, "1:1:quran-uthmani");
//! ```

// Module declarations
pub mod binary;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod fuzzy;
pub mod index;
pub mod scoring;
pub mod search;
pub mod storage;
pub mod types;
pub mod util;

#[doc(hidden)]
pub mod testing;

// Re-exports for public API
pub use config::{EngineConfig, DEFAULT_CACHE_KEY};
pub use corpus::{BundledCorpus, CompactCorpus, CorpusSource};
pub use engine::SearchEngine;
pub use error::{CorpusError, Error, FormatError, StoreError};
pub use index::{IndexBuilder, Posting, SearchIndex};
pub use storage::{FileStore, IndexStore, MemoryStore};
pub use types::{
    Combine, Field, FieldBoosts, SearchOptions, SearchResult, StoredVerse, VerseDocument,
    VerseRecord,
};
pub use util::normalize::{normalize, tokenize};
