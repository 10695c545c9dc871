// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Engine configuration.
//!
//! Everything has a default, so an empty object (or no file at all) is a
//! valid configuration:
//!
//! ```json
//! {
//!   "cacheKey": "quran_search_index_v4",
//!   "search": { "fuzzy": 0.15, "prefix": true, "combine": "and",
//!               "boosts": { "normalizedText": 3.0, "rawText": 2.0, "surahName": 1.0 } },
//!   "editions": ["quran-uthmani", "quran-tajweed", "quran-warsh"]
//! }
//! ```
//!
//! Unknown keys are rejected so a typo doesn't silently fall back to a default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::corpus::DEFAULT_EDITIONS;
use crate::error::Error;
use crate::types::SearchOptions;

/// Store key the persisted index lives under. Bump the suffix whenever the
/// tokenization or the binary format changes meaning.
pub const DEFAULT_CACHE_KEY: &str = "quran_search_index_v4";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Key for the persisted index in the store.
    pub cache_key: String,
    /// Options every engine query runs with.
    pub search: SearchOptions,
    /// Editions read from a bundled data directory, in corpus order.
    pub editions: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_key: DEFAULT_CACHE_KEY.to_string(),
            search: SearchOptions::default(),
            editions: DEFAULT_EDITIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
