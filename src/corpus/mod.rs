// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Where verses come from.
//!
//! The engine never reads files itself. It asks a [`CorpusSource`] for
//! records, whenever it needs to build. Two on-disk layouts are supported:
//!
//! - [`BundledCorpus`]: the app's offline data directory, one JSON file per
//!   surah per edition, plus a surah list for names.
//! - [`CompactCorpus`]: the flat `all-ayat.json` export, one short-keyed
//!   record per verse. Faster to hydrate than the bundled layout.
//!
//! A plain `Vec<VerseRecord>` is a source too, which is what tests use.

mod bundled;
pub mod compact;

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

pub use bundled::{BundledCorpus, DEFAULT_EDITIONS};
pub use compact::{export_compact, parse_compact, CompactCorpus, CompactVerse};

use crate::error::CorpusError;
use crate::types::VerseRecord;

/// A read-only supplier of verse records.
///
/// `load` may be called more than once over an engine's life (after
/// `invalidate`), and from whichever thread triggers the build.
pub trait CorpusSource: Send + Sync {
    fn load(&self) -> Result<Vec<VerseRecord>, CorpusError>;
}

impl CorpusSource for Vec<VerseRecord> {
    fn load(&self) -> Result<Vec<VerseRecord>, CorpusError> {
        Ok(self.clone())
    }
}

impl<T: CorpusSource + ?Sized> CorpusSource for Box<T> {
    fn load(&self) -> Result<Vec<VerseRecord>, CorpusError> {
        (**self).load()
    }
}

impl<T: CorpusSource + ?Sized> CorpusSource for std::sync::Arc<T> {
    fn load(&self) -> Result<Vec<VerseRecord>, CorpusError> {
        (**self).load()
    }
}

/// Read and parse one JSON file, attaching the path to any error.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CorpusError> {
    let content = fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CorpusError::Json {
        path: path.to_path_buf(),
        source,
    })
}
