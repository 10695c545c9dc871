// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The bundled offline data layout.
//!
//! ```text
//! <root>/
//! ├── surah-list.json             [{ "number": 1, "name": "...", "englishName": "..." }, ...]
//! └── surah/
//!     ├── quran-uthmani/
//!     │   ├── 1.json              { "ayahs": [{ "numberInSurah": 1, "text": "..." }, ...] }
//!     │   └── ...
//!     ├── quran-tajweed/
//!     └── quran-warsh/
//! ```
//!
//! Editions whose directory doesn't exist are skipped, so a partial download
//! still yields a searchable corpus. Files that aren't `<number>.json` are
//! ignored. Anything that exists but can't be read or parsed is an error.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{read_json, CorpusSource};
use crate::error::CorpusError;
use crate::types::VerseRecord;

/// Editions indexed when none are configured.
pub const DEFAULT_EDITIONS: [&str; 3] = ["quran-uthmani", "quran-tajweed", "quran-warsh"];

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct SurahInfo {
    number: u16,
    #[serde(default)]
    name: String,
    #[serde(default)]
    english_name: String,
}

#[derive(Deserialize, Clone, Debug)]
struct SurahFile {
    ayahs: Vec<Ayah>,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct Ayah {
    number_in_surah: u16,
    text: String,
}

/// Reads verses from the bundled data directory.
#[derive(Debug, Clone)]
pub struct BundledCorpus {
    root: PathBuf,
    editions: Vec<String>,
}

impl BundledCorpus {
    /// A corpus over `root` with the default editions.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            editions: DEFAULT_EDITIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Replace the edition list. Order is kept: it becomes corpus order.
    pub fn with_editions<I, S>(mut self, editions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.editions = editions.into_iter().map(Into::into).collect();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn editions(&self) -> &[String] {
        &self.editions
    }

    fn load_surah_names(&self) -> Result<HashMap<u16, SurahInfo>, CorpusError> {
        let list: Vec<SurahInfo> = read_json(&self.root.join("surah-list.json"))?;
        Ok(list.into_iter().map(|info| (info.number, info)).collect())
    }

    /// Surah files in one edition directory, sorted by surah number.
    fn surah_files(dir: &Path) -> Result<Vec<(u16, PathBuf)>, CorpusError> {
        let entries = fs::read_dir(dir).map_err(|source| CorpusError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| CorpusError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?
                .path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let number = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<u16>().ok());
            match number {
                Some(number) => files.push((number, path)),
                None => debug!(path = %path.display(), "skipping non-surah file"),
            }
        }

        files.sort_by_key(|(number, _)| *number);
        Ok(files)
    }
}

fn load_surah(
    number: u16,
    path: &Path,
    edition: &str,
    names: &HashMap<u16, SurahInfo>,
) -> Result<Vec<VerseRecord>, CorpusError> {
    let surah: SurahFile = read_json(path)?;
    let info = names.get(&number);
    if info.is_none() {
        warn!(surah = number, "surah missing from surah list, names left empty");
    }

    Ok(surah
        .ayahs
        .into_iter()
        .map(|ayah| VerseRecord {
            surah_number: number,
            verse_number: ayah.number_in_surah,
            edition: edition.to_string(),
            surah_name: info.map(|i| i.name.clone()).unwrap_or_default(),
            surah_english_name: info.map(|i| i.english_name.clone()).unwrap_or_default(),
            text: ayah.text,
        })
        .collect())
}

impl CorpusSource for BundledCorpus {
    fn load(&self) -> Result<Vec<VerseRecord>, CorpusError> {
        let names = self.load_surah_names()?;
        let surah_dir = self.root.join("surah");

        let mut records = Vec::new();
        for edition in &self.editions {
            let dir = surah_dir.join(edition);
            if !dir.is_dir() {
                debug!(edition = %edition, "edition not present, skipping");
                continue;
            }

            let files = Self::surah_files(&dir)?;

            #[cfg(feature = "parallel")]
            let iter = files.par_iter();
            #[cfg(not(feature = "parallel"))]
            let iter = files.iter();

            // Collect keeps file order, so corpus order is deterministic
            let surahs = iter
                .map(|(number, path)| load_surah(*number, path, edition, &names))
                .collect::<Result<Vec<_>, _>>()?;

            let before = records.len();
            records.extend(surahs.into_iter().flatten());
            debug!(edition = %edition, verses = records.len() - before, "loaded edition");
        }

        Ok(records)
    }
}
