// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The compact verse export (`all-ayat.json`).
//!
//! One JSON array, one short-keyed object per verse:
//!
//! ```json
//! [{ "id": "1:1:quran-uthmani", "s": 1, "n": "سُورَةُ ٱلْفَاتِحَةِ", "e": "Al-Faatiha",
//!    "a": 1, "t": "بِسْمِ ٱللَّهِ ...", "ed": "quran-uthmani" }]
//! ```
//!
//! It carries raw text only. Normalized text is recomputed on load, so an
//! export stays valid when normalization rules change.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{read_json, CorpusSource};
use crate::error::CorpusError;
use crate::types::{document_id, VerseDocument, VerseRecord};

/// One verse in the compact export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactVerse {
    pub id: String,
    /// Surah number
    pub s: u16,
    /// Surah name
    pub n: String,
    /// Surah English name
    pub e: String,
    /// Verse number
    pub a: u16,
    /// Raw text
    pub t: String,
    /// Edition
    pub ed: String,
}

impl From<&VerseDocument> for CompactVerse {
    fn from(doc: &VerseDocument) -> Self {
        Self {
            id: doc.id().to_string(),
            s: doc.surah_number,
            n: doc.surah_name.clone(),
            e: doc.surah_english_name.clone(),
            a: doc.verse_number,
            t: doc.raw_text.clone(),
            ed: doc.edition.clone(),
        }
    }
}

impl From<CompactVerse> for VerseRecord {
    fn from(verse: CompactVerse) -> Self {
        Self {
            surah_number: verse.s,
            verse_number: verse.a,
            edition: verse.ed,
            surah_name: verse.n,
            surah_english_name: verse.e,
            text: verse.t,
        }
    }
}

/// Serialize documents to the compact export, in the order given.
pub fn export_compact(docs: &[VerseDocument]) -> Result<String, serde_json::Error> {
    let compact: Vec<CompactVerse> = docs.iter().map(CompactVerse::from).collect();
    serde_json::to_string(&compact)
}

/// Parse a compact export back into records.
///
/// An `id` that disagrees with `s`/`a`/`ed` means the file was edited by
/// hand or produced by something else; that's rejected rather than guessed at.
pub fn parse_compact(json: &str) -> Result<Vec<VerseRecord>, CorpusError> {
    let verses: Vec<CompactVerse> =
        serde_json::from_str(json).map_err(|source| CorpusError::Json {
            path: PathBuf::from("<compact>"),
            source,
        })?;
    into_records(verses)
}

fn into_records(verses: Vec<CompactVerse>) -> Result<Vec<VerseRecord>, CorpusError> {
    verses
        .into_iter()
        .map(|verse| {
            let expected = document_id(verse.s, verse.a, &verse.ed);
            if verse.id != expected {
                return Err(CorpusError::Invalid(format!(
                    "id {:?} does not match {:?}",
                    verse.id, expected
                )));
            }
            Ok(VerseRecord::from(verse))
        })
        .collect()
}

/// Reads verses from a compact export file.
#[derive(Debug, Clone)]
pub struct CompactCorpus {
    path: PathBuf,
}

impl CompactCorpus {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CorpusSource for CompactCorpus {
    fn load(&self) -> Result<Vec<VerseRecord>, CorpusError> {
        let verses: Vec<CompactVerse> = read_json(&self.path)?;
        into_records(verses)
    }
}
