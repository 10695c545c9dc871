// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a verse search index.
//!
//! A corpus source hands us [`VerseRecord`]s. Each becomes a [`VerseDocument`]
//! with its normalized text computed exactly once. The index keeps a
//! [`StoredVerse`] per document for rendering results and a posting list per
//! term; queries come back as [`SearchResult`]s.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **VerseDocument**: `normalized_text == normalize(raw_text)`. The field is
//!   private and only the constructor writes it.
//! - **VerseDocument id**: `"{surah}:{verse}:{edition}"`, unique per corpus.
//!   Two documents with the same id are the same document; the later one wins.
//! - **Field**: `NormalizedText > RawText > SurahName` in boost order. The
//!   derived `Ord` is declaration order and is used for deterministic
//!   serialization only, never for ranking.

use serde::{Deserialize, Serialize};

use crate::util::normalize::normalize;

// =============================================================================
// CORPUS RECORDS
// =============================================================================

/// One verse as supplied by a corpus source.
///
/// This is the raw shape: whatever the bundled data or the device cache
/// provides, before any normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseRecord {
    pub surah_number: u16,
    pub verse_number: u16,
    pub edition: String,
    #[serde(default)]
    pub surah_name: String,
    #[serde(default)]
    pub surah_english_name: String,
    pub text: String,
}

/// A verse ready for indexing: one per (surah, verse, edition).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseDocument {
    id: String,
    pub surah_number: u16,
    pub verse_number: u16,
    pub edition: String,
    pub surah_name: String,
    pub surah_english_name: String,
    pub raw_text: String,
    normalized_text: String,
}

impl VerseDocument {
    /// Create a document, deriving its id and normalized text.
    pub fn new(
        surah_number: u16,
        verse_number: u16,
        edition: impl Into<String>,
        surah_name: impl Into<String>,
        surah_english_name: impl Into<String>,
        raw_text: impl Into<String>,
    ) -> Self {
        let edition = edition.into();
        let raw_text = raw_text.into();
        let normalized_text = normalize(&raw_text);
        Self {
            id: document_id(surah_number, verse_number, &edition),
            surah_number,
            verse_number,
            edition,
            surah_name: surah_name.into(),
            surah_english_name: surah_english_name.into(),
            raw_text,
            normalized_text,
        }
    }

    /// Composite key `"{surah}:{verse}:{edition}"`.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// `normalize(raw_text)`, computed once at construction.
    #[inline]
    pub fn normalized_text(&self) -> &str {
        &self.normalized_text
    }

    /// Text of the given field, before tokenization.
    ///
    /// The name field carries both the Arabic and the transliterated surah
    /// name so either can be searched.
    pub fn field_text(&self, field: Field) -> String {
        match field {
            Field::NormalizedText => self.normalized_text.clone(),
            Field::RawText => self.raw_text.clone(),
            Field::SurahName => {
                format!("{} {}", self.surah_name, self.surah_english_name)
            }
        }
    }

    /// The subset of fields kept for rendering results.
    pub fn to_stored(&self) -> StoredVerse {
        StoredVerse {
            id: self.id.clone(),
            surah_number: self.surah_number,
            verse_number: self.verse_number,
            edition: self.edition.clone(),
            surah_name: self.surah_name.clone(),
            surah_english_name: self.surah_english_name.clone(),
            raw_text: self.raw_text.clone(),
        }
    }
}

impl From<VerseRecord> for VerseDocument {
    fn from(record: VerseRecord) -> Self {
        VerseDocument::new(
            record.surah_number,
            record.verse_number,
            record.edition,
            record.surah_name,
            record.surah_english_name,
            record.text,
        )
    }
}

/// Build the composite document id.
#[inline]
pub fn document_id(surah_number: u16, verse_number: u16, edition: &str) -> String {
    format!("{}:{}:{}", surah_number, verse_number, edition)
}

/// Document store entry: what a result needs without going back to the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredVerse {
    pub id: String,
    pub surah_number: u16,
    pub verse_number: u16,
    pub edition: String,
    pub surah_name: String,
    pub surah_english_name: String,
    pub raw_text: String,
}

// =============================================================================
// FIELDS
// =============================================================================

/// Which indexed field a posting came from.
///
/// **Gotcha**: the derived `Ord` follows declaration order. Don't use it for
/// ranking - use [`FieldBoosts::boost`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    NormalizedText,
    RawText,
    SurahName,
}

impl Field {
    /// All fields, in index order.
    pub const ALL: [Field; 3] = [Field::NormalizedText, Field::RawText, Field::SurahName];

    /// Number of indexed fields.
    pub const COUNT: usize = 3;

    /// Slot in per-field arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Field::index`], used by the binary decoder.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Field::NormalizedText),
            1 => Some(Field::RawText),
            2 => Some(Field::SurahName),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Field::NormalizedText => "normalizedText",
            Field::RawText => "rawText",
            Field::SurahName => "surahName",
        }
    }
}

// =============================================================================
// QUERY OPTIONS
// =============================================================================

/// Per-field score multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldBoosts {
    pub normalized_text: f64,
    pub raw_text: f64,
    pub surah_name: f64,
}

impl Default for FieldBoosts {
    fn default() -> Self {
        Self {
            normalized_text: 3.0,
            raw_text: 2.0,
            surah_name: 1.0,
        }
    }
}

impl FieldBoosts {
    #[inline]
    pub fn boost(&self, field: Field) -> f64 {
        match field {
            Field::NormalizedText => self.normalized_text,
            Field::RawText => self.raw_text,
            Field::SurahName => self.surah_name,
        }
    }
}

/// How per-token matches combine into a document match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combine {
    /// Every query token must match somewhere in the document.
    #[default]
    And,
    /// Any query token matching is enough.
    Or,
}

/// Query-time matching knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SearchOptions {
    /// Edit budget as a fraction of token length. `0.0` disables fuzzy.
    pub fuzzy: f64,
    /// Expand tokens to vocabulary terms they are a prefix of.
    pub prefix: bool,
    pub combine: Combine,
    pub boosts: FieldBoosts,
    /// Cap on returned results. `None` returns everything that matched.
    pub limit: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            fuzzy: 0.15,
            prefix: true,
            combine: Combine::And,
            boosts: FieldBoosts::default(),
            limit: None,
        }
    }
}

// =============================================================================
// RESULTS
// =============================================================================

/// One ranked hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub document_id: String,
    pub surah_number: u16,
    pub surah_name: String,
    pub surah_english_name: String,
    pub verse_number: u16,
    pub raw_text: String,
    pub edition: String,
    pub score: f64,
}

impl SearchResult {
    pub(crate) fn from_stored(verse: &StoredVerse, score: f64) -> Self {
        Self {
            document_id: verse.id.clone(),
            surah_number: verse.surah_number,
            surah_name: verse.surah_name.clone(),
            surah_english_name: verse.surah_english_name.clone(),
            verse_number: verse.verse_number,
            raw_text: verse.raw_text.clone(),
            edition: verse.edition.clone(),
            score,
        }
    }
}
