// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how search results get sorted.
//!
//! Score first. When scores tie (the same verse text in two editions often
//! does), fall back to the order a reader would expect: surah, then verse,
//! then the order the corpus supplied the documents in. That last key makes
//! the sort total, so the same query over the same index always returns the
//! same sequence.

use crate::types::StoredVerse;
use std::cmp::Ordering;

/// A scored document before it is turned into a `SearchResult`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedDoc {
    /// Position in the index's document store.
    pub ordinal: u32,
    pub score: f64,
}

/// Compare two scored documents for ranking.
///
/// Sort order:
/// 1. **Score** - descending
/// 2. **Surah number** - ascending
/// 3. **Verse number** - ascending
/// 4. **Ordinal** - corpus order, final tiebreaker
pub fn compare_results(a: &RankedDoc, b: &RankedDoc, docs: &[StoredVerse]) -> Ordering {
    match b.score.partial_cmp(&a.score) {
        Some(ord) if ord != Ordering::Equal => ord,
        _ => natural_order(a.ordinal, b.ordinal, docs),
    }
}

fn natural_order(a: u32, b: u32, docs: &[StoredVerse]) -> Ordering {
    let key = |ordinal: u32| {
        docs.get(ordinal as usize)
            .map_or((u16::MAX, u16::MAX), |d| (d.surah_number, d.verse_number))
    };
    key(a).cmp(&key(b)).then(a.cmp(&b))
}
