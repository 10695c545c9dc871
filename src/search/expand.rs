// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query token expansion: one token in, a set of vocabulary terms out.
//!
//! Three ways a token reaches a term, cheapest first:
//!
//! ```text
//! exact   binary search              O(log V)
//! prefix  contiguous vocabulary run  O(log V + matches)
//! fuzzy   bounded Levenshtein scan   O(V) with length pre-filter
//! ```
//!
//! A term reachable several ways keeps whichever kind scores best.

use std::collections::HashMap;

use crate::fuzzy::{bounded_distance, edit_budget};
use crate::index::SearchIndex;
use crate::scoring::{match_quality, MatchKind};
use crate::types::SearchOptions;
use crate::util::normalize::char_len;

/// A vocabulary term a query token expanded to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Expansion {
    pub term_idx: usize,
    pub kind: MatchKind,
    pub quality: f64,
}

/// Expand one normalized query token against the vocabulary.
///
/// Results are sorted by vocabulary slot.
pub fn expand_token(index: &SearchIndex, token: &str, options: &SearchOptions) -> Vec<Expansion> {
    let query_len = char_len(token);
    let mut best: HashMap<usize, Expansion> = HashMap::new();

    let mut offer = |term_idx: usize, kind: MatchKind| {
        let quality = match_quality(kind, query_len);
        best.entry(term_idx)
            .and_modify(|e| {
                if quality > e.quality {
                    *e = Expansion { term_idx, kind, quality };
                }
            })
            .or_insert(Expansion { term_idx, kind, quality });
    };

    if let Some(term_idx) = index.term_index(token) {
        offer(term_idx, MatchKind::Exact);
    }

    if options.prefix {
        for term_idx in index.prefix_range(token) {
            let term_len = char_len(&index.vocabulary()[term_idx]);
            if term_len > query_len {
                offer(term_idx, MatchKind::Prefix { extra_chars: term_len - query_len });
            }
        }
    }

    let budget = edit_budget(query_len, options.fuzzy);
    if budget > 0 {
        for (term_idx, term) in index.vocabulary().iter().enumerate() {
            match bounded_distance(token, term, budget) {
                Some(0) | None => {}
                Some(distance) => offer(
                    term_idx,
                    MatchKind::Fuzzy { distance, term_len: char_len(term) },
                ),
            }
        }
    }

    let mut expansions: Vec<Expansion> = best.into_values().collect();
    expansions.sort_by_key(|e| e.term_idx);
    expansions
}
