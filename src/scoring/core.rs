// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind search ranking.
//!
//! A posting's contribution to a document score is
//!
//! ```text
//! boost(field) × quality(match kind) × relevance(tf, field length, df)
//! ```
//!
//! summed over fields and query tokens.
//!
//! # Key Invariant: Match Kind Dominance
//!
//! `relevance` is squeezed into `[RELEVANCE_FLOOR, 1.0)`, and every non-exact
//! quality stays below `EXACT_QUALITY × RELEVANCE_FLOOR`:
//!
//! ```text
//! worst exact  = 1.0 × 0.5          = 0.5
//! best prefix  < 0.5 × 1.0          = 0.5
//! best fuzzy   = 0.3 × 0.8 × 1.3    ≈ 0.31
//! ```
//!
//! So within one field, an exact hit always outranks a prefix or fuzzy hit,
//! whatever the term frequencies and document lengths.
//!
//! # Constants
//!
//! | Constant | Value | Why this value |
//! |----------|-------|----------------|
//! | `EXACT_QUALITY` | 1.0 | Baseline |
//! | `PREFIX_QUALITY` | 0.5 | Scaled by `query_len / term_len`, so strictly below 0.5 |
//! | `FUZZY_DISTANCE_1` | 0.3 | Before edit penalty and length bonus |
//! | `RELEVANCE_FLOOR` | 0.5 | Keeps exact above the best non-exact |

use crate::types::{Field, FieldBoosts};

// =============================================================================
// SCORING CONSTANTS
// =============================================================================

/// Quality of an exact term match.
pub const EXACT_QUALITY: f64 = 1.0;

/// Quality ceiling of a prefix match, before the length ratio.
pub const PREFIX_QUALITY: f64 = 0.5;

/// Base qualities for fuzzy matches by edit distance.
pub const FUZZY_DISTANCE_1: f64 = 0.3;
pub const FUZZY_DISTANCE_2: f64 = 0.15;
pub const FUZZY_DISTANCE_3: f64 = 0.05;

/// Penalty per edit (20% per edit).
pub const FUZZY_EDIT_PENALTY: f64 = 0.2;

/// Length similarity bonus coefficient (30% of quality).
pub const FUZZY_LENGTH_BONUS: f64 = 0.3;

/// Lower end of the relevance range.
pub const RELEVANCE_FLOOR: f64 = 0.5;

/// BM25 parameters
pub const BM25_K1: f64 = 1.2;
pub const BM25_B: f64 = 0.7;

/// How a query token reached an indexed term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    /// The token is a strict prefix of a term `extra_chars` longer.
    Prefix { extra_chars: usize },
    /// The term is `distance` edits away and `term_len` characters long.
    Fuzzy { distance: usize, term_len: usize },
}

/// How good a match is, independent of where it landed.
///
/// Exact is 1.0. Prefix decays with how much of the term the token leaves
/// unmatched. Fuzzy decays with edit distance and length mismatch.
pub fn match_quality(kind: MatchKind, query_len: usize) -> f64 {
    match kind {
        MatchKind::Exact => EXACT_QUALITY,
        MatchKind::Prefix { extra_chars } => {
            let query_len = query_len.max(1) as f64;
            PREFIX_QUALITY * query_len / (query_len + extra_chars as f64)
        }
        MatchKind::Fuzzy { distance, term_len } => fuzzy_quality(distance, query_len, term_len),
    }
}

/// Fuzzy match quality with edit distance penalty and length bonus.
#[inline]
fn fuzzy_quality(distance: usize, query_len: usize, term_len: usize) -> f64 {
    let base = match distance {
        0 => return EXACT_QUALITY,
        1 => FUZZY_DISTANCE_1,
        2 => FUZZY_DISTANCE_2,
        _ => FUZZY_DISTANCE_3,
    };

    // Apply edit distance penalty, floored so distant matches stay positive
    let penalty = (1.0 - distance as f64 * FUZZY_EDIT_PENALTY).max(FUZZY_EDIT_PENALTY);
    let penalized = base * penalty;

    // Prefer terms with similar length to the query token
    let length_diff = query_len.abs_diff(term_len);
    let length_bonus = 1.0 / (1.0 + length_diff as f64);
    penalized * (1.0 + length_bonus * FUZZY_LENGTH_BONUS)
}

/// BM25 weight for one term in one field, squeezed into `[RELEVANCE_FLOOR, 1)`.
///
/// Arguments:
/// - `term_freq`: occurrences of the term in this document's field
/// - `field_len`: tokens in this document's field
/// - `avg_field_len`: mean tokens in this field across the corpus
/// - `doc_freq`: documents containing the term (any field)
/// - `num_docs`: documents in the index
pub fn term_relevance(
    term_freq: u32,
    field_len: u32,
    avg_field_len: f64,
    doc_freq: usize,
    num_docs: usize,
) -> f64 {
    let tf = f64::from(term_freq);
    let dl = f64::from(field_len);
    let avg = if avg_field_len > 0.0 { avg_field_len } else { 1.0 };
    let n = num_docs as f64;
    let df = (doc_freq as f64).min(n);

    // IDF component: log((N - df + 0.5) / (df + 0.5) + 1), always positive
    let idf = ((n - df + 0.5) / (df + 0.5) + 1.0).ln();

    // TF component with length normalization, in [0, K1 + 1)
    let tf_norm = (tf * (BM25_K1 + 1.0)) / (tf + BM25_K1 * (1.0 - BM25_B + BM25_B * dl / avg));

    let saturation = (tf_norm / (BM25_K1 + 1.0)) * (idf / (idf + 1.0));
    RELEVANCE_FLOOR + (1.0 - RELEVANCE_FLOOR) * saturation.clamp(0.0, 1.0)
}

/// One field's contribution for one query token.
#[inline]
pub fn field_score(boosts: &FieldBoosts, field: Field, quality: f64, relevance: f64) -> f64 {
    boosts.boost(field) * quality * relevance
}
