// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Multi-token score accumulation with AND/OR filtering.

use std::collections::HashMap;

use crate::types::{Combine, Field};

/// Accumulates scores across query tokens.
///
/// Within one token, a (doc, field) pair keeps only its best contribution,
/// so a token that expands to five terms in the same field doesn't score
/// five times. Across fields and tokens, contributions add up.
#[derive(Debug)]
pub(crate) struct Accumulator {
    /// Cumulative score per document ordinal
    doc_scores: HashMap<u32, f64>,
    /// Number of distinct query tokens that hit each document
    doc_token_hits: HashMap<u32, usize>,
    /// Best contribution per (doc, field) for the token in progress
    current: HashMap<(u32, Field), f64>,
    num_tokens: usize,
}

impl Accumulator {
    pub(crate) fn new(num_tokens: usize) -> Self {
        Self {
            doc_scores: HashMap::new(),
            doc_token_hits: HashMap::new(),
            current: HashMap::new(),
            num_tokens,
        }
    }

    /// Offer a contribution for the token in progress.
    #[inline]
    pub(crate) fn offer(&mut self, doc: u32, field: Field, score: f64) {
        self.current
            .entry((doc, field))
            .and_modify(|best| *best = best.max(score))
            .or_insert(score);
    }

    /// Fold the token in progress into the running totals.
    pub(crate) fn finish_token(&mut self) {
        // Fixed summation order: float addition isn't associative
        let mut entries: Vec<((u32, Field), f64)> = self.current.drain().collect();
        entries.sort_unstable_by_key(|((doc, field), _)| (*doc, field.index()));

        let mut touched: Vec<u32> = Vec::with_capacity(entries.len());
        for ((doc, _), score) in entries {
            *self.doc_scores.entry(doc).or_insert(0.0) += score;
            touched.push(doc);
        }
        touched.dedup();
        for doc in touched {
            *self.doc_token_hits.entry(doc).or_insert(0) += 1;
        }
    }

    /// Matching documents and their scores, unordered.
    pub(crate) fn into_matches(self, combine: Combine) -> Vec<(u32, f64)> {
        let Self { doc_scores, doc_token_hits, num_tokens, .. } = self;
        doc_scores
            .into_iter()
            .filter(|(doc, _)| match combine {
                Combine::Or => true,
                Combine::And => doc_token_hits.get(doc).copied() == Some(num_tokens),
            })
            .collect()
    }
}
