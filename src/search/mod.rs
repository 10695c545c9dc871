// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query execution: tokenize, expand, accumulate, rank.
//!
//! ```text
//! "الرح العالمين"
//!      │ tokenize (same normalizer as the index)
//!      ▼
//! ["الرح", "العالمين"]
//!      │ expand each token: exact / prefix / fuzzy
//!      ▼
//! {الرحمن, الرحيم}  {العالمين}
//!      │ walk postings, score, best per (doc, field) per token
//!      ▼
//! doc → Σ score   (AND: every token hit; OR: any token)
//!      │ sort: score ↓, surah ↑, verse ↑, ordinal ↑
//!      ▼
//! Vec<SearchResult>
//! ```
//!
//! The index is immutable, so `search` takes `&self` and any number of
//! threads can query one `Arc<SearchIndex>` at once.

mod accumulator;
pub mod expand;

use tracing::trace;

use crate::index::SearchIndex;
use crate::scoring::ranking::{compare_results, RankedDoc};
use crate::scoring::{field_score, term_relevance};
use crate::types::{SearchOptions, SearchResult};
use crate::util::normalize::tokenize;

use accumulator::Accumulator;
pub use expand::{expand_token, Expansion};

impl SearchIndex {
    /// Search with default options.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        self.search_with(query, &SearchOptions::default())
    }

    /// Search with explicit options.
    ///
    /// An empty or whitespace-only query returns no results. Results are
    /// ordered by descending score; ties go to the earlier surah and verse.
    pub fn search_with(&self, query: &str, options: &SearchOptions) -> Vec<SearchResult> {
        let tokens = tokenize(query);
        if tokens.is_empty() || self.is_empty() {
            return Vec::new();
        }

        let mut acc = Accumulator::new(tokens.len());
        for token in &tokens {
            let expansions = expand_token(self, token, options);
            trace!(token = %token, expansions = expansions.len(), "expanded query token");

            for expansion in &expansions {
                let doc_freq = self.doc_freq(expansion.term_idx);
                for posting in self.postings_for(expansion.term_idx) {
                    let relevance = term_relevance(
                        posting.term_freq,
                        self.field_len(posting.doc, posting.field),
                        self.avg_field_len(posting.field),
                        doc_freq,
                        self.len(),
                    );
                    let score =
                        field_score(&options.boosts, posting.field, expansion.quality, relevance);
                    acc.offer(posting.doc, posting.field, score);
                }
            }
            acc.finish_token();
        }

        let mut ranked: Vec<RankedDoc> = acc
            .into_matches(options.combine)
            .into_iter()
            .map(|(ordinal, score)| RankedDoc { ordinal, score })
            .collect();
        ranked.sort_by(|a, b| compare_results(a, b, self.docs()));
        if let Some(limit) = options.limit {
            ranked.truncate(limit);
        }

        ranked
            .iter()
            .filter_map(|r| {
                self.docs()
                    .get(r.ordinal as usize)
                    .map(|doc| SearchResult::from_stored(doc, r.score))
            })
            .collect()
    }
}
