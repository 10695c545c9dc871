// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search invariants over generated corpora.

use std::collections::HashSet;

use proptest::prelude::*;

use ayat_search::{tokenize, Combine, SearchIndex, SearchOptions};

use crate::strategies::{arabic_text, corpus};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(150))]

    /// Every indexed word finds every verse it occurs in.
    #[test]
    fn indexed_words_are_findable(docs in corpus()) {
        let index = SearchIndex::build(docs);
        for verse in index.docs() {
            for word in tokenize(&verse.raw_text) {
                let results = index.search(&word);
                prop_assert!(
                    results.iter().any(|r| r.document_id == verse.id),
                    "{:?} did not find {}", word, verse.id
                );
            }
        }
    }

    /// Ranked by score, ties by (surah, verse); ids unique.
    #[test]
    fn results_are_ranked(docs in corpus(), query in arabic_text()) {
        let index = SearchIndex::build(docs);
        let results = index.search(&query);

        prop_assert!(results.iter().all(|r| r.score > 0.0 && r.score.is_finite()));
        for pair in results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(
                    (pair[0].surah_number, pair[0].verse_number)
                        <= (pair[1].surah_number, pair[1].verse_number)
                );
            }
        }
        let unique: HashSet<&str> = results.iter().map(|r| r.document_id.as_str()).collect();
        prop_assert_eq!(unique.len(), results.len());
    }

    /// AND results are a subset of OR results.
    #[test]
    fn and_is_subset_of_or(docs in corpus(), query in arabic_text()) {
        let index = SearchIndex::build(docs);
        let and = index.search(&query);
        let or = index.search_with(&query, &SearchOptions { combine: Combine::Or, ..SearchOptions::default() });

        let or_ids: HashSet<&str> = or.iter().map(|r| r.document_id.as_str()).collect();
        prop_assert!(and.iter().all(|r| or_ids.contains(r.document_id.as_str())));
    }

    /// A limit returns a prefix of the unlimited ranking.
    #[test]
    fn limit_is_a_prefix(docs in corpus(), query in arabic_text(), limit in 0usize..5) {
        let index = SearchIndex::build(docs);
        let all = index.search(&query);
        let limited = index.search_with(&query, &SearchOptions { limit: Some(limit), ..SearchOptions::default() });
        prop_assert_eq!(&limited[..], &all[..limit.min(all.len())]);
    }
}
