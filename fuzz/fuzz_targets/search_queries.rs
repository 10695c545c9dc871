// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Arbitrary queries against a fixed Al-Fatiha index.

#![no_main]

use std::sync::OnceLock;

use ayat_search::testing::fatiha_docs;
use ayat_search::{Combine, SearchIndex, SearchOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, bool, u8)| {
    static INDEX: OnceLock<SearchIndex> = OnceLock::new();
    let index = INDEX.get_or_init(|| SearchIndex::build(fatiha_docs()));

    let (query, any, limit) = input;
    // Cap query length on a char boundary to avoid timeouts
    let query: String = query.chars().take(200).collect();

    let options = SearchOptions {
        combine: if any { Combine::Or } else { Combine::And },
        limit: Some(usize::from(limit % 8)),
        ..SearchOptions::default()
    };
    let results = index.search_with(&query, &options);

    assert!(results.len() <= usize::from(limit % 8));
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    for result in &results {
        assert!(result.score.is_finite() && result.score > 0.0);
        assert!(index.get(&result.document_id).is_some());
    }
});
