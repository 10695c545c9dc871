// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Persisted index parsing under adversarial input.
//!
//! A damaged or hostile cache file must end in an error and a rebuild,
//! never a crash or a runaway allocation.

#![no_main]

use ayat_search::SearchIndex;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(index) = SearchIndex::from_bytes(data) else {
        return;
    };

    // Anything that decodes is a well-formed index
    assert_eq!(index.vocabulary().len(), index.postings().len());
    assert!(index.vocabulary().windows(2).all(|w| w[0] < w[1]));
    for list in index.postings() {
        assert!(!list.is_empty());
        assert!(list.windows(2).all(|w| (w[0].doc, w[0].field) < (w[1].doc, w[1].field)));
        assert!(list.iter().all(|p| (p.doc as usize) < index.len() && p.term_freq > 0));
    }

    // And survives its own round trip
    let again = SearchIndex::from_bytes(&index.to_bytes()).expect("re-encoded index decodes");
    assert_eq!(again, index);
});
