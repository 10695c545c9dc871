// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Normalizer and tokenizer on arbitrary text.

#![no_main]

use ayat_search::{normalize, tokenize};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    let text: String = text.chars().take(1000).collect();

    let once = normalize(&text);
    assert_eq!(normalize(&once), once, "not idempotent for {:?}", text);

    for token in tokenize(&text) {
        assert!(!token.is_empty());
        assert!(token.chars().all(char::is_alphanumeric));
    }
});
