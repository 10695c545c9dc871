// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use proptest::prelude::*;

use ayat_search::util::normalize::{is_word_boundary, strip_tajweed};
use ayat_search::{normalize, tokenize};

use crate::strategies::{arabic_text, mixed_text};

/// Characters that must never survive normalization.
fn is_stripped(c: char) -> bool {
    matches!(c, '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{06D6}'..='\u{06ED}' | '\u{0640}')
        || matches!(c, 'آ' | 'أ' | 'إ' | 'ٱ' | 'ؤ' | 'ئ' | 'ة' | 'ى')
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn normalize_is_idempotent(text in mixed_text()) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_is_idempotent_on_arabic(text in arabic_text()) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalized_arabic_has_no_marks_or_variants(text in arabic_text()) {
        let normalized = normalize(&text);
        prop_assert!(!normalized.chars().any(is_stripped), "{:?}", normalized);
    }

    #[test]
    fn normalized_text_is_trimmed(text in mixed_text()) {
        let normalized = normalize(&text);
        prop_assert_eq!(normalized.trim(), normalized.as_str());
    }

    #[test]
    fn tokens_are_nonempty_words(text in mixed_text()) {
        for token in tokenize(&text) {
            prop_assert!(!token.is_empty());
            prop_assert!(!token.chars().any(is_word_boundary), "{:?}", token);
            prop_assert_eq!(normalize(&token), token.clone());
        }
    }

    #[test]
    fn tokenize_ignores_diacritics(text in arabic_text()) {
        let bare: String = text
            .chars()
            .filter(|c| !matches!(c, '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{0640}' | '\u{06DF}'))
            .collect();
        prop_assert_eq!(tokenize(&text), tokenize(&bare));
    }

    #[test]
    fn strip_tajweed_reaches_fixpoint(text in mixed_text()) {
        let once = strip_tajweed(&text);
        prop_assert_eq!(strip_tajweed(&once), once);
    }
}
