// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Persisted index properties.

use proptest::prelude::*;

use ayat_search::SearchIndex;

use crate::strategies::{arabic_text, corpus};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A restored index is indistinguishable from the one that was saved.
    #[test]
    fn restore_preserves_index(docs in corpus(), query in arabic_text()) {
        let index = SearchIndex::build(docs);
        let restored = SearchIndex::from_bytes(&index.to_bytes()).expect("own bytes decode");

        prop_assert_eq!(&restored, &index);
        prop_assert_eq!(restored.search(&query), index.search(&query));
    }

    /// Serialization is deterministic.
    #[test]
    fn encoding_is_stable(docs in corpus()) {
        let index = SearchIndex::build(docs);
        let bytes = index.to_bytes();
        prop_assert_eq!(SearchIndex::from_bytes(&bytes).unwrap().to_bytes(), bytes);
    }

    /// Arbitrary bytes are rejected or decoded, never a panic.
    #[test]
    fn decoder_never_panics_on_garbage(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = SearchIndex::from_bytes(&bytes);
    }

    /// Damaging a valid file is always caught.
    #[test]
    fn single_byte_damage_is_rejected(docs in corpus(), position in any::<prop::sample::Index>(), mask in 1u8..=255) {
        let mut bytes = SearchIndex::build(docs).to_bytes();
        let at = position.index(bytes.len());
        bytes[at] ^= mask;
        prop_assert!(SearchIndex::from_bytes(&bytes).is_err());
    }

    /// Truncation anywhere is rejected.
    #[test]
    fn truncation_is_rejected(docs in corpus(), position in any::<prop::sample::Index>()) {
        let bytes = SearchIndex::build(docs).to_bytes();
        let cut = position.index(bytes.len());
        prop_assert!(SearchIndex::from_bytes(&bytes[..cut]).is_err());
    }
}
