// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Input generators shared by the property tests.

use proptest::prelude::*;

use ayat_search::VerseDocument;

/// Arabic letters with hamza forms, tashkeel, tatweel, and spaces.
pub fn arabic_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            8 => prop::sample::select(vec!['ا', 'ب', 'ت', 'ح', 'د', 'ر', 'س', 'ل', 'م', 'ن', 'ه', 'و', 'ي']),
            2 => prop::sample::select(vec!['أ', 'إ', 'آ', 'ٱ', 'ؤ', 'ئ', 'ة', 'ى']),
            2 => prop::sample::select(vec!['\u{064B}', '\u{064E}', '\u{0650}', '\u{0651}', '\u{0652}', '\u{0670}', '\u{0640}', '\u{06DF}']),
            2 => Just(' '),
        ],
        0..48,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// Text mixing scripts, case, punctuation, and tajweed-style brackets.
pub fn mixed_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => prop::sample::select(vec!['ا', 'ل', 'ح', 'م', 'د', 'ٱ', 'ة', 'ى']),
            2 => prop::sample::select(vec!['a', 'B', 'z', 'É', 'ö', 'İ', '1', '7']),
            2 => prop::sample::select(vec!['[', ']', ':', 'h', 'l', 'n']),
            2 => prop::sample::select(vec!['\u{064E}', '\u{0651}', '\u{0301}', '\u{0640}']),
            1 => prop::sample::select(vec!['\u{0591}', '\u{05B0}', '\u{0327}', '\u{06DE}']),
            2 => prop::sample::select(vec![' ', '-', '.', '،', '\t']),
        ],
        0..40,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// One short Arabic word, no marks.
pub fn arabic_word() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!['ا', 'ب', 'ت', 'ح', 'د', 'ر', 'س', 'ل', 'م', 'ن', 'ه', 'و', 'ي']),
        1..8,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// A small corpus: 1..8 verses across 1..3 surahs and two editions.
pub fn corpus() -> impl Strategy<Value = Vec<VerseDocument>> {
    prop::collection::vec((1u16..4, 1u16..10, prop::bool::ANY, arabic_text()), 1..8).prop_map(
        |verses| {
            verses
                .into_iter()
                .map(|(surah, verse, warsh, text)| {
                    let edition = if warsh { "quran-warsh" } else { "quran-uthmani" };
                    VerseDocument::new(surah, verse, edition, "سُورَةٌ", format!("Surah-{}", surah), text)
                })
                .collect()
        },
    )
}
