// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ordering and combination.

use ayat_search::{Combine, FieldBoosts, SearchIndex, SearchOptions, VerseDocument};

use crate::common::{fatiha_index, ids, verses};

#[test]
fn text_match_outranks_name_match() {
    let index = SearchIndex::build([
        VerseDocument::new(24, 1, "quran-uthmani", "سُورَةُ النُّورِ", "An-Noor", "سُورَةٌ أَنزَلْنَـٰهَا"),
        VerseDocument::new(24, 35, "quran-uthmani", "سُورَةُ النُّورِ", "An-Noor", "ٱللَّهُ نُورُ ٱلسَّمَـٰوَٰتِ"),
    ]);

    // نور is in 24:35's text; النور is only in the surah name
    let results = index.search("نور");
    assert_eq!(verses(&results)[0], 35);

    let results = index.search("noor");
    assert_eq!(results.len(), 2);
    let name_only = results[0].score;

    let text = index.search("نور")[0].score;
    assert!(text > name_only, "text {} should beat name {}", text, name_only);
}

#[test]
fn boosts_change_field_weighting() {
    let index = SearchIndex::build([
        VerseDocument::new(1, 1, "e", "", "Light", "darkness"),
        VerseDocument::new(1, 2, "e", "", "Darkness", "light"),
    ]);

    let default = index.search("light");
    assert_eq!(verses(&default), vec![2, 1]);

    let names_first = SearchOptions {
        boosts: FieldBoosts { normalized_text: 0.1, raw_text: 0.1, surah_name: 5.0 },
        ..SearchOptions::default()
    };
    assert_eq!(verses(&index.search_with("light", &names_first)), vec![1, 2]);
}

#[test]
fn ties_break_by_surah_verse_then_corpus_order() {
    let index = SearchIndex::build([
        VerseDocument::new(2, 5, "e1", "", "", "kitab"),
        VerseDocument::new(1, 7, "e1", "", "", "kitab"),
        VerseDocument::new(1, 7, "e2", "", "", "kitab"),
    ]);

    let results = index.search("kitab");
    assert!(results.windows(2).all(|w| w[0].score == w[1].score));
    assert_eq!(ids(&results), vec!["1:7:e1", "1:7:e2", "2:5:e1"]);
}

#[test]
fn limit_truncates_after_ranking() {
    let index = fatiha_index();
    let all = index.search("faatiha");
    assert_eq!(all.len(), 4);

    let options = SearchOptions { limit: Some(2), ..SearchOptions::default() };
    let limited = index.search_with("faatiha", &options);
    assert_eq!(limited, all[..2].to_vec());
}

#[test]
fn and_requires_every_token() {
    let index = fatiha_index();
    assert_eq!(verses(&index.search("الرحمن الرحيم")), vec![3, 1]);
    assert!(index.search("الرحمن الحمد").is_empty());
}

#[test]
fn or_accepts_any_token() {
    let index = fatiha_index();
    let options = SearchOptions { combine: Combine::Or, ..SearchOptions::default() };
    let mut found = verses(&index.search_with("الرحمن الحمد", &options));
    found.sort_unstable();
    assert_eq!(found, vec![1, 2, 3]);
}

#[test]
fn more_matching_tokens_score_higher_under_or() {
    let index = fatiha_index();
    let options = SearchOptions { combine: Combine::Or, ..SearchOptions::default() };
    let results = index.search_with("بسم الرحمن", &options);
    // Verse 1 has both tokens, verse 3 only one
    assert_eq!(verses(&results), vec![1, 3]);
}

#[test]
fn repeated_searches_are_identical() {
    let index = fatiha_index();
    let first = index.search("الرح faatiha");
    for _ in 0..10 {
        assert_eq!(index.search("الرح faatiha"), first);
    }
}
