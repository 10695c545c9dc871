// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! End-to-end walkthroughs.

use ayat_search::{IndexBuilder, SearchIndex, VerseDocument};

use crate::common::{fatiha_docs, fatiha_index, make_doc, verses, FATIHA, FATIHA_ENGLISH, FATIHA_NAME};

#[test]
fn fatiha_survives_persist_and_restore() {
    let index = fatiha_index();
    let restored = SearchIndex::from_bytes(&index.to_bytes()).expect("valid index");

    assert_eq!(restored, index);
    for query in ["الرحمن", "الرح", "العالمين", "faatiha", "بسم الله"] {
        assert_eq!(restored.search(query), index.search(query), "query {:?}", query);
    }
}

#[test]
fn results_carry_stored_fields() {
    let index = fatiha_index();
    let results = index.search("مالك يوم الدين");
    assert_eq!(results.len(), 1);

    let hit = &results[0];
    assert_eq!(hit.document_id, "1:4:quran-uthmani");
    assert_eq!(hit.surah_number, 1);
    assert_eq!(hit.verse_number, 4);
    assert_eq!(hit.surah_name, FATIHA_NAME);
    assert_eq!(hit.surah_english_name, FATIHA_ENGLISH);
    assert_eq!(hit.raw_text, FATIHA[3]);
    assert_eq!(hit.edition, "quran-uthmani");
    assert!(hit.score > 0.0);
}

#[test]
fn same_verse_in_two_editions_yields_two_results() {
    let mut docs = fatiha_docs();
    docs.push(VerseDocument::new(1, 1, "quran-warsh", FATIHA_NAME, FATIHA_ENGLISH, "بِسْمِ اِ۬للَّهِ اِ۬لرَّحْمَٰنِ اِ۬لرَّحِيمِ"));
    let index = SearchIndex::build(docs);

    let results = index.search("بسم");
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.verse_number == 1));
    let mut editions: Vec<&str> = results.iter().map(|r| r.edition.as_str()).collect();
    editions.sort_unstable();
    assert_eq!(editions, vec!["quran-uthmani", "quran-warsh"]);
}

#[test]
fn later_document_with_same_id_replaces_earlier() {
    let mut builder = IndexBuilder::new();
    builder.add(make_doc(1, 1, "", "", "قديم"));
    builder.add(make_doc(1, 2, "", "", "ثابت"));
    let replaced = builder.add(make_doc(1, 1, "", "", "جديد"));

    assert!(replaced);
    assert_eq!(builder.len(), 2);
    // First position is kept
    assert_eq!(builder.docs()[0].raw_text, "جديد");

    let index = builder.build();
    assert_eq!(index.len(), 2);
    assert!(index.search("قديم").is_empty());
    assert_eq!(verses(&index.search("جديد")), vec![1]);
    assert_eq!(index.get("1:1:quran-uthmani").map(|d| d.raw_text.as_str()), Some("جديد"));
}

#[test]
fn blank_and_punctuation_queries_return_nothing() {
    let index = fatiha_index();
    for query in ["", "   ", "\t\n", "،؛ ... !?", "\u{064E}\u{0651}"] {
        assert!(index.search(query).is_empty(), "query {:?}", query);
    }
}

#[test]
fn empty_index_returns_nothing() {
    let index = SearchIndex::empty();
    assert!(index.search("الله").is_empty());
    assert_eq!(SearchIndex::from_bytes(&index.to_bytes()).unwrap(), index);
}

#[test]
fn shorter_verse_scores_at_least_as_high() {
    let index = SearchIndex::build([
        make_doc(1, 1, FATIHA_NAME, FATIHA_ENGLISH, "بِسْمِ اللَّهِ الرَّحْمَـٰنِ الرَّحِيمِ"),
        make_doc(1, 3, FATIHA_NAME, FATIHA_ENGLISH, "الرَّحْمَـٰنِ الرَّحِيمِ"),
    ]);
    let restored = SearchIndex::from_bytes(&index.to_bytes()).unwrap();

    let results = restored.search("الرحمن");
    assert_eq!(results.len(), 2);
    let score = |verse: u16| results.iter().find(|r| r.verse_number == verse).unwrap().score;
    assert!(score(3) >= score(1));
    assert_eq!(results, index.search("الرحمن"));
}
