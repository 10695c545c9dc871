// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;

use ayat_search::corpus::{export_compact, parse_compact};
use ayat_search::{
    BundledCorpus, CompactCorpus, CorpusError, CorpusSource, EngineConfig, MemoryStore,
    SearchEngine, VerseDocument,
};

use crate::common::{fatiha_docs, write_bundled_layout, FATIHA, FATIHA_ENGLISH, FATIHA_NAME};

const TAJWEED_FATIHA: [&str; 2] = [
    "بِسْمِ [h:1[ٱ]للَّهِ [h:2[ٱ]لرَّحْمَ[n[ـٰ]نِ [h:3[ٱ]لرَّحِيمِ",
    "[h:5[ٱ]لْحَمْدُ لِلَّهِ رَبِّ [h:6[ٱ]لْعَ[n[ـٰ]لَمِينَ",
];

fn write_fixture(root: &std::path::Path) {
    write_bundled_layout(
        root,
        &[(1, FATIHA_NAME, FATIHA_ENGLISH), (112, "سُورَةُ الإِخْلَاصِ", "Al-Ikhlaas")],
        &[
            ("quran-uthmani", 1, &FATIHA[..]),
            ("quran-uthmani", 112, &["قُلْ هُوَ ٱللَّهُ أَحَدٌ"][..]),
            ("quran-tajweed", 1, &TAJWEED_FATIHA[..]),
        ],
    )
    .unwrap();
}

#[test]
fn bundled_corpus_reads_editions_in_order() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    let records = BundledCorpus::new(dir.path()).load().unwrap();
    // quran-warsh is absent and skipped
    assert_eq!(records.len(), 4 + 1 + 2);

    let keys: Vec<(String, u16, u16)> = records
        .iter()
        .map(|r| (r.edition.clone(), r.surah_number, r.verse_number))
        .collect();
    assert_eq!(keys[0], ("quran-uthmani".to_string(), 1, 1));
    assert_eq!(keys[4], ("quran-uthmani".to_string(), 112, 1));
    assert_eq!(keys[5], ("quran-tajweed".to_string(), 1, 1));

    assert_eq!(records[4].surah_english_name, "Al-Ikhlaas");
    assert_eq!(records[0].surah_name, FATIHA_NAME);
}

#[test]
fn bundled_corpus_sorts_surahs_numerically() {
    let dir = tempfile::tempdir().unwrap();
    write_bundled_layout(
        dir.path(),
        &[(2, "", "Al-Baqara"), (10, "", "Yunus")],
        &[("quran-uthmani", 10, &["الر"][..]), ("quran-uthmani", 2, &["الم"][..])],
    )
    .unwrap();
    fs::write(dir.path().join("surah/quran-uthmani/notes.json"), "{}").unwrap();

    let records = BundledCorpus::new(dir.path()).with_editions(["quran-uthmani"]).load().unwrap();
    let surahs: Vec<u16> = records.iter().map(|r| r.surah_number).collect();
    assert_eq!(surahs, vec![2, 10]);
}

#[test]
fn bundled_corpus_errors_on_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    fs::write(dir.path().join("surah/quran-uthmani/2.json"), "{ not json").unwrap();

    let err = BundledCorpus::new(dir.path()).load().unwrap_err();
    assert!(matches!(err, CorpusError::Json { .. }), "{:?}", err);
}

#[test]
fn bundled_corpus_without_surah_list_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let err = BundledCorpus::new(dir.path()).load().unwrap_err();
    assert!(matches!(err, CorpusError::Io { .. }), "{:?}", err);
}

#[test]
fn engine_over_bundled_corpus_finds_every_edition() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    let engine = SearchEngine::new(BundledCorpus::new(dir.path()), MemoryStore::new(), EngineConfig::default());

    let results = engine.search("الحمد");
    let mut ids: Vec<&str> = results.iter().map(|r| r.document_id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["1:2:quran-tajweed", "1:2:quran-uthmani"]);

    let results = engine.search("احد");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].document_id, "112:1:quran-uthmani");

    // Name-only match through the English surah name
    let results = engine.search("ikhlaas");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].surah_number, 112);
}

#[test]
fn compact_export_feeds_compact_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("all-ayat.json");
    let docs = fatiha_docs();
    fs::write(&path, export_compact(&docs).unwrap()).unwrap();

    let records = CompactCorpus::new(&path).load().unwrap();
    let reloaded: Vec<VerseDocument> = records.into_iter().map(VerseDocument::from).collect();
    assert_eq!(reloaded, docs);
}

#[test]
fn compact_corpus_rejects_inconsistent_ids() {
    let json = r#"[{"id":"1:2:quran-uthmani","s":1,"n":"","e":"","a":1,"t":"x","ed":"quran-uthmani"}]"#;
    assert!(matches!(parse_compact(json), Err(CorpusError::Invalid(_))));
}

#[test]
fn compact_corpus_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CompactCorpus::new(dir.path().join("absent.json")).load().unwrap_err();
    assert!(matches!(err, CorpusError::Io { .. }));
}
