// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use std::fs;
use std::io;
use std::path::Path;

use crate::types::{VerseDocument, VerseRecord};

/// Surah 1 names as the bundled data spells them.
pub const FATIHA_NAME: &str = "سُورَةُ ٱلْفَاتِحَةِ";
pub const FATIHA_ENGLISH: &str = "Al-Faatiha";

/// The first four verses of Al-Fatiha, uthmani script.
pub const FATIHA: [&str; 4] = [
    "بِسْمِ ٱللَّهِ ٱلرَّحْمَـٰنِ ٱلرَّحِيمِ",
    "ٱلْحَمْدُ لِلَّهِ رَبِّ ٱلْعَـٰلَمِينَ",
    "ٱلرَّحْمَـٰنِ ٱلرَّحِيمِ",
    "مَـٰلِكِ يَوْمِ ٱلدِّينِ",
];

/// Create a record in surah 1.
pub fn make_record(verse: u16, edition: &str, text: &str) -> VerseRecord {
    VerseRecord {
        surah_number: 1,
        verse_number: verse,
        edition: edition.to_string(),
        surah_name: FATIHA_NAME.to_string(),
        surah_english_name: FATIHA_ENGLISH.to_string(),
        text: text.to_string(),
    }
}

/// Create a document with explicit surah names.
pub fn make_doc(surah: u16, verse: u16, name: &str, english: &str, text: &str) -> VerseDocument {
    VerseDocument::new(surah, verse, "quran-uthmani", name, english, text)
}

/// Al-Fatiha 1-4 as uthmani records.
pub fn fatiha_records() -> Vec<VerseRecord> {
    FATIHA
        .iter()
        .enumerate()
        .map(|(i, text)| make_record(i as u16 + 1, "quran-uthmani", text))
        .collect()
}

/// Al-Fatiha 1-4 as uthmani documents.
pub fn fatiha_docs() -> Vec<VerseDocument> {
    fatiha_records().into_iter().map(VerseDocument::from).collect()
}

/// Write a bundled data directory: `surah-list.json` and one file per
/// (edition, surah).
pub fn write_bundled_layout(
    root: &Path,
    surahs: &[(u16, &str, &str)],
    editions: &[(&str, u16, &[&str])],
) -> io::Result<()> {
    let list: Vec<serde_json::Value> = surahs
        .iter()
        .map(|(number, name, english)| {
            serde_json::json!({ "number": number, "name": name, "englishName": english })
        })
        .collect();
    fs::write(root.join("surah-list.json"), serde_json::to_string(&list)?)?;

    for (edition, surah, verses) in editions {
        let dir = root.join("surah").join(edition);
        fs::create_dir_all(&dir)?;
        let ayahs: Vec<serde_json::Value> = verses
            .iter()
            .enumerate()
            .map(|(i, text)| serde_json::json!({ "numberInSurah": i + 1, "text": text }))
            .collect();
        let body = serde_json::json!({ "number": surah, "ayahs": ayahs });
        fs::write(dir.join(format!("{}.json", surah)), serde_json::to_string(&body)?)?;
    }
    Ok(())
}
