// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! DOCS section: the document store.
//!
//! Every verse repeats its edition and both surah names, and there are only a
//! handful of editions and 114 surahs. So the section opens with a string
//! dictionary, and documents refer to it by index:
//!
//! ```text
//! varint(dict_len) str*
//! per doc: varint(surah) varint(verse) varint(edition_idx)
//!          varint(name_idx) varint(english_idx) str(raw_text)
//! ```
//!
//! Document ids aren't stored; they're rebuilt from (surah, verse, edition).

use std::collections::{HashMap, HashSet};

use super::encoding::{encode_str, encode_varint, SectionReader};
use super::header::MAX_DOC_COUNT;
use crate::error::FormatError;
use crate::types::{document_id, StoredVerse};

const SECTION: &str = "docs";

/// Insertion-ordered string dictionary.
#[derive(Debug, Default)]
struct StringTable<'a> {
    strings: Vec<&'a str>,
    lookup: HashMap<&'a str, u32>,
}

impl<'a> StringTable<'a> {
    fn intern(&mut self, s: &'a str) -> u32 {
        if let Some(&idx) = self.lookup.get(s) {
            return idx;
        }
        let idx = self.strings.len() as u32;
        self.strings.push(s);
        self.lookup.insert(s, idx);
        idx
    }
}

pub(crate) fn encode_docs(docs: &[StoredVerse], out: &mut Vec<u8>) {
    let mut table = StringTable::default();
    let refs: Vec<[u32; 3]> = docs
        .iter()
        .map(|doc| {
            [
                table.intern(&doc.edition),
                table.intern(&doc.surah_name),
                table.intern(&doc.surah_english_name),
            ]
        })
        .collect();

    encode_varint(table.strings.len() as u64, out);
    for s in &table.strings {
        encode_str(s, out);
    }

    for (doc, [edition, name, english]) in docs.iter().zip(refs) {
        encode_varint(u64::from(doc.surah_number), out);
        encode_varint(u64::from(doc.verse_number), out);
        encode_varint(u64::from(edition), out);
        encode_varint(u64::from(name), out);
        encode_varint(u64::from(english), out);
        encode_str(&doc.raw_text, out);
    }
}

pub(crate) fn decode_docs(bytes: &[u8], doc_count: usize) -> Result<Vec<StoredVerse>, FormatError> {
    let mut reader = SectionReader::new(bytes, SECTION);

    // A document takes at least six bytes
    if doc_count > MAX_DOC_COUNT as usize || doc_count > bytes.len() / 6 {
        return Err(FormatError::Truncated { section: SECTION });
    }

    let dict_len = reader.read_len("string table size", reader.remaining())?;
    let mut dict = Vec::with_capacity(dict_len);
    for _ in 0..dict_len {
        dict.push(reader.read_str()?);
    }

    let lookup = |reader: &SectionReader<'_>, idx: u32| -> Result<String, FormatError> {
        dict.get(idx as usize)
            .map(|s| s.to_string())
            .ok_or_else(|| reader.corrupt(format!("string index {} out of range", idx)))
    };

    let mut docs = Vec::with_capacity(doc_count);
    let mut seen = HashSet::with_capacity(doc_count);
    for _ in 0..doc_count {
        let surah_number = reader.read_u16()?;
        let verse_number = reader.read_u16()?;
        let edition_idx = reader.read_u32()?;
        let name_idx = reader.read_u32()?;
        let english_idx = reader.read_u32()?;
        let raw_text = reader.read_str()?.to_string();

        let edition = lookup(&reader, edition_idx)?;
        let id = document_id(surah_number, verse_number, &edition);
        if !seen.insert(id.clone()) {
            return Err(reader.corrupt(format!("duplicate document {}", id)));
        }

        docs.push(StoredVerse {
            id,
            surah_number,
            verse_number,
            edition,
            surah_name: lookup(&reader, name_idx)?,
            surah_english_name: lookup(&reader, english_idx)?,
            raw_text,
        });
    }

    reader.expect_end()?;
    Ok(docs)
}
