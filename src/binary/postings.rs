// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! POSTINGS section: one list per vocabulary term, in vocabulary order.
//!
//! ```text
//! per term: varint(count)
//!   per posting: varint(doc_delta) u8(field) varint(term_freq)
//! ```
//!
//! `doc_delta` is the gap from the previous posting's doc in the same list
//! (0 when two fields of one doc follow each other). Lists are sorted by
//! (doc, field), so deltas are small and never negative.

use super::encoding::{encode_varint, SectionReader};
use super::header::MAX_POSTING_SIZE;
use crate::error::FormatError;
use crate::index::Posting;
use crate::types::Field;

const SECTION: &str = "postings";

/// Minimum encoded size of one posting.
const MIN_POSTING_BYTES: usize = 3;

pub(crate) fn encode_postings(lists: &[Vec<Posting>], out: &mut Vec<u8>) {
    for list in lists {
        encode_varint(list.len() as u64, out);
        let mut prev_doc = 0u32;
        for posting in list {
            encode_varint(u64::from(posting.doc - prev_doc), out);
            out.push(posting.field.index() as u8);
            encode_varint(u64::from(posting.term_freq), out);
            prev_doc = posting.doc;
        }
    }
}

/// Decode `term_count` posting lists and check every list invariant:
/// non-empty, sorted by (doc, field) without duplicates, doc in range,
/// known field, positive frequency.
pub(crate) fn decode_postings(
    bytes: &[u8],
    term_count: usize,
    doc_count: usize,
) -> Result<Vec<Vec<Posting>>, FormatError> {
    let mut reader = SectionReader::new(bytes, SECTION);
    if term_count > bytes.len() / (1 + MIN_POSTING_BYTES) {
        return Err(FormatError::Truncated { section: SECTION });
    }

    let mut lists = Vec::with_capacity(term_count);
    for term in 0..term_count {
        let max_count = MAX_POSTING_SIZE.min(reader.remaining() / MIN_POSTING_BYTES);
        let count = reader.read_len("posting list size", max_count)?;
        if count == 0 {
            return Err(reader.corrupt(format!("term {} has no postings", term)));
        }

        let mut list = Vec::with_capacity(count);
        let mut prev: Option<(u32, Field)> = None;
        for _ in 0..count {
            let delta = reader.read_u32()?;
            let field_byte = reader.read_u8()?;
            let term_freq = reader.read_u32()?;

            let doc = prev
                .map_or(0, |(doc, _)| doc)
                .checked_add(delta)
                .filter(|&doc| (doc as usize) < doc_count)
                .ok_or_else(|| reader.corrupt(format!("term {} doc out of range", term)))?;
            let field = Field::from_index(field_byte)
                .ok_or_else(|| reader.corrupt(format!("unknown field {}", field_byte)))?;
            if term_freq == 0 {
                return Err(reader.corrupt(format!("term {} has zero frequency", term)));
            }
            if prev.is_some_and(|p| p >= (doc, field)) {
                return Err(reader.corrupt(format!("term {} postings out of order", term)));
            }

            prev = Some((doc, field));
            list.push(Posting { doc, field, term_freq });
        }
        lists.push(list);
    }

    reader.expect_end()?;
    Ok(lists)
}
