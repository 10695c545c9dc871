// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Persisted index format.
//!
//! An index is built once per corpus snapshot and rehydrated on later
//! launches, so the bytes written today must decode identically tomorrow or
//! be rejected outright. Rejected is fine: the engine rebuilds. Misread is
//! not.
//!
//! ```text
//! ┌────────────┬──────────────┬──────────────┬──────────────┬────────────┐
//! │ HEADER 28B │ DOCS         │ VOCABULARY   │ POSTINGS     │ FOOTER 8B  │
//! │ AYAT v4    │ string dict  │ front-coded  │ delta docs   │ CRC32 TAYA │
//! └────────────┴──────────────┴──────────────┴──────────────┴────────────┘
//! ```
//!
//! Field lengths, document frequencies, and the id map aren't stored. They
//! are derived from the decoded postings exactly the way a fresh build
//! derives them.
//!
//! # Decode checks, in order
//!
//! 1. Size within [`header::MAX_FILE_SIZE`]
//! 2. Header magic, version, count limits
//! 3. Normalization flags match this build
//! 4. Total size matches the header's section lengths
//! 5. Footer magic, then CRC32 over header + sections
//! 6. Each section decodes fully, with every index invariant checked

pub mod encoding;
pub mod header;
mod docs;
mod postings;

use tracing::debug;

use crate::error::FormatError;
use crate::index::SearchIndex;

use header::{FormatFlags, IndexFooter, IndexHeader, MAX_FILE_SIZE, VERSION};

impl SearchIndex {
    /// Serialize to the self-contained binary format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut docs_buf = Vec::new();
        docs::encode_docs(self.docs(), &mut docs_buf);

        let mut vocab_buf = Vec::new();
        encoding::encode_vocabulary(self.vocabulary(), &mut vocab_buf);

        let mut postings_buf = Vec::new();
        postings::encode_postings(self.postings(), &mut postings_buf);

        let header = IndexHeader {
            version: VERSION,
            flags: FormatFlags::current(),
            doc_count: self.len() as u32,
            term_count: self.term_count() as u32,
            docs_len: docs_buf.len() as u32,
            vocab_len: vocab_buf.len() as u32,
            postings_len: postings_buf.len() as u32,
        };

        let mut out = Vec::with_capacity(header.section_offsets().total_size());
        header.write(&mut out);
        out.extend_from_slice(&docs_buf);
        out.extend_from_slice(&vocab_buf);
        out.extend_from_slice(&postings_buf);

        let crc32 = IndexFooter::compute_crc32(&out);
        IndexFooter { crc32 }.write(&mut out);

        debug!(
            bytes = out.len(),
            docs = docs_buf.len(),
            vocabulary = vocab_buf.len(),
            postings = postings_buf.len(),
            "serialized index"
        );
        out
    }

    /// Restore an index from [`SearchIndex::to_bytes`] output.
    ///
    /// Never panics: any malformed input is a `FormatError`.
    pub fn from_bytes(bytes: &[u8]) -> Result<SearchIndex, FormatError> {
        if bytes.len() > MAX_FILE_SIZE {
            return Err(FormatError::TooLarge {
                len: bytes.len(),
                max: MAX_FILE_SIZE,
            });
        }

        let header = IndexHeader::read(bytes)?;
        if header.flags != FormatFlags::current() {
            return Err(FormatError::NormalizationMismatch {
                found: header.flags.bits(),
            });
        }

        let offsets = header.section_offsets();
        if bytes.len() != offsets.total_size() {
            return Err(FormatError::SizeMismatch {
                expected: offsets.total_size(),
                actual: bytes.len(),
            });
        }

        let footer = IndexFooter::read(bytes)?;
        let computed = IndexFooter::compute_crc32(&bytes[..offsets.content_size()]);
        if footer.crc32 != computed {
            return Err(FormatError::ChecksumMismatch {
                stored: footer.crc32,
                computed,
            });
        }

        let section = |range: (usize, usize), name: &'static str| {
            offsets
                .slice(bytes, range)
                .ok_or(FormatError::Truncated { section: name })
        };

        let doc_count = header.doc_count as usize;
        let term_count = header.term_count as usize;

        let docs = docs::decode_docs(section(offsets.docs, "docs")?, doc_count)?;
        let vocabulary =
            encoding::decode_vocabulary(section(offsets.vocabulary, "vocabulary")?, term_count)?;
        let postings =
            postings::decode_postings(section(offsets.postings, "postings")?, term_count, doc_count)?;

        Ok(SearchIndex::assemble(docs, vocabulary, postings))
    }
}

/// Read just the header, for reporting.
pub fn peek_header(bytes: &[u8]) -> Result<IndexHeader, FormatError> {
    IndexHeader::read(bytes)
}
