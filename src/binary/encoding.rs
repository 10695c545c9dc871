// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary encoding primitives: varint, length-prefixed strings, and front
//! compression.
//!
//! Varint for integers that are usually small. Front compression for sorted
//! strings that share prefixes, which Arabic vocabularies do a lot of
//! (`ال` alone opens a large share of all terms).
//!
//! # References
//!
//! - **Varint (LEB128)**: Little-endian base-128 variable-length integer encoding.
//!   See Google Protocol Buffers encoding: <https://protobuf.dev/programming-guides/encoding/>
//!
//! - **Front Compression**: Witten, Moffat, Bell (1999): "Managing Gigabytes",
//!   §3.3 "Front Coding".

use super::header::{MAX_STRING_LEN, MAX_VARINT_BYTES};
use crate::error::FormatError;

// ============================================================================
// VARINT ENCODING
// ============================================================================

/// Encode a varint to bytes
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        } else {
            buf.push(byte | 0x80);
        }
    }
}

/// Decode a varint from bytes, returning `(value, bytes_consumed)`.
///
/// Returns `None` if the buffer ends mid-varint, the varint runs past
/// [`MAX_VARINT_BYTES`], or its last byte overflows a `u64`.
pub fn decode_varint(bytes: &[u8]) -> Option<(u64, usize)> {
    let mut result: u64 = 0;
    let mut shift = 0;

    for (i, &byte) in bytes.iter().take(MAX_VARINT_BYTES).enumerate() {
        // The last byte carries bit 63 only
        if i == MAX_VARINT_BYTES - 1 && byte > 1 {
            return None;
        }
        result |= u64::from(byte & 0x7F).checked_shl(shift).unwrap_or(0);
        if byte & 0x80 == 0 {
            return Some((result, i + 1));
        }
        shift += 7;
    }
    None
}

/// Append a length-prefixed UTF-8 string.
pub fn encode_str(s: &str, buf: &mut Vec<u8>) {
    encode_varint(s.len() as u64, buf);
    buf.extend_from_slice(s.as_bytes());
}

// ============================================================================
// SECTION READER
// ============================================================================

/// Bounds-checked sequential reader over one section.
///
/// Every read either succeeds or returns a `FormatError` naming the section.
/// Nothing here can panic on hostile input.
#[derive(Debug)]
pub struct SectionReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    section: &'static str,
}

impl<'a> SectionReader<'a> {
    pub fn new(bytes: &'a [u8], section: &'static str) -> Self {
        Self { bytes, pos: 0, section }
    }

    /// Bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos == self.bytes.len()
    }

    pub fn read_varint(&mut self) -> Result<u64, FormatError> {
        let rest = &self.bytes[self.pos..];
        match decode_varint(rest) {
            Some((value, consumed)) => {
                self.pos += consumed;
                Ok(value)
            }
            None if rest.len() < MAX_VARINT_BYTES && rest.iter().all(|b| b & 0x80 != 0) => {
                Err(FormatError::Truncated { section: self.section })
            }
            None => Err(FormatError::InvalidVarint { section: self.section }),
        }
    }

    /// Read a varint that must fit in a `u32`.
    pub fn read_u32(&mut self) -> Result<u32, FormatError> {
        let value = self.read_varint()?;
        u32::try_from(value).map_err(|_| self.corrupt(format!("value {} overflows u32", value)))
    }

    /// Read a varint that must fit in a `u16`.
    pub fn read_u16(&mut self) -> Result<u16, FormatError> {
        let value = self.read_varint()?;
        u16::try_from(value).map_err(|_| self.corrupt(format!("value {} overflows u16", value)))
    }

    /// Read a varint used as a count or length, bounded by `max`.
    pub fn read_len(&mut self, what: &'static str, max: usize) -> Result<usize, FormatError> {
        let value = self.read_varint()?;
        if value > max as u64 {
            return Err(FormatError::LimitExceeded { what, value, max: max as u64 });
        }
        Ok(value as usize)
    }

    pub fn read_u8(&mut self) -> Result<u8, FormatError> {
        let byte = *self
            .bytes
            .get(self.pos)
            .ok_or(FormatError::Truncated { section: self.section })?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], FormatError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(FormatError::Truncated { section: self.section })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_str(&mut self) -> Result<&'a str, FormatError> {
        let len = self.read_len("string length", MAX_STRING_LEN)?;
        let bytes = self.read_bytes(len)?;
        std::str::from_utf8(bytes).map_err(|_| FormatError::InvalidUtf8 { section: self.section })
    }

    /// Error for the whole section being used up exactly.
    pub fn expect_end(&self) -> Result<(), FormatError> {
        if self.is_at_end() {
            Ok(())
        } else {
            Err(self.corrupt(format!("{} trailing bytes", self.remaining())))
        }
    }

    pub fn corrupt(&self, reason: String) -> FormatError {
        FormatError::Corrupt { section: self.section, reason }
    }
}

// ============================================================================
// VOCABULARY (front compression)
// ============================================================================

/// Find common prefix length between two byte slices.
#[inline]
fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Encode a sorted vocabulary with front compression.
///
/// Per term: `varint(shared_prefix_len) varint(suffix_len) suffix_bytes`.
pub fn encode_vocabulary(vocabulary: &[String], out: &mut Vec<u8>) {
    let mut prev: &[u8] = &[];

    for term in vocabulary {
        let bytes = term.as_bytes();
        let shared = common_prefix_len(prev, bytes);
        let suffix = &bytes[shared..];

        encode_varint(shared as u64, out);
        encode_varint(suffix.len() as u64, out);
        out.extend_from_slice(suffix);

        prev = bytes;
    }
}

/// Decode a front-compressed vocabulary of `term_count` terms.
///
/// Checks that terms come out strictly ascending, so the binary searches
/// over the result are sound.
pub fn decode_vocabulary(bytes: &[u8], term_count: usize) -> Result<Vec<String>, FormatError> {
    let mut reader = SectionReader::new(bytes, "vocabulary");
    // Every term takes at least two bytes
    if term_count > bytes.len() / 2 {
        return Err(FormatError::Truncated { section: "vocabulary" });
    }

    let mut terms: Vec<String> = Vec::with_capacity(term_count);
    let mut prev_bytes: Vec<u8> = Vec::new();

    for i in 0..term_count {
        let shared = reader.read_len("shared prefix length", prev_bytes.len())?;
        let suffix_len = reader.read_len("term length", MAX_STRING_LEN)?;
        let suffix = reader.read_bytes(suffix_len)?;

        // Reconstruct term: shared prefix + suffix
        let mut term_bytes = prev_bytes[..shared].to_vec();
        term_bytes.extend_from_slice(suffix);

        let term = String::from_utf8(term_bytes)
            .map_err(|_| FormatError::InvalidUtf8 { section: "vocabulary" })?;
        if term.is_empty() || terms.last().is_some_and(|last| last.as_str() >= term.as_str()) {
            return Err(reader.corrupt(format!("term {} out of order", i)));
        }

        prev_bytes.clear();
        prev_bytes.extend_from_slice(term.as_bytes());
        terms.push(term);
    }

    reader.expect_end()?;
    Ok(terms)
}
