// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format header and footer structures.
//!
//! The header is 28 bytes of fixed-size fields, parsed before anything else.
//! It says exactly where every section lives.
//!
//! The footer is 8 bytes: a CRC32 checksum over everything before it, plus a
//! magic number ("TAYA", the header magic reversed). If the footer is wrong,
//! something got corrupted or truncated. Don't trust the data.
//!
//! `SectionOffsets` is the single source of truth for the file layout. The
//! encoder and the decoder both go through it.

use crc32fast::Hasher as Crc32Hasher;

use crate::error::FormatError;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "AYAT" in ASCII (header)
pub const MAGIC: [u8; 4] = *b"AYAT";

/// Footer magic: "TAYA" (reversed, marks valid file end)
pub const FOOTER_MAGIC: [u8; 4] = *b"TAYA";

/// Current format version
pub const VERSION: u8 = 4;

// ============================================================================
// SECURITY LIMITS (prevent resource exhaustion from malicious input)
// ============================================================================

/// Maximum file size: 256 MB
pub const MAX_FILE_SIZE: usize = 256 * 1024 * 1024;

/// Maximum number of documents
pub const MAX_DOC_COUNT: u32 = 1_000_000;

/// Maximum number of terms
pub const MAX_TERM_COUNT: u32 = 10_000_000;

/// Maximum posting list size per term
pub const MAX_POSTING_SIZE: usize = 10_000_000;

/// Maximum length of any stored string, in bytes
pub const MAX_STRING_LEN: usize = 1024 * 1024;

/// Maximum varint bytes (u64 needs at most 10 bytes)
pub const MAX_VARINT_BYTES: usize = 10;

// ============================================================================
// FLAGS
// ============================================================================

/// Format flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags(pub(crate) u8);

impl FormatFlags {
    /// Terms were normalized with Unicode NFD decomposition.
    pub const NFD_NORMALIZED: u8 = 0b0000_0001;

    /// Flags describing how this build normalizes text.
    pub fn current() -> Self {
        if cfg!(feature = "unicode-normalization") {
            Self(Self::NFD_NORMALIZED)
        } else {
            Self(0)
        }
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn nfd_normalized(self) -> bool {
        self.0 & Self::NFD_NORMALIZED != 0
    }
}

// ============================================================================
// HEADER
// ============================================================================

/// Binary format header (28 bytes fixed size)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHeader {
    pub version: u8,
    pub flags: FormatFlags,
    pub doc_count: u32,
    pub term_count: u32,
    pub docs_len: u32,
    pub vocab_len: u32,
    pub postings_len: u32,
}

impl IndexHeader {
    // 4 (magic) + 1 (version) + 1 (flags) + 5*4 (u32s) + 2 (reserved) = 28
    pub const SIZE: usize = 28;

    pub fn section_offsets(&self) -> SectionOffsets {
        SectionOffsets::from_header(self)
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&MAGIC);
        out.push(self.version);
        out.push(self.flags.0);
        out.extend_from_slice(&self.doc_count.to_le_bytes());
        out.extend_from_slice(&self.term_count.to_le_bytes());
        out.extend_from_slice(&self.docs_len.to_le_bytes());
        out.extend_from_slice(&self.vocab_len.to_le_bytes());
        out.extend_from_slice(&self.postings_len.to_le_bytes());
        out.extend_from_slice(&[0u8; 2]); // reserved
    }

    /// Parse the header and check magic, version, and count limits.
    ///
    /// Doesn't look at anything past the header, so `inspect` can use it on
    /// a file whose body is damaged.
    pub fn read(bytes: &[u8]) -> Result<Self, FormatError> {
        let buf: &[u8; Self::SIZE] = bytes
            .get(..Self::SIZE)
            .and_then(|b| b.try_into().ok())
            .ok_or(FormatError::TooShort { len: bytes.len() })?;

        let magic = [buf[0], buf[1], buf[2], buf[3]];
        if magic != MAGIC {
            return Err(FormatError::BadMagic { found: magic });
        }

        let version = buf[4];
        if version != VERSION {
            return Err(FormatError::UnsupportedVersion {
                found: version,
                expected: VERSION,
            });
        }

        let u32_at = |at: usize| u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]]);
        let header = Self {
            version,
            flags: FormatFlags(buf[5]),
            doc_count: u32_at(6),
            term_count: u32_at(10),
            docs_len: u32_at(14),
            vocab_len: u32_at(18),
            postings_len: u32_at(22),
            // buf[26..28] is reserved
        };

        if header.doc_count > MAX_DOC_COUNT {
            return Err(FormatError::LimitExceeded {
                what: "document count",
                value: u64::from(header.doc_count),
                max: u64::from(MAX_DOC_COUNT),
            });
        }
        if header.term_count > MAX_TERM_COUNT {
            return Err(FormatError::LimitExceeded {
                what: "term count",
                value: u64::from(header.term_count),
                max: u64::from(MAX_TERM_COUNT),
            });
        }

        Ok(header)
    }
}

// ============================================================================
// FOOTER (8 bytes)
// ============================================================================

/// Footer with CRC32 checksum and magic number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexFooter {
    /// CRC32 checksum of header + all sections (everything before footer)
    pub crc32: u32,
}

impl IndexFooter {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.crc32.to_le_bytes());
        out.extend_from_slice(&FOOTER_MAGIC);
    }

    /// Read the footer from the last 8 bytes.
    pub fn read(bytes: &[u8]) -> Result<Self, FormatError> {
        let start = bytes
            .len()
            .checked_sub(Self::SIZE)
            .ok_or(FormatError::TooShort { len: bytes.len() })?;
        let tail = &bytes[start..];

        let magic = [tail[4], tail[5], tail[6], tail[7]];
        if magic != FOOTER_MAGIC {
            return Err(FormatError::BadFooterMagic { found: magic });
        }

        Ok(Self {
            crc32: u32::from_le_bytes([tail[0], tail[1], tail[2], tail[3]]),
        })
    }

    /// Compute CRC32 over the given bytes
    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}

// ============================================================================
// SECTION OFFSETS
// ============================================================================

/// Section byte ranges.
///
/// Layout:
/// 1. HEADER      [28B]
/// 2. DOCS        [docs_len]     - document store
/// 3. VOCABULARY  [vocab_len]    - front-coded sorted terms
/// 4. POSTINGS    [postings_len] - one list per term, delta-coded doc ordinals
/// 5. FOOTER      [8B]           - CRC32 validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionOffsets {
    pub docs: (usize, usize),
    pub vocabulary: (usize, usize),
    pub postings: (usize, usize),
    pub footer: (usize, usize),
}

impl SectionOffsets {
    pub fn from_header(h: &IndexHeader) -> Self {
        let mut pos = IndexHeader::SIZE;

        let docs = (pos, pos + h.docs_len as usize);
        pos = docs.1;

        let vocabulary = (pos, pos + h.vocab_len as usize);
        pos = vocabulary.1;

        let postings = (pos, pos + h.postings_len as usize);
        pos = postings.1;

        Self {
            docs,
            vocabulary,
            postings,
            footer: (pos, pos + IndexFooter::SIZE),
        }
    }

    /// Expected content size (everything before footer)
    pub fn content_size(&self) -> usize {
        self.footer.0
    }

    /// Total file size including footer
    pub fn total_size(&self) -> usize {
        self.footer.1
    }

    /// Get a slice for a section from the bytes
    #[inline]
    pub fn slice<'a>(&self, bytes: &'a [u8], section: (usize, usize)) -> Option<&'a [u8]> {
        bytes.get(section.0..section.1)
    }
}
