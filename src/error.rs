// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! None of these reach a search caller: the engine recovers from each of
//! them (rebuild, empty index, skipped write) and logs. They surface from the
//! lower-level APIs and the CLI.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The persisted index bytes could not be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("index too short: {len} bytes")]
    TooShort { len: usize },

    #[error("index too large: {len} bytes (max {max})")]
    TooLarge { len: usize, max: usize },

    #[error("invalid magic: expected AYAT, got {found:?}")]
    BadMagic { found: [u8; 4] },

    #[error("invalid footer magic: expected TAYA, got {found:?}")]
    BadFooterMagic { found: [u8; 4] },

    #[error("unsupported format version {found} (expected {expected})")]
    UnsupportedVersion { found: u8, expected: u8 },

    #[error("index was built with different text normalization (flags {found:#04x})")]
    NormalizationMismatch { found: u8 },

    #[error("checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("size mismatch: header describes {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("{what} {value} exceeds limit {max}")]
    LimitExceeded { what: &'static str, value: u64, max: u64 },

    #[error("truncated {section} section")]
    Truncated { section: &'static str },

    #[error("malformed varint in {section} section")]
    InvalidVarint { section: &'static str },

    #[error("invalid UTF-8 in {section} section")]
    InvalidUtf8 { section: &'static str },

    #[error("corrupt {section} section: {reason}")]
    Corrupt { section: &'static str, reason: String },
}

/// A corpus source could not be read.
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid corpus: {0}")]
    Invalid(String),
}

/// Durable storage failed.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage I/O on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid store key {0:?}")]
    InvalidKey(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Everything the crate can fail with.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
