// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers.
//!
//! Two things decide a score. How well the query token matched the indexed
//! term (exact beats prefix beats fuzzy), and which field it matched in
//! (normalized text beats raw text beats surah name). The constants are
//! chosen so the first ordering can't be overturned by term statistics.

mod core;
pub mod ranking;

pub use core::*;
