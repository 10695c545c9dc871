// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy search: typo tolerance via edit distance.
//!
//! A bounded Levenshtein with a length pre-filter, plus the rule that turns
//! a query token's length into its edit budget. The vocabulary is small
//! enough (tens of thousands of terms) that a linear scan with early exits
//! beats building an automaton per query.

mod levenshtein;

pub use levenshtein::*;
