// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Utility modules for string processing.
//!
//! Text normalization lives here because both sides of the search need it:
//! the index builder when it turns verses into terms, and the query path when
//! it turns what the user typed into terms. One function, two callers.

pub mod normalize;
