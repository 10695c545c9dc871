// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Inverted index construction.
//!
//! Building is a map-reduce:
//! 1. **Map**: tokenize every document's fields into per-document term counts
//!    (parallel with the `parallel` feature, one task per document)
//! 2. **Reduce**: merge the per-document maps into a `BTreeMap`, in ordinal
//!    order, so the vocabulary comes out sorted and every posting list comes
//!    out sorted by (doc, field) without a separate sort
//!
//! The reduce is sequential and ordinal-ordered, so the parallel and
//! sequential builds produce byte-identical indexes.

use std::collections::{BTreeMap, HashMap};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use super::{Posting, SearchIndex};
use crate::types::{Field, VerseDocument};
use crate::util::normalize::tokenize;

/// Accumulates documents, then builds a [`SearchIndex`].
///
/// Adding a document whose id is already present replaces the earlier one
/// in place: last write wins, first position is kept.
#[derive(Debug, Default, Clone)]
pub struct IndexBuilder {
    docs: Vec<VerseDocument>,
    positions: HashMap<String, usize>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one document. Returns `true` if it replaced an earlier document
    /// with the same id.
    pub fn add(&mut self, doc: VerseDocument) -> bool {
        if let Some(&position) = self.positions.get(doc.id()) {
            self.docs[position] = doc;
            return true;
        }
        self.positions.insert(doc.id().to_string(), self.docs.len());
        self.docs.push(doc);
        false
    }

    pub fn add_all<I>(&mut self, docs: I)
    where
        I: IntoIterator<Item = VerseDocument>,
    {
        for doc in docs {
            self.add(doc);
        }
    }

    /// Number of distinct documents so far.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Documents in index order, duplicates already collapsed.
    pub fn docs(&self) -> &[VerseDocument] {
        &self.docs
    }

    pub fn build(self) -> SearchIndex {
        let start = std::time::Instant::now();

        let per_doc = map_documents(&self.docs);

        // REDUCE: ordinal order keeps each posting list sorted by doc
        let mut terms: BTreeMap<String, Vec<Posting>> = BTreeMap::new();
        for (ordinal, fields) in per_doc.into_iter().enumerate() {
            for (field, counts) in Field::ALL.into_iter().zip(fields) {
                for (term, term_freq) in counts {
                    terms.entry(term).or_default().push(Posting {
                        doc: ordinal as u32,
                        field,
                        term_freq,
                    });
                }
            }
        }

        let (vocabulary, postings): (Vec<String>, Vec<Vec<Posting>>) = terms.into_iter().unzip();
        let docs = self.docs.iter().map(VerseDocument::to_stored).collect();
        let index = SearchIndex::assemble(docs, vocabulary, postings);

        debug!(
            docs = index.len(),
            terms = index.term_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "built inverted index"
        );
        index
    }
}

impl SearchIndex {
    /// Build an index from documents in corpus order.
    pub fn build<I>(docs: I) -> SearchIndex
    where
        I: IntoIterator<Item = VerseDocument>,
    {
        let mut builder = IndexBuilder::new();
        builder.add_all(docs);
        builder.build()
    }
}

/// Term counts for each field of one document, in `Field::ALL` order.
type FieldCounts = [BTreeMap<String, u32>; Field::COUNT];

fn count_terms(doc: &VerseDocument) -> FieldCounts {
    Field::ALL.map(|field| {
        let mut counts = BTreeMap::new();
        for token in tokenize(&doc.field_text(field)) {
            *counts.entry(token).or_insert(0u32) += 1;
        }
        counts
    })
}

// MAP: tokenization dominates build time and is independent per document
#[cfg(feature = "parallel")]
fn map_documents(docs: &[VerseDocument]) -> Vec<FieldCounts> {
    docs.par_iter().map(count_terms).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_documents(docs: &[VerseDocument]) -> Vec<FieldCounts> {
    docs.iter().map(count_terms).collect()
}
