// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index lifecycle: restore or build once, share everywhere.
//!
//! ```text
//!                 ensure_index()
//!                       │
//!   ┌───────────────────┼──────────────────────────┐
//!   │ Ready(index)      │ Building                 │ NotStarted
//!   ▼                   ▼                          ▼
//! return index     park on condvar          mark Building, unlock
//!                  until Ready              ├─ store has valid bytes → restore
//!                                           ├─ else corpus → build → persist (background)
//!                                           └─ corpus unreadable → empty index, not persisted
//!                                           mark Ready, wake everyone
//! ```
//!
//! Only one caller ever builds; everyone who arrives meanwhile waits for
//! that build and gets the same `Arc`. If the builder panics, a drop guard
//! puts the slot back to `NotStarted` and wakes the waiters, and the next
//! of them takes over.
//!
//! Queries run on the shared `Arc<SearchIndex>` with no lock held.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use parking_lot::{Condvar, Mutex};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::corpus::CorpusSource;
use crate::index::{IndexBuilder, SearchIndex};
use crate::storage::IndexStore;
use crate::types::{SearchResult, VerseDocument};

#[derive(Debug)]
enum BuildState {
    NotStarted,
    Building,
    Ready(Arc<SearchIndex>),
}

/// Where a ready index came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// Decoded from the store.
    Restored,
    /// Built from the corpus; should be persisted.
    Built,
    /// Corpus unreadable; empty for this session, never persisted.
    Unavailable,
}

/// The caller-facing search surface.
///
/// Construct one per corpus and pass it (or an `Arc` of it) to whoever
/// searches. All methods take `&self`.
pub struct SearchEngine {
    corpus: Arc<dyn CorpusSource>,
    store: Arc<dyn IndexStore>,
    config: EngineConfig,
    slot: Mutex<BuildState>,
    ready: Condvar,
    last_results: Mutex<Vec<SearchResult>>,
    persist_handle: Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("config", &self.config)
            .field("state", &*self.slot.lock())
            .finish_non_exhaustive()
    }
}

/// Resets the slot if the build unwinds before publishing.
struct BuildGuard<'a> {
    engine: &'a SearchEngine,
    published: bool,
}

impl BuildGuard<'_> {
    fn publish(mut self, index: Arc<SearchIndex>) {
        *self.engine.slot.lock() = BuildState::Ready(index);
        self.engine.ready.notify_all();
        self.published = true;
    }
}

impl Drop for BuildGuard<'_> {
    fn drop(&mut self) {
        if !self.published {
            warn!("index build aborted, resetting");
            *self.engine.slot.lock() = BuildState::NotStarted;
            self.engine.ready.notify_all();
        }
    }
}

impl SearchEngine {
    pub fn new<C, S>(corpus: C, store: S, config: EngineConfig) -> Self
    where
        C: CorpusSource + 'static,
        S: IndexStore + 'static,
    {
        Self {
            corpus: Arc::new(corpus),
            store: Arc::new(store),
            config,
            slot: Mutex::new(BuildState::NotStarted),
            ready: Condvar::new(),
            last_results: Mutex::new(Vec::new()),
            persist_handle: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Search with the configured options.
    ///
    /// A blank query clears the last results and returns nothing, without
    /// building. Otherwise the index is built or restored first if needed.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        if query.trim().is_empty() {
            self.last_results.lock().clear();
            return Vec::new();
        }

        let index = self.ensure_index();
        let results = index.search_with(query, &self.config.search);
        debug!(query = %query, results = results.len(), "search");

        *self.last_results.lock() = results.clone();
        results
    }

    /// Results of the most recent non-blank search.
    pub fn last_results(&self) -> Vec<SearchResult> {
        self.last_results.lock().clone()
    }

    /// Drop the last results. The index stays.
    pub fn clear(&self) {
        self.last_results.lock().clear();
    }

    pub fn is_indexed(&self) -> bool {
        matches!(*self.slot.lock(), BuildState::Ready(_))
    }

    pub fn is_indexing(&self) -> bool {
        matches!(*self.slot.lock(), BuildState::Building)
    }

    /// The ready index, without triggering a build.
    pub fn index(&self) -> Option<Arc<SearchIndex>> {
        match &*self.slot.lock() {
            BuildState::Ready(index) => Some(Arc::clone(index)),
            _ => None,
        }
    }

    /// Restore or build the index, once.
    ///
    /// Idempotent, and safe to call from many threads: concurrent callers
    /// share a single build.
    pub fn ensure_index(&self) -> Arc<SearchIndex> {
        let mut state = self.slot.lock();
        loop {
            if let BuildState::Ready(index) = &*state {
                return Arc::clone(index);
            }
            if matches!(*state, BuildState::NotStarted) {
                break;
            }
            self.ready.wait(&mut state);
        }
        *state = BuildState::Building;
        drop(state);

        let guard = BuildGuard { engine: self, published: false };
        let (index, origin) = self.restore_or_build();
        let index = Arc::new(index);
        guard.publish(Arc::clone(&index));

        if origin == Origin::Built {
            self.persist_in_background(Arc::clone(&index));
        }
        index
    }

    /// Forget the ready index; the next call restores or builds again.
    ///
    /// A build already in flight is not interrupted and still publishes.
    pub fn invalidate(&self) {
        let mut state = self.slot.lock();
        if matches!(*state, BuildState::Ready(_)) {
            *state = BuildState::NotStarted;
            info!("index invalidated");
        }
    }

    /// Wait for the latest background write to finish.
    pub fn flush(&self) {
        let handle = self.persist_handle.lock().take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                warn!("index persistence thread panicked");
            }
        }
    }

    fn restore_or_build(&self) -> (SearchIndex, Origin) {
        let key = &self.config.cache_key;

        match self.store.get(key) {
            Ok(Some(bytes)) => {
                let start = Instant::now();
                match SearchIndex::from_bytes(&bytes) {
                    Ok(index) => {
                        info!(
                            docs = index.len(),
                            terms = index.term_count(),
                            elapsed_ms = start.elapsed().as_millis() as u64,
                            "restored persisted index"
                        );
                        return (index, Origin::Restored);
                    }
                    Err(e) => warn!(key = %key, error = %e, "persisted index invalid, rebuilding"),
                }
            }
            Ok(None) => debug!(key = %key, "no persisted index"),
            Err(e) => warn!(key = %key, error = %e, "failed to read persisted index, rebuilding"),
        }

        let start = Instant::now();
        let records = match self.corpus.load() {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "failed to load corpus, serving an empty index");
                return (SearchIndex::empty(), Origin::Unavailable);
            }
        };

        let mut builder = IndexBuilder::new();
        builder.add_all(records.into_iter().map(VerseDocument::from));
        let index = builder.build();
        info!(
            docs = index.len(),
            terms = index.term_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "built index from corpus"
        );
        (index, Origin::Built)
    }

    /// Serialize and store on a background thread.
    ///
    /// Each write joins the previous one first, so writes land in build
    /// order and the store ends up holding the latest index.
    fn persist_in_background(&self, index: Arc<SearchIndex>) {
        let store = Arc::clone(&self.store);
        let key = self.config.cache_key.clone();

        let mut slot = self.persist_handle.lock();
        let previous = slot.take();

        let spawned = thread::Builder::new()
            .name("ayat-persist".to_string())
            .spawn(move || {
                if let Some(previous) = previous {
                    if previous.join().is_err() {
                        warn!("previous persistence thread panicked");
                    }
                }
                let bytes = index.to_bytes();
                match store.set(&key, &bytes) {
                    Ok(()) => debug!(key = %key, bytes = bytes.len(), "persisted index"),
                    Err(e) => warn!(key = %key, error = %e, "failed to persist index"),
                }
            });

        match spawned {
            Ok(handle) => *slot = Some(handle),
            Err(e) => warn!(error = %e, "failed to spawn persistence thread"),
        }
    }
}

impl Drop for SearchEngine {
    fn drop(&mut self) {
        self.flush();
    }
}
