// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use ayat_search::{
    EngineConfig, IndexStore, MemoryStore, SearchEngine, SearchIndex, DEFAULT_CACHE_KEY,
};

use crate::common::{fatiha_records, verses, CountingCorpus, PanicsOnce, Unreadable};

#[test]
fn concurrent_callers_share_one_build() {
    let corpus = CountingCorpus::new(fatiha_records()).with_delay(Duration::from_millis(50));
    let loads = corpus.counter();
    let engine = SearchEngine::new(corpus, MemoryStore::new(), EngineConfig::default());

    let indexes: Vec<Arc<SearchIndex>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8).map(|_| scope.spawn(|| engine.ensure_index())).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert!(indexes.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    assert_eq!(indexes[0].len(), 4);
}

#[test]
fn concurrent_searches_agree() {
    let corpus = CountingCorpus::new(fatiha_records()).with_delay(Duration::from_millis(20));
    let loads = corpus.counter();
    let engine = SearchEngine::new(corpus, MemoryStore::new(), EngineConfig::default());

    let results: Vec<Vec<u16>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..6)
            .map(|_| scope.spawn(|| verses(&engine.search("الرح"))))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert!(results.iter().all(|r| r == &vec![3, 1]));
}

#[test]
fn persisted_index_is_restored_without_loading_corpus() {
    let store = Arc::new(MemoryStore::new());

    let first = CountingCorpus::new(fatiha_records());
    let first_loads = first.counter();
    let engine = SearchEngine::new(first, Arc::clone(&store), EngineConfig::default());
    let built = engine.search("الرحمن");
    drop(engine); // flushes the background write

    assert_eq!(first_loads.load(Ordering::SeqCst), 1);
    assert!(store.get(DEFAULT_CACHE_KEY).unwrap().is_some());

    let second = CountingCorpus::new(fatiha_records());
    let second_loads = second.counter();
    let engine = SearchEngine::new(second, Arc::clone(&store), EngineConfig::default());
    assert_eq!(engine.search("الرحمن"), built);
    assert_eq!(second_loads.load(Ordering::SeqCst), 0);
}

#[test]
fn corrupt_persisted_index_triggers_rebuild_and_overwrite() {
    let store = Arc::new(MemoryStore::new());
    store.set(DEFAULT_CACHE_KEY, b"AYAT definitely not an index").unwrap();

    let corpus = CountingCorpus::new(fatiha_records());
    let loads = corpus.counter();
    let engine = SearchEngine::new(corpus, Arc::clone(&store), EngineConfig::default());

    assert_eq!(verses(&engine.search("مالك")), vec![4]);
    assert_eq!(loads.load(Ordering::SeqCst), 1);

    engine.flush();
    let bytes = store.get(DEFAULT_CACHE_KEY).unwrap().unwrap();
    let restored = SearchIndex::from_bytes(&bytes).expect("store now holds a valid index");
    assert_eq!(restored.len(), 4);
}

#[test]
fn cache_key_comes_from_config() {
    let store = Arc::new(MemoryStore::new());
    let config = EngineConfig { cache_key: "fatiha_only".to_string(), ..EngineConfig::default() };
    let engine = SearchEngine::new(fatiha_records(), Arc::clone(&store), config);

    engine.ensure_index();
    engine.flush();
    assert!(store.get("fatiha_only").unwrap().is_some());
    assert!(store.get(DEFAULT_CACHE_KEY).unwrap().is_none());
}

#[test]
fn unreadable_corpus_serves_empty_results() {
    let store = Arc::new(MemoryStore::new());
    let engine = SearchEngine::new(Unreadable, Arc::clone(&store), EngineConfig::default());

    assert!(engine.search("الله").is_empty());
    assert!(engine.is_indexed());
    engine.flush();
    assert!(store.is_empty(), "an empty fallback index must not be persisted");
}

#[test]
fn panicking_build_lets_the_next_caller_retry() {
    let engine = SearchEngine::new(
        PanicsOnce::new(fatiha_records()),
        MemoryStore::new(),
        EngineConfig::default(),
    );

    let first = catch_unwind(AssertUnwindSafe(|| engine.ensure_index()));
    assert!(first.is_err());
    assert!(!engine.is_indexing());
    assert!(!engine.is_indexed());

    assert_eq!(engine.ensure_index().len(), 4);
}

#[test]
fn invalidate_rebuilds_from_store_or_corpus() {
    let corpus = CountingCorpus::new(fatiha_records());
    let loads = corpus.counter();
    let store = Arc::new(MemoryStore::new());
    let engine = SearchEngine::new(corpus, Arc::clone(&store), EngineConfig::default());

    engine.ensure_index();
    engine.flush();
    engine.invalidate();
    assert!(!engine.is_indexed());

    // Restored from the store, corpus untouched
    engine.ensure_index();
    assert_eq!(loads.load(Ordering::SeqCst), 1);

    // With the store emptied, invalidation goes back to the corpus
    store.remove(DEFAULT_CACHE_KEY);
    engine.invalidate();
    engine.ensure_index();
    assert_eq!(loads.load(Ordering::SeqCst), 2);
}

#[test]
fn blank_query_clears_last_results() {
    let engine = SearchEngine::new(fatiha_records(), MemoryStore::new(), EngineConfig::default());

    let results = engine.search("بسم");
    assert_eq!(engine.last_results(), results);

    assert!(engine.search("   ").is_empty());
    assert!(engine.last_results().is_empty());
    assert!(engine.is_indexed());
}

#[test]
fn engine_uses_configured_search_options() {
    let mut config = EngineConfig::default();
    config.search.fuzzy = 0.0;
    let engine = SearchEngine::new(fatiha_records(), MemoryStore::new(), config);
    assert!(engine.search("العالمين").is_empty());

    let engine = SearchEngine::new(fatiha_records(), MemoryStore::new(), EngineConfig::default());
    assert_eq!(verses(&engine.search("العالمين")), vec![2]);
}

/// Panics on its first write, stores normally afterwards.
struct PanicsOnFirstWrite {
    inner: MemoryStore,
    writes: std::sync::atomic::AtomicUsize,
}

impl IndexStore for PanicsOnFirstWrite {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ayat_search::StoreError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), ayat_search::StoreError> {
        if self.writes.fetch_add(1, Ordering::SeqCst) == 0 {
            panic!("disk on fire");
        }
        self.inner.set(key, bytes)
    }
}

#[test]
fn panicked_write_does_not_block_the_next_one() {
    let store = Arc::new(PanicsOnFirstWrite {
        inner: MemoryStore::new(),
        writes: Default::default(),
    });
    let engine = SearchEngine::new(
        CountingCorpus::new(fatiha_records()),
        Arc::clone(&store),
        EngineConfig::default(),
    );

    // Second write waits on the panicked first one
    engine.ensure_index();
    engine.invalidate();
    engine.ensure_index();
    engine.flush();

    assert_eq!(store.writes.load(Ordering::SeqCst), 2);
    let bytes = store.get(DEFAULT_CACHE_KEY).unwrap().expect("second write landed");
    assert_eq!(SearchIndex::from_bytes(&bytes).unwrap().len(), 4);
}
