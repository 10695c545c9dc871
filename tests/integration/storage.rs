// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::sync::atomic::Ordering;

use ayat_search::{
    EngineConfig, FileStore, IndexStore, SearchEngine, SearchIndex, DEFAULT_CACHE_KEY,
};

use crate::common::{fatiha_index, fatiha_records, CountingCorpus};

#[test]
fn file_store_survives_engine_restarts() {
    let dir = tempfile::tempdir().unwrap();

    let corpus = CountingCorpus::new(fatiha_records());
    let loads = corpus.counter();
    {
        let engine = SearchEngine::new(corpus.clone(), FileStore::new(dir.path()), EngineConfig::default());
        assert_eq!(engine.search("بسم").len(), 1);
    }
    assert!(dir.path().join(format!("{}.bin", DEFAULT_CACHE_KEY)).exists());

    let engine = SearchEngine::new(corpus, FileStore::new(dir.path()), EngineConfig::default());
    assert_eq!(engine.search("بسم").len(), 1);
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[test]
fn truncated_file_is_rebuilt_and_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    let bytes = fatiha_index().to_bytes();
    store.set(DEFAULT_CACHE_KEY, &bytes[..bytes.len() / 2]).unwrap();

    let corpus = CountingCorpus::new(fatiha_records());
    let loads = corpus.counter();
    let engine = SearchEngine::new(corpus, store.clone(), EngineConfig::default());
    assert_eq!(engine.search("الحمد").len(), 1);
    engine.flush();

    assert_eq!(loads.load(Ordering::SeqCst), 1);
    let on_disk = fs::read(store.path_for(DEFAULT_CACHE_KEY).unwrap()).unwrap();
    assert_eq!(SearchIndex::from_bytes(&on_disk).unwrap(), fatiha_index());
}

#[test]
fn overwrite_replaces_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    store.set("k", &[7u8; 4096]).unwrap();
    store.set("k", b"short").unwrap();
    assert_eq!(store.get("k").unwrap(), Some(b"short".to_vec()));
}

#[test]
fn missing_directory_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("not").join("yet"));
    assert_eq!(store.get(DEFAULT_CACHE_KEY).unwrap(), None);

    store.set(DEFAULT_CACHE_KEY, b"x").unwrap();
    assert_eq!(store.get(DEFAULT_CACHE_KEY).unwrap(), Some(b"x".to_vec()));
}
