use super::*;

fn record(id: &str, name: &str) -> PersonRecord {
    PersonRecord { id: id.to_owned(), name: Some(name.to_owned()), ..PersonRecord::default() }
}

#[test]
fn memory_store_clones_share_entries() {
    let store = MemoryStore::new();
    let other = store.clone();
    store.set(TOKEN_KEY, "abc");
    assert_eq!(other.get(TOKEN_KEY).as_deref(), Some("abc"));
    other.remove(TOKEN_KEY);
    assert!(store.is_empty());
}

#[test]
fn temp_registration_key_format() {
    assert_eq!(temp_registration_key("temp-42"), "temp_registration_temp-42");
}

#[test]
fn list_cache_round_trips_per_kind() {
    let store = MemoryStore::new();
    let cache = ListCache::new(store.clone());
    assert!(cache.load(SearchKind::All).is_none());

    cache.store(SearchKind::Children, &[record("1", "Yara")]);
    assert!(store.get("childrenSearchData").is_some());
    assert!(cache.load(SearchKind::All).is_none());

    let loaded = cache.load(SearchKind::Children).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].display_name(), "Yara");
}

#[test]
fn corrupt_cache_is_a_miss_and_gets_removed() {
    let store = MemoryStore::new();
    store.set("searchData", "{not json");
    let cache = ListCache::new(store.clone());
    assert!(cache.load(SearchKind::All).is_none());
    assert!(store.get("searchData").is_none());
}

#[test]
fn invalidate_drops_only_that_slot() {
    let store = MemoryStore::new();
    let cache = ListCache::new(store.clone());
    cache.store(SearchKind::All, &[record("1", "Omar")]);
    cache.store(SearchKind::Disabilities, &[record("2", "Sami")]);
    cache.invalidate(SearchKind::All);
    assert!(cache.load(SearchKind::All).is_none());
    assert!(cache.load(SearchKind::Disabilities).is_some());
}
