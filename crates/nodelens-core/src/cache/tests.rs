use super::*;
use crate::resources::ContextEntry;

fn payload(n: usize) -> ResourcePayload {
    let items = (0..n).map(|i| ContextEntry { name: format!("item-{i}"), is_current: false }).collect();
    ResourcePayload::Contexts(items)
}

fn backdate(cache: &PayloadCache, key: &str, secs: i64) {
    let mut entries = cache.entries.write().unwrap();
    let entry = entries.get_mut(key).unwrap();
    entry.fetched_at = Timestamp::from_second(entry.fetched_at.as_second() - secs).unwrap();
}

#[test]
fn get_after_put_is_fresh() {
    let cache = PayloadCache::new(Duration::from_secs(30));
    cache.put("pods", payload(3));
    match cache.get("pods") {
        Lookup::Fresh(p) => assert_eq!(p.len(), 3),
        other => panic!("expected fresh, got {other:?}"),
    }
}

#[test]
fn unknown_key_is_absent() {
    let cache = PayloadCache::new(Duration::from_secs(30));
    assert!(matches!(cache.get("nope"), Lookup::Absent));
}

#[test]
fn expired_entry_is_served_stale_with_last_payload() {
    let cache = PayloadCache::new(Duration::from_secs(5));
    cache.put("pods", payload(3));
    backdate(&cache, "pods", 5);
    match cache.get("pods") {
        Lookup::Stale(p) => assert_eq!(p.len(), 3),
        other => panic!("expected stale, got {other:?}"),
    }
}

#[test]
fn ttl_scenario_fresh_then_stale_then_refetched() {
    // TTL=5s, fetched with 3 items at t=0.
    let cache = PayloadCache::new(Duration::from_secs(5));
    cache.put("pods", payload(3));

    // t=3: still fresh, same 3 items.
    backdate(&cache, "pods", 3);
    match cache.get("pods") {
        Lookup::Fresh(p) => assert_eq!(p.len(), 3),
        other => panic!("expected fresh at t=3, got {other:?}"),
    }

    // t=6: stale, same 3 items still available.
    backdate(&cache, "pods", 3);
    match cache.get("pods") {
        Lookup::Stale(p) => assert_eq!(p.len(), 3),
        other => panic!("expected stale at t=6, got {other:?}"),
    }

    // A successful refetch with 4 items makes the next get fresh again.
    cache.put("pods", payload(4));
    match cache.get("pods") {
        Lookup::Fresh(p) => assert_eq!(p.len(), 4),
        other => panic!("expected fresh after refetch, got {other:?}"),
    }
}

#[test]
fn invalidate_marks_stale_but_keeps_payload() {
    let cache = PayloadCache::new(Duration::from_secs(30));
    cache.put("pods", payload(2));
    cache.invalidate("pods");
    assert!(matches!(cache.get("pods"), Lookup::Stale(_)));
}

#[test]
fn invalidate_all_is_never_fresh_even_right_after_put() {
    let cache = PayloadCache::new(Duration::from_secs(30));
    cache.put("a", payload(1));
    cache.put("b", payload(2));
    cache.invalidate_all();
    assert!(!matches!(cache.get("a"), Lookup::Fresh(_)));
    assert!(!matches!(cache.get("b"), Lookup::Fresh(_)));
}

#[test]
fn invalidate_prefix_spares_other_contexts() {
    let cache = PayloadCache::new(Duration::from_secs(30));
    cache.put("ctx-a/pods", payload(1));
    cache.put("ctx-a/nodes", payload(1));
    cache.put("ctx-b/pods", payload(1));
    cache.invalidate_prefix("ctx-a/");
    assert!(matches!(cache.get("ctx-a/pods"), Lookup::Stale(_)));
    assert!(matches!(cache.get("ctx-a/nodes"), Lookup::Stale(_)));
    assert!(matches!(cache.get("ctx-b/pods"), Lookup::Fresh(_)));
}

#[test]
fn put_after_invalidate_is_fresh_again() {
    let cache = PayloadCache::new(Duration::from_secs(30));
    cache.put("pods", payload(1));
    cache.invalidate("pods");
    cache.put("pods", payload(2));
    match cache.get("pods") {
        Lookup::Fresh(p) => assert_eq!(p.len(), 2),
        other => panic!("expected fresh, got {other:?}"),
    }
}

#[test]
fn per_key_ttl_override() {
    let cache = PayloadCache::new(Duration::from_secs(30));
    cache.put_with_ttl("slow", payload(1), Duration::from_secs(120));
    backdate(&cache, "slow", 60);
    assert!(matches!(cache.get("slow"), Lookup::Fresh(_)));

    cache.put("fast", payload(1));
    backdate(&cache, "fast", 60);
    assert!(matches!(cache.get("fast"), Lookup::Stale(_)));
}

#[test]
fn last_updated_tracks_put() {
    let cache = PayloadCache::new(Duration::from_secs(30));
    assert!(cache.last_updated("pods").is_none());
    cache.put("pods", payload(1));
    assert!(cache.last_updated("pods").is_some());
}

#[test]
fn disk_entries_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let cache = PayloadCache::with_disk(Duration::from_secs(30), dir.path().to_path_buf());
        cache.put("ctx-a/pods", payload(3));
    }
    let reloaded = PayloadCache::with_disk(Duration::from_secs(30), dir.path().to_path_buf());
    match reloaded.get("ctx-a/pods") {
        Lookup::Fresh(p) => assert_eq!(p.len(), 3),
        other => panic!("expected fresh reload, got {other:?}"),
    }
}

#[test]
fn stale_disk_entry_loads_as_stale_fallback() {
    let dir = tempfile::tempdir().unwrap();
    {
        let cache = PayloadCache::with_disk(Duration::from_secs(5), dir.path().to_path_buf());
        cache.put("pods", payload(2));
        // Rewrite the file with an old timestamp.
        let mut entries = cache.entries.write().unwrap();
        let entry = entries.get_mut("pods").unwrap();
        entry.fetched_at = Timestamp::from_second(entry.fetched_at.as_second() - 3600).unwrap();
        let clone = entry.clone();
        drop(entries);
        cache.persist("pods", &clone);
    }
    let reloaded = PayloadCache::with_disk(Duration::from_secs(5), dir.path().to_path_buf());
    assert!(matches!(reloaded.get("pods"), Lookup::Stale(_)));
}

#[test]
fn corrupt_cache_file_is_treated_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("pods.json"), b"{ not json").unwrap();
    let cache = PayloadCache::with_disk(Duration::from_secs(30), dir.path().to_path_buf());
    assert!(matches!(cache.get("pods"), Lookup::Absent));
}

#[test]
fn disk_cache_writes_one_file_per_key() {
    let dir = tempfile::tempdir().unwrap();
    let cache = PayloadCache::with_disk(Duration::from_secs(30), dir.path().to_path_buf());
    cache.put("ctx-a/pods", payload(1));
    cache.put("ctx-a/nodes", payload(1));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn keys_sanitize_to_distinct_filenames() {
    assert_eq!(sanitize_key("ctx-a/pods"), "ctx-a_pods");
    assert_eq!(sanitize_key("eks:infra"), "eks_infra");
    assert_ne!(sanitize_key("ctx-a/pods"), sanitize_key("ctx-b/pods"));
}
