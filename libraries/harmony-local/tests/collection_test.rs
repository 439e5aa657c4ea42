//! Local collection integration tests
//!
//! Uploading, removing, favoriting and reloading local files against both
//! store implementations.

use harmony_core::Track;
use harmony_local::{
    BlobStore, JsonFileStore, KeyValueStore, LocalCollection, LocalError, MemoryStore,
    NewLocalFile, ObjectUrlRegistry, ALL_SONGS_KEY, FAVORITES_KEY, RECENTLY_PLAYED_KEY,
    TRACKS_KEY,
};
use tempfile::TempDir;

// ===== Test Helpers =====

fn audio(name: &str) -> NewLocalFile {
    NewLocalFile {
        file_name: name.to_string(),
        mime_type: "audio/mpeg".to_string(),
        duration: 61.5,
        bytes: name.as_bytes().to_vec(),
    }
}

fn stored_tracks(store: &impl KeyValueStore, key: &str) -> Vec<Track> {
    let json = store.get(key).unwrap().expect("key persisted");
    serde_json::from_str(&json).unwrap()
}

/// Store whose string writes fail for one key, and optionally every blob delete
#[derive(Clone, Default)]
struct FailingStore {
    inner: MemoryStore,
    failing_key: &'static str,
    failing_blob_delete: bool,
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> harmony_local::Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> harmony_local::Result<()> {
        if key == self.failing_key {
            return Err(LocalError::InvalidKey(format!("quota exceeded for {}", key)));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> harmony_local::Result<()> {
        self.inner.remove(key)
    }
}

impl BlobStore for FailingStore {
    fn save_blob(&self, id: &str, bytes: &[u8]) -> harmony_local::Result<()> {
        self.inner.save_blob(id, bytes)
    }

    fn load_blob(&self, id: &str) -> harmony_local::Result<Option<Vec<u8>>> {
        self.inner.load_blob(id)
    }

    fn delete_blob(&self, id: &str) -> harmony_local::Result<()> {
        if self.failing_blob_delete {
            return Err(LocalError::InvalidKey(format!("blob {} is locked", id)));
        }
        self.inner.delete_blob(id)
    }
}

// ===== add =====

#[test]
fn test_add_persists_track_and_views() {
    let store = MemoryStore::new();
    let mut collection = LocalCollection::load(store.clone(), ObjectUrlRegistry::new());

    let added = collection.add(audio("Sunrise.mp3")).unwrap();
    assert!(added.is_clean());

    let track = added.value;
    assert_eq!(track.name, "Sunrise");
    assert_eq!(track.artist.as_deref(), Some("Local Upload"));
    assert_eq!(track.size, "Sunrise.mp3".len() as u64);
    assert!(!track.is_favorite);
    assert!(track.last_played_at.is_some());

    let all = stored_tracks(&store, ALL_SONGS_KEY);
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, format!("local-{}", track.id));
    assert_eq!(all[0].duration, 62);
    assert!(all[0].preview_url.is_none());

    assert_eq!(stored_tracks(&store, RECENTLY_PLAYED_KEY).len(), 1);
    assert!(stored_tracks(&store, FAVORITES_KEY).is_empty());
    assert!(store.get(TRACKS_KEY).unwrap().is_some());
}

#[test]
fn test_add_rejects_non_audio() {
    let registry = ObjectUrlRegistry::new();
    let mut collection = LocalCollection::load(MemoryStore::new(), registry.clone());

    let result = collection.add(NewLocalFile {
        file_name: "cover.png".into(),
        mime_type: "image/png".into(),
        duration: 0.0,
        bytes: vec![0x89, 0x50],
    });

    assert!(matches!(result, Err(LocalError::UnsupportedType(ref t)) if t == "image/png"));
    assert!(collection.tracks().is_empty());
    assert_eq!(registry.live_count(), 0);
}

#[test]
fn test_added_track_is_playable_through_object_url() {
    let registry = ObjectUrlRegistry::new();
    let mut collection = LocalCollection::load(MemoryStore::new(), registry.clone());

    let id = collection.add(audio("a.mp3")).unwrap().value.id;
    let url = collection.source_url(&id).unwrap().to_string();

    let blob = registry.resolve(&url).unwrap();
    assert_eq!(&*blob.bytes, b"a.mp3");
    assert_eq!(blob.mime_type, "audio/mpeg");
}

// ===== remove / release =====

#[test]
fn test_remove_releases_url_and_blob() {
    let store = MemoryStore::new();
    let registry = ObjectUrlRegistry::new();
    let mut collection = LocalCollection::load(store.clone(), registry.clone());

    let keep = collection.add(audio("keep.mp3")).unwrap().value.id;
    let drop_id = collection.add(audio("drop.mp3")).unwrap().value.id;
    let dropped_url = collection.source_url(&drop_id).unwrap().to_string();

    let removed = collection.remove(&drop_id);

    assert!(removed.value);
    assert!(registry.resolve(&dropped_url).is_none());
    assert_eq!(registry.live_count(), 1);
    assert!(store.load_blob(&drop_id).unwrap().is_none());
    assert!(store.load_blob(&keep).unwrap().is_some());
    assert_eq!(stored_tracks(&store, ALL_SONGS_KEY).len(), 1);
}

#[test]
fn test_remove_reports_blob_delete_failure() {
    let store = FailingStore {
        failing_blob_delete: true,
        ..FailingStore::default()
    };
    let mut collection = LocalCollection::load(store.clone(), ObjectUrlRegistry::new());
    let id = collection.add(audio("stuck.mp3")).unwrap().value.id;

    let removed = collection.remove(&id);

    assert!(removed.value);
    assert!(!removed.is_clean());
    assert_eq!(removed.warnings.len(), 1);
    assert_eq!(removed.warnings[0].key, format!("blobs/{}", id));
    assert!(removed.warnings[0].message.contains("locked"));
    assert!(collection.tracks().is_empty());
    assert!(stored_tracks(&store, ALL_SONGS_KEY).is_empty());
}

#[test]
fn test_remove_unknown_is_noop() {
    let mut collection = LocalCollection::load(MemoryStore::new(), ObjectUrlRegistry::new());
    collection.add(audio("x.mp3")).unwrap();

    assert!(!collection.remove("missing").value);
    assert_eq!(collection.tracks().len(), 1);
}

#[test]
fn test_dropping_collection_releases_every_url() {
    let registry = ObjectUrlRegistry::new();
    {
        let mut collection = LocalCollection::load(MemoryStore::new(), registry.clone());
        collection.add(audio("1.mp3")).unwrap();
        collection.add(audio("2.mp3")).unwrap();
        assert_eq!(registry.live_count(), 2);
    }
    assert_eq!(registry.live_count(), 0);
}

// ===== favorites / recents =====

#[test]
fn test_toggle_favorite_updates_view() {
    let store = MemoryStore::new();
    let mut collection = LocalCollection::load(store.clone(), ObjectUrlRegistry::new());
    let id = collection.add(audio("fav.mp3")).unwrap().value.id;

    assert!(collection.toggle_favorite(&id).unwrap().value);
    assert_eq!(stored_tracks(&store, FAVORITES_KEY)[0].name, "fav");

    assert!(!collection.toggle_favorite(&id).unwrap().value);
    assert!(stored_tracks(&store, FAVORITES_KEY).is_empty());
}

#[test]
fn test_unknown_id_is_not_found() {
    let mut collection = LocalCollection::load(MemoryStore::new(), ObjectUrlRegistry::new());

    assert!(matches!(
        collection.toggle_favorite("nope"),
        Err(LocalError::NotFound(_))
    ));
    assert!(matches!(
        collection.mark_played("nope"),
        Err(LocalError::NotFound(_))
    ));
}

#[test]
fn test_recents_order_by_last_activity() {
    let store = MemoryStore::new();
    store
        .set(
            TRACKS_KEY,
            r#"[
                {"id":"old","name":"Old","duration":10,"size":1,"type":"audio/mpeg","addedAt":"2024-01-01T00:00:00Z"},
                {"id":"played","name":"Played","duration":10,"size":1,"type":"audio/mpeg","addedAt":"2023-01-01T00:00:00Z","lastPlayedAt":"2024-06-01T00:00:00Z"},
                {"id":"new","name":"New","duration":10,"size":1,"type":"audio/mpeg","addedAt":"2024-03-01T00:00:00Z"}
            ]"#,
        )
        .unwrap();

    let collection = LocalCollection::load(store, ObjectUrlRegistry::new());
    let order: Vec<String> = collection
        .recently_played()
        .into_iter()
        .map(|t| t.id)
        .collect();

    assert_eq!(order, ["local-played", "local-new", "local-old"]);
}

#[test]
fn test_mark_played_moves_track_to_front() {
    let store = MemoryStore::new();
    store
        .set(
            TRACKS_KEY,
            r#"[
                {"id":"a","name":"A","duration":1,"size":1,"type":"audio/mpeg","addedAt":"2020-01-01T00:00:00Z"},
                {"id":"b","name":"B","duration":1,"size":1,"type":"audio/mpeg","addedAt":"2021-01-01T00:00:00Z"}
            ]"#,
        )
        .unwrap();
    let mut collection = LocalCollection::load(store.clone(), ObjectUrlRegistry::new());

    collection.mark_played("a").unwrap();

    let recents = stored_tracks(&store, RECENTLY_PLAYED_KEY);
    assert_eq!(recents[0].id, "local-a");
}

#[test]
fn test_recents_capped_at_25() {
    let mut collection = LocalCollection::load(MemoryStore::new(), ObjectUrlRegistry::new());
    for i in 0..30 {
        collection.add(audio(&format!("{}.mp3", i))).unwrap();
    }

    assert_eq!(collection.all_songs().len(), 30);
    assert_eq!(collection.recently_played().len(), 25);
}

// ===== persistence failures =====

#[test]
fn test_persist_failure_is_soft_warning() {
    let store = FailingStore {
        inner: MemoryStore::new(),
        failing_key: RECENTLY_PLAYED_KEY,
        ..FailingStore::default()
    };
    let mut collection = LocalCollection::load(store.clone(), ObjectUrlRegistry::new());

    let added = collection.add(audio("x.mp3")).unwrap();

    assert_eq!(added.warnings.len(), 1);
    assert_eq!(added.warnings[0].key, RECENTLY_PLAYED_KEY);
    assert_eq!(collection.tracks().len(), 1);
    assert!(store.get(ALL_SONGS_KEY).unwrap().is_some());
}

#[test]
fn test_corrupt_track_list_starts_empty() {
    let store = MemoryStore::new();
    store.set(TRACKS_KEY, "{not json").unwrap();

    let collection = LocalCollection::load(store, ObjectUrlRegistry::new());

    assert!(collection.tracks().is_empty());
}

// ===== reload from disk =====

#[test]
fn test_reload_from_disk_restores_tracks_and_sources() {
    let dir = TempDir::new().unwrap();
    let registry = ObjectUrlRegistry::new();

    let id = {
        let store = JsonFileStore::open(dir.path()).unwrap();
        let mut collection = LocalCollection::load(store, registry.clone());
        let id = collection.add(audio("persisted.ogg")).unwrap().value.id;
        collection.toggle_favorite(&id).unwrap();
        id
    };
    assert_eq!(registry.live_count(), 0);

    let store = JsonFileStore::open(dir.path()).unwrap();
    let collection = LocalCollection::load(store, registry.clone());

    let track = collection.get(&id).unwrap();
    assert_eq!(track.name, "persisted");
    assert!(track.is_favorite);
    assert_eq!(collection.favorites().len(), 1);

    let url = collection.source_url(&id).unwrap();
    assert_eq!(&*registry.resolve(url).unwrap().bytes, b"persisted.ogg");
}
