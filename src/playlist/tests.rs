use std::collections::HashSet;

use super::*;
use crate::error::StoreError;
use crate::library::{SourceLocator, Track};
use crate::notify::{Change, Notifier};

fn t(title: &str) -> Track {
    Track::new(title, SourceLocator::new(format!("/music/{title}.mp3")))
}

#[test]
fn create_adds_empty_playlists_with_unique_ids() {
    let mut store = PlaylistStore::new(Notifier::new());
    let names = ["Road trip", "Focus", "Focus", "  Late night  "];
    for n in names {
        store.create(n).unwrap();
    }

    assert_eq!(store.len(), names.len());
    let ids: HashSet<PlaylistId> = store.list().iter().map(|p| p.id).collect();
    assert_eq!(ids.len(), names.len());
    for (p, n) in store.list().iter().zip(names) {
        assert_eq!(p.name, n);
        assert!(p.tracks.is_empty());
    }
}

#[test]
fn create_rejects_blank_names_without_side_effects() {
    let notifier = Notifier::new();
    let rx = notifier.subscribe();
    let mut store = PlaylistStore::new(notifier);

    assert_eq!(store.create("").unwrap_err(), StoreError::InvalidName);
    assert_eq!(store.create("   ").unwrap_err(), StoreError::InvalidName);
    assert_eq!(store.create("\t\n").unwrap_err(), StoreError::InvalidName);

    assert!(store.is_empty());
    assert!(rx.try_recv().is_err());
}

#[test]
fn add_track_appends_and_allows_duplicates() {
    let mut store = PlaylistStore::new(Notifier::new());
    let id = store.create("Mix").unwrap().id;
    let a = t("a");
    store.add_track(id, a.clone()).unwrap();
    store.add_track(id, a.clone()).unwrap();
    store.add_track(id, t("b")).unwrap();

    let titles: Vec<&str> = store
        .get(id)
        .unwrap()
        .tracks
        .iter()
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(titles, vec!["a", "a", "b"]);
}

#[test]
fn add_track_to_unknown_playlist_is_not_found_and_changes_nothing() {
    let mut store = PlaylistStore::new(Notifier::new());
    let id = store.create("Mix").unwrap().id;
    let mut other = PlaylistStore::new(Notifier::new());
    other.create("x").unwrap();
    let foreign = other.create("y").unwrap().id;

    let err = store.add_track(foreign, t("a")).unwrap_err();
    assert_eq!(err, StoreError::PlaylistNotFound(foreign));
    assert!(store.get(id).unwrap().tracks.is_empty());
}

#[test]
fn mutations_publish_playlist_changes() {
    let notifier = Notifier::new();
    let rx = notifier.subscribe();
    let mut store = PlaylistStore::new(notifier);

    let id = store.create("Mix").unwrap().id;
    store.add_track(id, t("a")).unwrap();

    assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![Change::Playlists; 2]);
}
