//! Case-insensitive search over title, artist and album.

use super::model::Track;

/// True when `query` is a case-insensitive substring of the track's title,
/// artist or album. An empty query matches everything.
pub fn matches(track: &Track, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let q = query.to_lowercase();
    [&track.title, &track.artist, &track.album]
        .iter()
        .any(|field| field.to_lowercase().contains(&q))
}

/// Keep the tracks matching `query`, preserving order.
pub fn filter_tracks<'a>(tracks: &'a [Track], query: &str) -> Vec<&'a Track> {
    tracks.iter().filter(|t| matches(t, query)).collect()
}
