use std::path::Path;

use lofty::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{SourceLocator, Track, sanitize_seconds};

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Title for a file: its name with the last extension stripped.
fn title_from_path(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.rfind('.') {
        Some(dot) if dot > 0 && dot + 1 < name.len() => name[..dot].to_string(),
        _ => name,
    }
}

/// Build a track for `path` with placeholder metadata and unknown duration.
pub fn track_from_path(path: &Path) -> Track {
    Track::new(title_from_path(path), SourceLocator::new(path))
}

/// Overwrite placeholder metadata with whatever tags the file carries.
fn apply_tags(track: &mut Track, path: &Path) {
    let tagged = match lofty::read_from_path(path) {
        Ok(t) => t,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no readable tags");
            return;
        }
    };

    track.duration = sanitize_seconds(tagged.properties().duration().as_secs_f64());

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        if let Some(v) = tag.title().filter(|v| !v.trim().is_empty()) {
            track.title = v.trim().to_string();
        }
        if let Some(v) = tag.artist().filter(|v| !v.trim().is_empty()) {
            track.artist = v.trim().to_string();
        }
        if let Some(v) = tag.album().filter(|v| !v.trim().is_empty()) {
            track.album = v.trim().to_string();
        }
    }
}

fn import_file(path: &Path, settings: &LibrarySettings) -> Track {
    let mut track = track_from_path(path);
    if settings.read_tags {
        apply_tags(&mut track, path);
    }
    track
}

fn scan_dir(dir: &Path, settings: &LibrarySettings, out: &mut Vec<Track>) {
    let mut walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && is_audio_file(path, settings) {
            out.push(import_file(path, settings));
        }
    }
}

/// Turn user-selected paths into tracks, in the order given.
///
/// Directories are walked according to `settings`; files are accepted when
/// their extension is a configured audio extension. Missing paths are
/// skipped with a warning.
pub fn import_paths<P: AsRef<Path>>(paths: &[P], settings: &LibrarySettings) -> Vec<Track> {
    let mut tracks = Vec::new();
    for p in paths {
        let path = p.as_ref();
        if path.is_dir() {
            scan_dir(path, settings, &mut tracks);
        } else if path.is_file() {
            if is_audio_file(path, settings) {
                tracks.push(import_file(path, settings));
            } else {
                debug!(path = %path.display(), "not an audio file, ignoring");
            }
        } else {
            warn!(path = %path.display(), "import path does not exist");
        }
    }
    tracks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn title_strips_only_the_last_extension() {
        assert_eq!(title_from_path(Path::new("/tmp/a.mp3")), "a");
        assert_eq!(title_from_path(Path::new("/tmp/live.at.home.flac")), "live.at.home");
        assert_eq!(title_from_path(Path::new("/tmp/noext")), "noext");
        assert_eq!(title_from_path(Path::new("/tmp/.hidden")), ".hidden");
    }

    #[test]
    fn title_keeps_a_trailing_dot() {
        assert_eq!(title_from_path(Path::new("/music/a.")), "a.");
        assert_eq!(title_from_path(Path::new("/music/take.2.")), "take.2.");
    }

    #[test]
    fn track_from_path_uses_placeholders() {
        let t = track_from_path(Path::new("/music/b.mp3"));
        assert_eq!(t.title, "b");
        assert_eq!(t.artist, "Unknown Artist");
        assert_eq!(t.album, "Unknown Album");
        assert_eq!(t.duration, 0.0);
        assert_eq!(t.source.path(), Path::new("/music/b.mp3"));
        assert!(t.cover_art.is_none());
    }

    #[test]
    fn is_audio_file_matches_configured_extensions_case_insensitive() {
        let settings = LibrarySettings::default();
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.flac"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.txt"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
    }

    #[test]
    fn import_dir_filters_non_audio_in_name_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.mp3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("a.ogg"), b"not a real ogg").unwrap();
        fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

        let tracks = import_paths(&[dir.path()], &LibrarySettings::default());
        let titles: Vec<&str> = tracks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[test]
    fn import_files_keeps_argument_order_and_skips_missing() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.mp3");
        let b = dir.path().join("b.mp3");
        fs::write(&a, b"x").unwrap();
        fs::write(&b, b"x").unwrap();
        let missing = dir.path().join("missing.mp3");

        let tracks = import_paths(&[&b, &missing, &a], &LibrarySettings::default());
        let titles: Vec<&str> = tracks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "a"]);
        assert_ne!(tracks[0].id, tracks[1].id);
    }

    #[test]
    fn import_respects_include_hidden_false() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"x").unwrap();
        fs::write(dir.path().join("visible.mp3"), b"x").unwrap();

        let settings = LibrarySettings {
            include_hidden: false,
            ..LibrarySettings::default()
        };
        let tracks = import_paths(&[dir.path()], &settings);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "visible");
    }

    #[test]
    fn import_respects_recursive_false() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("root.mp3"), b"x").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.mp3"), b"x").unwrap();

        let settings = LibrarySettings {
            recursive: false,
            ..LibrarySettings::default()
        };
        let tracks = import_paths(&[dir.path()], &settings);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "root");
    }

    #[test]
    fn import_respects_max_depth() {
        let dir = tempdir().unwrap();
        let d1 = dir.path().join("d1");
        let d2 = d1.join("d2");
        fs::create_dir_all(&d2).unwrap();
        fs::write(dir.path().join("root.mp3"), b"x").unwrap();
        fs::write(d1.join("one.mp3"), b"x").unwrap();
        fs::write(d2.join("two.mp3"), b"x").unwrap();

        // WalkDir counts the root as depth 0.
        let settings = LibrarySettings {
            max_depth: Some(2),
            ..LibrarySettings::default()
        };
        let names: Vec<String> = import_paths(&[dir.path()], &settings)
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert!(names.contains(&"root".to_string()));
        assert!(names.contains(&"one".to_string()));
        assert!(!names.contains(&"two".to_string()));
    }

    #[test]
    fn read_tags_on_garbage_keeps_placeholders() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("noise.mp3");
        fs::write(&p, b"definitely not audio").unwrap();

        let settings = LibrarySettings {
            read_tags: true,
            ..LibrarySettings::default()
        };
        let tracks = import_paths(&[&p], &settings);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "noise");
        assert_eq!(tracks[0].artist, "Unknown Artist");
        assert_eq!(tracks[0].duration, 0.0);
    }
}
