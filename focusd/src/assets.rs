//! Ambient asset listing.
//!
//! Scans the static directories for audio tracks and background images and
//! turns file names into display names ("forest-rain.mp3" -> "Forest Rain").

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Kinds of asset the timer pages can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Audio,
    Background,
}

impl AssetKind {
    /// File extensions accepted for this kind, lowercase and without the dot.
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Audio => &["mp3", "wav", "ogg"],
            Self::Background => &["jpg", "jpeg", "png"],
        }
    }

    fn matches(self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions()
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
    }
}

/// One selectable asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    /// Human-readable name.
    pub name: String,
    /// File name relative to the scanned directory.
    pub file: String,
}

/// List files of `kind` directly inside `dir`, sorted by file name.
///
/// A directory that does not exist yields an empty list.
pub async fn list_assets(dir: &Path, kind: AssetKind) -> std::io::Result<Vec<AssetEntry>> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "asset directory missing");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    let mut assets = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let Some(file) = entry.file_name().to_str().map(String::from) else {
            continue;
        };
        if kind.matches(&file) && is_file_or_link_to_file(&entry).await? {
            assets.push(AssetEntry {
                name: display_name(&file),
                file,
            });
        }
    }

    assets.sort_by(|a, b| a.file.cmp(&b.file));
    debug!(dir = %dir.display(), count = assets.len(), ?kind, "scanned assets");
    Ok(assets)
}

/// Regular files count, and so do symlinks whose target is a regular file.
/// Dangling links are skipped.
async fn is_file_or_link_to_file(entry: &tokio::fs::DirEntry) -> std::io::Result<bool> {
    let file_type = entry.file_type().await?;
    if file_type.is_file() {
        return Ok(true);
    }
    if !file_type.is_symlink() {
        return Ok(false);
    }
    match tokio::fs::metadata(entry.path()).await {
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Turn a file name into a title-cased display name.
pub fn display_name(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);

    let mut name = String::with_capacity(stem.len());
    let mut at_word_start = true;
    for c in stem.chars() {
        let c = if c == '-' || c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if at_word_start {
                name.extend(c.to_uppercase());
            } else {
                name.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            name.push(c);
            at_word_start = true;
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("forest-rain.mp3"), "Forest Rain");
        assert_eq!(display_name("OCEAN_waves.ogg"), "Ocean Waves");
        assert_eq!(display_name("lo-fi-2.wav"), "Lo Fi 2");
        assert_eq!(display_name("mountain.jpeg"), "Mountain");
        assert_eq!(display_name("noext"), "Noext");
    }

    #[test]
    fn test_kind_matches_extensions() {
        assert!(AssetKind::Audio.matches("rain.MP3"));
        assert!(AssetKind::Audio.matches("rain.ogg"));
        assert!(!AssetKind::Audio.matches("rain.png"));
        assert!(AssetKind::Background.matches("sky.jpeg"));
        assert!(!AssetKind::Background.matches("jpg"));
    }

    #[tokio::test]
    async fn test_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let assets = list_assets(&dir.path().join("nope"), AssetKind::Audio)
            .await
            .unwrap();
        assert!(assets.is_empty());
    }

    #[tokio::test]
    async fn test_lists_matching_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["white-noise.wav", "birds.mp3", "notes.txt", "sky.png"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.mp3")).unwrap();

        let assets = list_assets(dir.path(), AssetKind::Audio).await.unwrap();
        assert_eq!(
            assets,
            vec![
                AssetEntry {
                    name: "Birds".to_string(),
                    file: "birds.mp3".to_string(),
                },
                AssetEntry {
                    name: "White Noise".to_string(),
                    file: "white-noise.wav".to_string(),
                },
            ]
        );

        let backgrounds = list_assets(dir.path(), AssetKind::Background).await.unwrap();
        assert_eq!(backgrounds.len(), 1);
        assert_eq!(backgrounds[0].name, "Sky");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_lists_symlinked_files() {
        let library = tempfile::tempdir().unwrap();
        let target = library.path().join("recording.mp3");
        std::fs::write(&target, b"").unwrap();

        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("rain.mp3")).unwrap();
        std::os::unix::fs::symlink(library.path(), dir.path().join("folder.mp3")).unwrap();
        std::os::unix::fs::symlink(library.path().join("gone.mp3"), dir.path().join("gone.mp3"))
            .unwrap();

        let assets = list_assets(dir.path(), AssetKind::Audio).await.unwrap();
        assert_eq!(
            assets,
            vec![AssetEntry {
                name: "Rain".to_string(),
                file: "rain.mp3".to_string(),
            }]
        );
    }
}
