//! Shared test utilities for the pubmanifest test suite.
//!
//! Builds asset trees in a temp directory and looks things up in generated
//! manifests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_complete_volume(&tmp.path().join("assets"), "GLM", "GLM_06");
//!
//! let manifest = generate(&Paths::for_root(tmp.path())).unwrap();
//! assert_eq!(volume_ids(&manifest), vec!["GLM_06"]);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::scan::RawVolumeAssets;
use crate::series::Series;
use crate::types::{Manifest, PublicationVolume};

// =========================================================================
// Asset tree setup
// =========================================================================

/// Create `<root>/<series_dir>/<volume_dir>/` with empty placeholder files.
pub fn write_volume(root: &Path, series_dir: &str, volume_dir: &str, files: &[&str]) -> PathBuf {
    let dir = root.join(series_dir).join(volume_dir);
    fs::create_dir_all(&dir).unwrap();
    for file in files {
        fs::write(dir.join(file), b"placeholder").unwrap();
    }
    dir
}

/// Create a volume folder with a cover and an abstract named after the folder.
pub fn write_complete_volume(root: &Path, series_dir: &str, volume_dir: &str) -> PathBuf {
    let stem = volume_dir.to_lowercase();
    let cover = format!("{stem}_titel.pdf");
    let abstract_doc = format!("{stem}_abstract.docx");
    write_volume(
        root,
        series_dir,
        volume_dir,
        &[cover.as_str(), abstract_doc.as_str()],
    )
}

/// Scanner output for a folder `<SERIES>_<volume>` with cover and abstract.
pub fn raw_volume(series: Series, volume: &str) -> RawVolumeAssets {
    let volume_dir = format!("{}_{volume}", series.code());
    let stem = volume_dir.to_lowercase();
    RawVolumeAssets {
        series,
        series_dir: series.code().to_string(),
        volume_dir,
        volume: volume.to_string(),
        cover: format!("{stem}_titel.pdf"),
        abstract_doc: format!("{stem}_abstract.docx"),
        text: None,
    }
}

// =========================================================================
// Manifest lookups — panics with a clear message on miss
// =========================================================================

/// All volume ids in manifest order.
pub fn volume_ids(manifest: &Manifest) -> Vec<&str> {
    manifest.volumes.iter().map(|v| v.id.as_str()).collect()
}

/// Find a volume by id. Panics if not found.
pub fn find_volume<'a>(manifest: &'a Manifest, id: &str) -> &'a PublicationVolume {
    manifest
        .volumes
        .iter()
        .find(|v| v.id == id)
        .unwrap_or_else(|| panic!("volume '{id}' not found. Available: {:?}", volume_ids(manifest)))
}
