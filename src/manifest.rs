//! Manifest ordering, generation and writing.
//!
//! [`generate`] runs the whole pipeline in memory:
//!
//! ```text
//! books.xlsx ──► metadata::load_metadata ─┐
//!                                         ├─► assemble ─► sort ─► Manifest
//! assets/    ──► scan::scan ──────────────┘
//! ```
//!
//! [`build`] does the same and then writes the JSON document. The file is
//! written once, at the end, through a temporary file that is renamed over
//! the target, so readers never see a half-written manifest and a failed run
//! leaves the previous one in place.
//!
//! ## Ordering
//!
//! Series ascending by code, then volume descending (see
//! [`compare_volumes_desc`]). The sort is stable and its input is in folder
//! name order, so identical inputs always give identical output.

use crate::assemble::assemble_all;
use crate::config::Paths;
use crate::metadata::load_metadata;
use crate::scan::{self, ScanError};
use crate::types::{Manifest, PublicationVolume};
use crate::volume::compare_volumes_desc;
use chrono::Utc;
use std::collections::HashSet;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Cannot create output directory {path}: {source}")]
    CreateDir {
        path: std::path::PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cannot write manifest to {path}: {source}")]
    Persist {
        path: std::path::PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Sort volumes into manifest order.
pub fn sort_volumes(volumes: &mut [PublicationVolume]) {
    volumes.sort_by(|a, b| {
        a.series
            .code()
            .cmp(b.series.code())
            .then_with(|| compare_volumes_desc(&a.volume, &b.volume))
    });
}

/// Drop volumes whose id already appeared earlier in the list.
///
/// Two folders can resolve to the same id (`GLM_6` and `GLM_06`). The first
/// one in manifest order is kept.
pub fn dedupe_ids(volumes: Vec<PublicationVolume>) -> Vec<PublicationVolume> {
    let mut seen = HashSet::new();
    volumes
        .into_iter()
        .filter(|v| {
            let fresh = seen.insert(v.id.clone());
            if !fresh {
                tracing::warn!(id = %v.id, cover = %v.cover_pdf, "dropping volume with duplicate id");
            }
            fresh
        })
        .collect()
}

/// Run the pipeline and return the manifest without writing it.
pub fn generate(paths: &Paths) -> Result<Manifest, ManifestError> {
    let metadata = load_metadata(&paths.metadata);
    let raws = scan::scan(&paths.assets_root)?;

    let mut volumes = assemble_all(&raws, &metadata, &paths.url_prefix);
    sort_volumes(&mut volumes);
    let volumes = dedupe_ids(volumes);

    tracing::info!(
        volumes = volumes.len(),
        metadata_rows = metadata.len(),
        "manifest assembled"
    );

    Ok(Manifest {
        generated_at: Utc::now(),
        volumes,
    })
}

/// Generate the manifest and write it to `paths.output`.
pub fn build(paths: &Paths) -> Result<Manifest, ManifestError> {
    let manifest = generate(paths)?;
    write_manifest(&manifest, &paths.output)?;
    Ok(manifest)
}

/// Pretty JSON (two-space indent) with a trailing newline.
pub fn to_json(manifest: &Manifest) -> Result<String, ManifestError> {
    let mut json = serde_json::to_string_pretty(manifest)?;
    json.push('\n');
    Ok(json)
}

/// Write the manifest, replacing any existing file in one rename.
///
/// Missing parent directories are created.
pub fn write_manifest(manifest: &Manifest, path: &Path) -> Result<(), ManifestError> {
    let json = to_json(manifest)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|source| ManifestError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|source| ManifestError::Persist {
        path: path.to_path_buf(),
        source,
    })?;
    tmp.write_all(json.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| ManifestError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
