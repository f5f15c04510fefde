//! Asset folder scanning.
//!
//! Walks the two-level asset layout and classifies the files of each volume
//! folder by filename suffix.
//!
//! ## Directory Structure
//!
//! ```text
//! assets/                              # Assets root
//! ├── books.xlsx                       # Metadata (read by `metadata`, not here)
//! ├── GLM/                             # Series folder (exact code)
//! │   ├── GLM_06/                      # Volume folder: <SERIES>_<token>
//! │   │   ├── glm_06_titel.pdf         # Cover (required)
//! │   │   ├── glm_06_abstract.docx     # Abstract (required)
//! │   │   └── glm_06_text.pdf          # Full text (optional)
//! │   └── GLM_07/                      # No cover → not in the manifest
//! │       └── glm_07_abstract.docx
//! ├── GRP/
//! │   └── GRP_14-15/                   # Range token
//! └── drafts/                          # Not a series code → ignored
//! ```
//!
//! ## Classification
//!
//! Each file role is resolved through [`FILE_RULES`] in order; for a rule, the
//! first file (in sorted name order) that matches wins. Matching ignores case.
//! A folder without a cover or an abstract yields nothing. Nothing inside the
//! files is inspected.
//!
//! ## Failure policy
//!
//! Unreadable assets root or series folder: error. Anything wrong with a
//! single volume folder (bad name, unreadable, missing files): that folder is
//! skipped and the scan continues.

use crate::series::Series;
use crate::volume::parse_volume_folder;
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Files found in one volume folder that has at least a cover and an abstract.
#[derive(Debug, Clone, PartialEq)]
pub struct RawVolumeAssets {
    /// Series parsed from the volume folder name.
    pub series: Series,
    /// Series folder the volume was found in, as named on disk.
    pub series_dir: String,
    /// Volume folder name, e.g. `GRP_14-15`.
    pub volume_dir: String,
    /// Raw volume token, e.g. `14-15` or `6`.
    pub volume: String,
    pub cover: String,
    pub abstract_doc: String,
    pub text: Option<String>,
}

/// Role a file plays within a volume folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Cover,
    Abstract,
    FullText,
}

/// How a rule matches a (lowercased) filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePattern {
    Suffix(&'static str),
    Exact(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileRule {
    pub role: FileRole,
    pub pattern: NamePattern,
}

impl FileRule {
    pub fn matches(&self, filename: &str) -> bool {
        let lower = filename.to_lowercase();
        match self.pattern {
            NamePattern::Suffix(suffix) => lower.ends_with(suffix),
            NamePattern::Exact(name) => lower == name,
        }
    }
}

/// Classification rules, tried in order per role.
///
/// The exact abstract name covers one historical volume whose abstract was
/// filed under a different series prefix.
pub const FILE_RULES: &[FileRule] = &[
    FileRule {
        role: FileRole::Cover,
        pattern: NamePattern::Suffix("_titel.pdf"),
    },
    FileRule {
        role: FileRole::Abstract,
        pattern: NamePattern::Suffix("_abstract.docx"),
    },
    FileRule {
        role: FileRole::Abstract,
        pattern: NamePattern::Exact("dglm_20_abstract.docx"),
    },
    FileRule {
        role: FileRole::FullText,
        pattern: NamePattern::Suffix("_text.pdf"),
    },
    FileRule {
        role: FileRole::FullText,
        pattern: NamePattern::Suffix("_kern.pdf"),
    },
    FileRule {
        role: FileRole::FullText,
        pattern: NamePattern::Suffix("_ktext.pdf"),
    },
];

/// Pick the file for a role: rules in order, first matching file per rule.
pub fn find_file<'a>(files: &'a [String], role: FileRole) -> Option<&'a str> {
    FILE_RULES
        .iter()
        .filter(|rule| rule.role == role)
        .find_map(|rule| files.iter().find(|f| rule.matches(f)))
        .map(String::as_str)
}

/// A volume folder queued for classification.
struct Candidate {
    series_dir: String,
    volume_dir: String,
    path: PathBuf,
}

/// Scan the assets root for volumes with a cover and an abstract.
///
/// Results are ordered by series folder name, then volume folder name; the
/// final manifest order is applied later.
pub fn scan(assets_root: &Path) -> Result<Vec<RawVolumeAssets>, ScanError> {
    let mut candidates = Vec::new();

    for series_dir in list_dirs(assets_root)? {
        if Series::from_code(&series_dir).is_none() {
            tracing::debug!(dir = %series_dir, "ignoring non-series directory");
            continue;
        }
        let series_path = assets_root.join(&series_dir);
        for volume_dir in list_dirs(&series_path)? {
            let path = series_path.join(&volume_dir);
            candidates.push(Candidate {
                series_dir: series_dir.clone(),
                volume_dir,
                path,
            });
        }
    }

    let volumes: Vec<RawVolumeAssets> = candidates.par_iter().filter_map(classify).collect();
    tracing::debug!(
        folders = candidates.len(),
        volumes = volumes.len(),
        "scanned volume folders"
    );
    Ok(volumes)
}

fn classify(candidate: &Candidate) -> Option<RawVolumeAssets> {
    let Some(folder) = parse_volume_folder(&candidate.volume_dir) else {
        tracing::debug!(dir = %candidate.path.display(), "skipping folder: not <SERIES>_<volume>");
        return None;
    };
    let Some(series) = Series::from_code(&folder.prefix) else {
        tracing::debug!(dir = %candidate.path.display(), "skipping folder: unknown series prefix");
        return None;
    };

    let files = match list_files(&candidate.path) {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!(dir = %candidate.path.display(), error = %e, "skipping unreadable volume folder");
            return None;
        }
    };

    let Some(cover) = find_file(&files, FileRole::Cover) else {
        tracing::debug!(dir = %candidate.path.display(), "skipping volume: no cover");
        return None;
    };
    let Some(abstract_doc) = find_file(&files, FileRole::Abstract) else {
        tracing::debug!(dir = %candidate.path.display(), "skipping volume: no abstract");
        return None;
    };
    let text = find_file(&files, FileRole::FullText);

    Some(RawVolumeAssets {
        series,
        series_dir: candidate.series_dir.clone(),
        volume_dir: candidate.volume_dir.clone(),
        volume: folder.token,
        cover: cover.to_string(),
        abstract_doc: abstract_doc.to_string(),
        text: text.map(String::from),
    })
}

/// Names of the subdirectories of `path`, sorted. Symlinks are not followed.
fn list_dirs(path: &Path) -> Result<Vec<String>, ScanError> {
    list_entries(path, |ft| ft.is_dir()).map_err(|source| ScanError::ReadDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Names of the regular files in `path`, sorted.
fn list_files(path: &Path) -> io::Result<Vec<String>> {
    list_entries(path, |ft| ft.is_file())
}

fn list_entries(path: &Path, keep: impl Fn(&fs::FileType) -> bool) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if !keep(&entry.file_type()?) {
            continue;
        }
        // Non-UTF-8 names cannot appear in a URL; skip them.
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}
