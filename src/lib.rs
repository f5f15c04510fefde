//! # pubmanifest
//!
//! Build-time generator for a publications site's volume manifest. The asset
//! folders are the data source: every volume folder with a cover and an
//! abstract becomes one entry, and the `books.xlsx` spreadsheet adds titles,
//! authors and years where it has them.
//!
//! # Pipeline
//!
//! ```text
//! 1. Load metadata   books.xlsx       →  MetadataTable      (optional input)
//! 2. Scan            assets/<S>/<S>_* →  RawVolumeAssets    (filename rules)
//! 3. Assemble        scan + metadata  →  PublicationVolume  (fallback titles, URLs)
//! 4. Sort & write    volumes          →  publications.generated.json
//! ```
//!
//! The run always rebuilds the whole manifest. Per-row and per-folder problems
//! are handled by leaving that row or folder out; only an unreadable assets
//! tree, a bad config file or an unwritable output stop the run, and then
//! nothing is written.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`metadata`] | Spreadsheet loading, header alias table, row parsing |
//! | [`scan`] | Series/volume folder walk and file classification rules |
//! | [`assemble`] | Merge scan results with metadata into manifest entries |
//! | [`manifest`] | Ordering, id de-duplication, generation and atomic writing |
//! | [`types`] | The serialized manifest contract read by the site |
//! | [`series`] | The fixed series codes and the empty umbrella series |
//! | [`volume`] | Volume token parsing, padding and ordering |
//! | [`config`] | `pubmanifest.toml` loading and path resolution |
//! | [`output`] | CLI report formatting |
//!
//! # Design Decisions
//!
//! ## Relative URLs
//!
//! Asset links are written as `assets/<series>/<volume>/<file>` without a
//! leading slash, so the same manifest works when the site is deployed under
//! a sub-path.
//!
//! ## Explicit Paths
//!
//! The core never consults the working directory. [`config::Paths`] carries
//! the assets root, spreadsheet and output locations into
//! [`manifest::generate`], which keeps every stage testable on a temp dir.
//!
//! ## Deterministic Output
//!
//! Folder listings are sorted before classification, the parallel scan
//! collects in input order, and the final sort is stable. Two runs over the
//! same files differ only in `generatedAt`.

pub mod assemble;
pub mod config;
pub mod manifest;
pub mod metadata;
pub mod output;
pub mod scan;
pub mod series;
pub mod types;
pub mod volume;

#[cfg(test)]
pub(crate) mod test_helpers;
