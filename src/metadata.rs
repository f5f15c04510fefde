//! Volume metadata from the `books.xlsx` spreadsheet.
//!
//! The spreadsheet is maintained by hand, so the loader is forgiving about
//! everything except the one thing it cannot work without: a column that
//! identifies the volume of each row.
//!
//! ## Sheet layout
//!
//! Only the first sheet is read. Its first row is the header; every further
//! row describes one volume:
//!
//! ```text
//! Nummer   | Buchtitel       | Autoren bzw. Herausgeber:innen | Jahr
//! GLM6     | Example Title   | A. Author                      | 1998
//! GRP 14-15| Double Volume   |                                | 2004
//! ```
//!
//! ## Header resolution
//!
//! Headers are normalised (lowercased, everything but `a-z0-9` removed) and
//! looked up in [`HEADER_ALIASES`], first alias wins. The identifier column is
//! required; without it no row can be keyed and the table is empty. Title,
//! authors and year are optional and simply stay unset when their column is
//! missing.
//!
//! ## Resolution rules
//!
//! - Identifiers like `GLM6` or `glm 06` key the row as `GLM_06`.
//! - Rows whose identifier does not parse are skipped.
//! - Empty cells leave the field unset, never an empty string.
//! - Years must be integral numbers; anything else leaves the year unset.
//! - A later row with the same key replaces the earlier one.

use crate::volume::{pad_volume, parse_identifier, volume_key};
use calamine::{Data, Reader, open_workbook_auto};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),
}

/// Metadata for one volume. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolumeMetadata {
    pub title: Option<String>,
    pub authors: Option<String>,
    pub year: Option<i32>,
}

/// Metadata rows keyed by `SERIES_paddedVolume`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataTable {
    entries: BTreeMap<String, VolumeMetadata>,
}

impl MetadataTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a volume by series code and padded volume.
    pub fn get(&self, series: &str, padded_volume: &str) -> Option<&VolumeMetadata> {
        self.entries.get(&volume_key(series, padded_volume))
    }

    /// Insert or replace the metadata for a key.
    pub fn insert(&mut self, key: String, meta: VolumeMetadata) {
        self.entries.insert(key, meta);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Logical spreadsheet columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Identifier,
    Authors,
    Year,
    Title,
}

/// Accepted (normalised) header names per column, in priority order.
pub const HEADER_ALIASES: &[(Column, &[&str])] = &[
    (Column::Identifier, &["nummer", "number", "no", "nr"]),
    (
        Column::Authors,
        &["autorenbzwherausgebereds", "autor", "authors", "editor", "editors"],
    ),
    (Column::Year, &["jahr", "year"]),
    (Column::Title, &["buchtitel", "titel", "title", "name"]),
];

/// Normalise a header for alias lookup: `"Autoren bzw. Herausgeber"` → `"autorenbzwherausgeber"`.
pub fn normalize_header(header: &str) -> String {
    header
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Column indices resolved from a header row.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Columns {
    identifier: Option<usize>,
    authors: Option<usize>,
    year: Option<usize>,
    title: Option<usize>,
}

fn resolve_columns(header: &[Data]) -> Columns {
    // A later header that normalises to the same name replaces the earlier one.
    let by_name: HashMap<String, usize> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| (normalize_header(&cell_text(cell)), i))
        .collect();

    let mut columns = Columns::default();
    for (column, aliases) in HEADER_ALIASES {
        let index = aliases.iter().find_map(|alias| by_name.get(*alias).copied());
        match column {
            Column::Identifier => columns.identifier = index,
            Column::Authors => columns.authors = index,
            Column::Year => columns.year = index,
            Column::Title => columns.title = index,
        }
    }
    columns
}

/// Text content of a cell, trimmed. Integral floats print without `.0`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
            format!("{}", *f as i64)
        }
        other => other.to_string().trim().to_string(),
    }
}

fn integral_year(value: f64) -> Option<i32> {
    if value.is_finite() && value.fract() == 0.0 {
        i32::try_from(value as i64).ok()
    } else {
        None
    }
}

/// Coerce a year cell. Empty, non-numeric and fractional values are unset.
fn cell_year(cell: &Data) -> Option<i32> {
    match cell {
        Data::Int(i) => i32::try_from(*i).ok(),
        Data::Float(f) => integral_year(*f),
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().and_then(integral_year)
        }
        _ => None,
    }
}

fn optional_text(row: &[Data], column: Option<usize>) -> Option<String> {
    column
        .and_then(|i| row.get(i))
        .map(cell_text)
        .filter(|s| !s.is_empty())
}

/// Build a metadata table from sheet rows. The first row is the header.
pub fn metadata_from_rows<'a, I>(rows: I) -> MetadataTable
where
    I: IntoIterator<Item = &'a [Data]>,
{
    let mut rows = rows.into_iter();
    let mut table = MetadataTable::new();

    let Some(header) = rows.next() else {
        return table;
    };
    let columns = resolve_columns(header);
    let Some(id_column) = columns.identifier else {
        tracing::warn!("metadata sheet has no identifier column; ignoring all rows");
        return table;
    };

    for row in rows {
        let Some(raw_id) = optional_text(row, Some(id_column)) else {
            continue;
        };
        let Some((series, token)) = parse_identifier(&raw_id) else {
            tracing::debug!(identifier = %raw_id, "skipping metadata row with unrecognised identifier");
            continue;
        };

        let key = volume_key(&series, &pad_volume(&token));
        let meta = VolumeMetadata {
            title: optional_text(row, columns.title),
            authors: optional_text(row, columns.authors),
            year: columns.year.and_then(|i| row.get(i)).and_then(cell_year),
        };
        table.insert(key, meta);
    }

    table
}

/// Read the first sheet of a workbook into a metadata table.
///
/// Errors if the file cannot be opened or parsed as a spreadsheet.
pub fn read_metadata(path: &Path) -> Result<MetadataTable, MetadataError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Ok(MetadataTable::new()),
    };
    Ok(metadata_from_rows(range.rows()))
}

/// Load metadata, degrading to an empty table.
///
/// A missing spreadsheet is normal. An unreadable one is logged and treated
/// as missing: metadata only improves titles, it never gates the manifest.
pub fn load_metadata(path: &Path) -> MetadataTable {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no metadata spreadsheet; titles will fall back");
        return MetadataTable::new();
    }
    match read_metadata(path) {
        Ok(table) => {
            tracing::debug!(path = %path.display(), rows = table.len(), "loaded metadata");
            table
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "metadata spreadsheet unreadable; continuing without it");
            MetadataTable::new()
        }
    }
}
