//! CLI output formatting.
//!
//! `build` prints only the summary line; `check` prints the inventory.
//!
//! The inventory is grouped by series: one header per series with
//! its volume count, then one line per volume (display volume + title) with
//! indented context lines for what the reader needs to check by eye.
//!
//! ```text
//! GLM (2 volumes)
//!     07 Second Title
//!         Authors: A. Author (2001)
//!         Files: cover, abstract, text
//!     06 GLM 06
//!         Files: cover, abstract
//! GPS (0 volumes)
//! GPT (0 volumes)
//! GRP (0 volumes)
//! PLURIPEN (0 volumes)
//! ```
//!
//! ```text
//! Wrote 2 volumes to src/content/publications.generated.json
//! ```
//!
//! Each `format_*` function is pure and returns lines; the `print_*` wrappers
//! write them to stdout.

use crate::series::{Series, UMBRELLA_CODE};
use crate::types::{Manifest, PublicationVolume};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn series_header(code: &str, count: usize) -> String {
    format!("{code} ({})", plural(count, "volume"))
}

/// Authors and year on one line, whichever are present.
fn credits_line(volume: &PublicationVolume) -> Option<String> {
    match (&volume.authors, volume.year) {
        (Some(a), Some(y)) => Some(format!("Authors: {a} ({y})")),
        (Some(a), None) => Some(format!("Authors: {a}")),
        (None, Some(y)) => Some(format!("Year: {y}")),
        (None, None) => None,
    }
}

fn files_line(volume: &PublicationVolume) -> String {
    if volume.text_pdf.is_some() {
        "Files: cover, abstract, text".to_string()
    } else {
        "Files: cover, abstract".to_string()
    }
}

/// Format the per-series inventory of a manifest.
pub fn format_manifest_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();

    for series in Series::ALL {
        let volumes: Vec<&PublicationVolume> = manifest.volumes_in(series).collect();
        lines.push(series_header(series.code(), volumes.len()));
        for volume in volumes {
            lines.push(format!("{}{} {}", indent(1), volume.volume, volume.title));
            if let Some(credits) = credits_line(volume) {
                lines.push(format!("{}{}", indent(2), credits));
            }
            lines.push(format!("{}{}", indent(2), files_line(volume)));
        }
    }
    lines.push(series_header(UMBRELLA_CODE, 0));

    lines
}

/// `Wrote N volumes to <path>`, with the path shown relative to `root` when possible.
pub fn format_write_summary(manifest: &Manifest, output: &Path, root: &Path) -> String {
    let shown = output.strip_prefix(root).unwrap_or(output);
    format!(
        "Wrote {} to {}",
        plural(manifest.volumes.len(), "volume"),
        shown.display()
    )
}

pub fn print_manifest_output(manifest: &Manifest) {
    for line in format_manifest_output(manifest) {
        println!("{}", line);
    }
}

pub fn print_write_summary(manifest: &Manifest, output: &Path, root: &Path) {
    println!("{}", format_write_summary(manifest, output, root));
}
