//! Volume assembly: scanner output + metadata → [`PublicationVolume`].
//!
//! Metadata is looked up by series and padded volume. When the spreadsheet
//! has no title for a volume (or there is no spreadsheet at all) the title
//! falls back to `"<SERIES> <volume>"`. Authors and year are copied as found
//! and never defaulted.
//!
//! Asset URLs are relative (`assets/GLM/GLM_06/glm_06_titel.pdf`) so the
//! manifest keeps working when the site is served from a sub-path.

use crate::metadata::MetadataTable;
use crate::scan::RawVolumeAssets;
use crate::types::PublicationVolume;
use crate::volume::{fallback_title, pad_volume, volume_key};

/// Build the relative URL of a file inside a volume folder.
///
/// Always joined with `/`, whatever the host path separator.
pub fn asset_url(url_prefix: &str, series_dir: &str, volume_dir: &str, file: &str) -> String {
    if url_prefix.is_empty() {
        format!("{series_dir}/{volume_dir}/{file}")
    } else {
        format!("{url_prefix}/{series_dir}/{volume_dir}/{file}")
    }
}

/// Merge one scanned volume with its metadata, if any.
pub fn assemble(
    raw: &RawVolumeAssets,
    metadata: &MetadataTable,
    url_prefix: &str,
) -> PublicationVolume {
    let code = raw.series.code();
    let volume = pad_volume(&raw.volume);
    let meta = metadata.get(code, &volume);

    let title = meta
        .and_then(|m| m.title.clone())
        .unwrap_or_else(|| fallback_title(raw.series, &volume));
    let url = |file: &str| asset_url(url_prefix, &raw.series_dir, &raw.volume_dir, file);

    PublicationVolume {
        id: volume_key(code, &volume),
        series: raw.series,
        title,
        authors: meta.and_then(|m| m.authors.clone()),
        year: meta.and_then(|m| m.year),
        cover_pdf: url(&raw.cover),
        abstract_docx: url(&raw.abstract_doc),
        text_pdf: raw.text.as_deref().map(url),
        volume,
    }
}

/// Assemble every scanned volume, keeping scan order.
pub fn assemble_all(
    raws: &[RawVolumeAssets],
    metadata: &MetadataTable,
    url_prefix: &str,
) -> Vec<PublicationVolume> {
    raws.iter()
        .map(|raw| assemble(raw, metadata, url_prefix))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::VolumeMetadata;
    use crate::series::Series;
    use crate::test_helpers::raw_volume;

    fn metadata(entries: &[(&str, VolumeMetadata)]) -> MetadataTable {
        let mut table = MetadataTable::new();
        for (key, meta) in entries {
            table.insert(key.to_string(), meta.clone());
        }
        table
    }

    #[test]
    fn assembles_with_metadata() {
        let table = metadata(&[(
            "GLM_06",
            VolumeMetadata {
                title: Some("Example Title".to_string()),
                authors: None,
                year: Some(1998),
            },
        )]);

        let v = assemble(&raw_volume(Series::Glm, "06"), &table, "assets");
        assert_eq!(
            v,
            PublicationVolume {
                id: "GLM_06".to_string(),
                series: Series::Glm,
                volume: "06".to_string(),
                title: "Example Title".to_string(),
                authors: None,
                year: Some(1998),
                cover_pdf: "assets/GLM/GLM_06/glm_06_titel.pdf".to_string(),
                abstract_docx: "assets/GLM/GLM_06/glm_06_abstract.docx".to_string(),
                text_pdf: None,
            }
        );
    }

    #[test]
    fn unpadded_folder_finds_padded_metadata() {
        let table = metadata(&[(
            "GPS_03",
            VolumeMetadata {
                title: Some("Three".to_string()),
                ..VolumeMetadata::default()
            },
        )]);

        let v = assemble(&raw_volume(Series::Gps, "3"), &table, "assets");
        assert_eq!(v.id, "GPS_03");
        assert_eq!(v.volume, "03");
        assert_eq!(v.title, "Three");
        // URLs keep the folder name as found on disk
        assert_eq!(v.cover_pdf, "assets/GPS/GPS_3/gps_3_titel.pdf");
    }

    #[test]
    fn title_falls_back_without_metadata() {
        let v = assemble(&raw_volume(Series::Grp, "14-15"), &MetadataTable::new(), "assets");
        assert_eq!(v.title, "GRP 14-15");
        assert_eq!(v.volume, "14-15");
        assert_eq!(v.authors, None);
        assert_eq!(v.year, None);
    }

    #[test]
    fn title_falls_back_when_row_has_no_title() {
        let table = metadata(&[(
            "GLM_01",
            VolumeMetadata {
                title: None,
                authors: Some("Editors".to_string()),
                year: None,
            },
        )]);
        let v = assemble(&raw_volume(Series::Glm, "1"), &table, "assets");
        assert_eq!(v.title, "GLM 01");
        assert_eq!(v.authors.as_deref(), Some("Editors"));
    }

    #[test]
    fn text_url_only_when_found() {
        let mut raw = raw_volume(Series::Gpt, "02");
        raw.text = Some("gpt_02_kern.pdf".to_string());
        let v = assemble(&raw, &MetadataTable::new(), "assets");
        assert_eq!(v.text_pdf.as_deref(), Some("assets/GPT/GPT_02/gpt_02_kern.pdf"));
    }

    #[test]
    fn urls_are_relative() {
        let v = assemble(&raw_volume(Series::Glm, "06"), &MetadataTable::new(), "assets");
        assert!(!v.cover_pdf.starts_with('/'));
        assert!(!v.abstract_docx.starts_with('/'));
    }

    #[test]
    fn empty_prefix_has_no_leading_slash() {
        assert_eq!(asset_url("", "GLM", "GLM_06", "f.pdf"), "GLM/GLM_06/f.pdf");
        assert_eq!(asset_url("static", "GLM", "GLM_06", "f.pdf"), "static/GLM/GLM_06/f.pdf");
    }
}
