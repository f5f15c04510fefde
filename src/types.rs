//! Types shared between the pipeline and the manifest readers.
//!
//! [`Manifest`] is the on-disk contract: the site's rendering layer reads the
//! generated JSON as static data, so field names are camelCase and absent
//! optionals are omitted rather than written as `null`.

use crate::series::{Series, UMBRELLA_CODE};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One publication volume as listed on the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationVolume {
    /// `SERIES_volume`, e.g. `GLM_06`. Unique within a manifest.
    pub id: String,
    pub series: Series,
    /// Display form: zero-padded for numeric tokens, ranges as-is.
    pub volume: String,
    /// Spreadsheet title, or `"<SERIES> <volume>"`.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Relative URL of the cover PDF.
    pub cover_pdf: String,
    /// Relative URL of the abstract DOCX.
    pub abstract_docx: String,
    /// Relative URL of the full text, present only when a file was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_pdf: Option<String>,
}

/// The generated publications manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(
        serialize_with = "serialize_timestamp",
        deserialize_with = "deserialize_timestamp"
    )]
    pub generated_at: DateTime<Utc>,
    pub volumes: Vec<PublicationVolume>,
}

impl Manifest {
    /// Volumes of one series, in manifest order.
    pub fn volumes_in(&self, series: Series) -> impl Iterator<Item = &PublicationVolume> {
        self.volumes.iter().filter(move |v| v.series == series)
    }

    /// Volume count per series code, umbrella last with zero.
    pub fn series_counts(&self) -> Vec<(&'static str, usize)> {
        let mut counts: Vec<(&'static str, usize)> = Series::ALL
            .iter()
            .map(|&s| (s.code(), self.volumes_in(s).count()))
            .collect();
        counts.push((UMBRELLA_CODE, 0));
        counts
    }
}

/// ISO-8601 in UTC with millisecond precision: `2026-10-18T09:30:00.000Z`.
fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn deserialize_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(d)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}
