//! Volume token parsing.
//!
//! A volume token is what follows the series code: `06`, `6`, or a range such
//! as `14-15`. Tokens show up in two places, folder names (`GLM_06`) and the
//! spreadsheet identifier column (`GLM6`, `glm 14-15`), and both must resolve
//! to the same lookup key.
//!
//! ## Display form
//!
//! Pure-digit tokens are zero-padded to two digits, everything else passes
//! through unchanged:
//! - `6` → `06`
//! - `006` → `06`
//! - `123` → `123`
//! - `14-15` → `14-15`
//! - `6a` → `6a`

use crate::series::Series;
use std::cmp::Ordering;

/// A `<SERIES>_<token>` volume folder name, split into its parts.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeFolder {
    /// Three-letter prefix as written (not yet checked against known series).
    pub prefix: String,
    /// Raw token after the first underscore. May contain hyphens.
    pub token: String,
}

/// Parse a volume folder name of the form `ABC_<rest>`.
///
/// The prefix must be exactly three ASCII uppercase letters and `rest` must be
/// non-empty. Returns `None` otherwise.
pub fn parse_volume_folder(name: &str) -> Option<VolumeFolder> {
    let (prefix, token) = name.split_once('_')?;
    if prefix.len() != 3 || !prefix.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }
    if token.is_empty() {
        return None;
    }
    Some(VolumeFolder {
        prefix: prefix.to_string(),
        token: token.to_string(),
    })
}

/// Parse a spreadsheet identifier like `GLM6`, `glm 06` or `GRP14-15`.
///
/// Matching is case-insensitive: the input is uppercased first. Surrounding
/// whitespace and whitespace between code and number are allowed. Returns the
/// three-letter code and the raw numeric token.
pub fn parse_identifier(raw: &str) -> Option<(String, String)> {
    let upper = raw.trim().to_uppercase();
    let code: String = upper.chars().take(3).collect();
    if code.chars().count() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }
    let rest = upper[code.len()..].trim_start();
    if !is_numeric_token(rest) {
        return None;
    }
    Some((code, rest.to_string()))
}

/// `<digits>` or `<digits>-<digits>`.
fn is_numeric_token(token: &str) -> bool {
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match token.split_once('-') {
        Some((a, b)) => is_digits(a) && is_digits(b),
        None => is_digits(token),
    }
}

/// Zero-pad a pure-numeric token to at least two digits.
///
/// Ranges and non-numeric tokens are returned unchanged. Leading zeros of
/// longer numbers are normalised (`006` → `06`).
pub fn pad_volume(token: &str) -> String {
    if token.contains('-') || token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return token.to_string();
    }
    match token.parse::<u64>() {
        Ok(n) => format!("{n:02}"),
        Err(_) => token.to_string(),
    }
}

/// Lookup key shared by metadata rows and scanned volumes: `GLM_06`.
pub fn volume_key(series: &str, padded_volume: &str) -> String {
    format!("{series}_{padded_volume}")
}

/// Numeric components of a volume token.
///
/// `"14-15"` → `[14, 15]`, `"06"` → `[6]`. Any non-numeric component makes the
/// whole key empty (`"6a"` → `[]`).
pub fn volume_sort_key(volume: &str) -> Vec<u64> {
    volume
        .split('-')
        .map(|part| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                None
            } else {
                part.parse::<u64>().ok()
            }
        })
        .collect::<Option<Vec<u64>>>()
        .unwrap_or_default()
}

/// Order two volumes of the same series, highest first.
///
/// Numeric keys compare component-wise, a missing component ranking below any
/// present one (`14-15` before `14` before `13`). Numeric keys come before
/// non-numeric ones; two non-numeric tokens compare by raw string, descending.
pub fn compare_volumes_desc(a: &str, b: &str) -> Ordering {
    let ak = volume_sort_key(a);
    let bk = volume_sort_key(b);
    match (ak.is_empty(), bk.is_empty()) {
        (false, false) => bk.cmp(&ak),
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => b.cmp(a),
    }
}

/// Synthetic title used when the spreadsheet has none: `GLM 06`.
pub fn fallback_title(series: Series, padded_volume: &str) -> String {
    format!("{} {}", series.code(), padded_volume)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Folder names
    // =========================================================================

    #[test]
    fn folder_simple() {
        let f = parse_volume_folder("GLM_06").unwrap();
        assert_eq!(f.prefix, "GLM");
        assert_eq!(f.token, "06");
    }

    #[test]
    fn folder_range() {
        let f = parse_volume_folder("GRP_14-15").unwrap();
        assert_eq!(f.token, "14-15");
    }

    #[test]
    fn folder_keeps_everything_after_first_underscore() {
        let f = parse_volume_folder("GPS_03_old").unwrap();
        assert_eq!(f.token, "03_old");
    }

    #[test]
    fn folder_rejects_lowercase_prefix() {
        assert_eq!(parse_volume_folder("glm_06"), None);
    }

    #[test]
    fn folder_rejects_wrong_prefix_length() {
        assert_eq!(parse_volume_folder("GL_06"), None);
        assert_eq!(parse_volume_folder("GLMX_06"), None);
    }

    #[test]
    fn folder_rejects_missing_token() {
        assert_eq!(parse_volume_folder("GLM_"), None);
        assert_eq!(parse_volume_folder("GLM06"), None);
    }

    // =========================================================================
    // Spreadsheet identifiers
    // =========================================================================

    #[test]
    fn identifier_without_space() {
        assert_eq!(
            parse_identifier("GLM6"),
            Some(("GLM".to_string(), "6".to_string()))
        );
    }

    #[test]
    fn identifier_lowercase_with_space() {
        assert_eq!(
            parse_identifier("  glm 06 "),
            Some(("GLM".to_string(), "06".to_string()))
        );
    }

    #[test]
    fn identifier_range() {
        assert_eq!(
            parse_identifier("GRP14-15"),
            Some(("GRP".to_string(), "14-15".to_string()))
        );
    }

    #[test]
    fn identifier_rejects_garbage() {
        assert_eq!(parse_identifier(""), None);
        assert_eq!(parse_identifier("GLM"), None);
        assert_eq!(parse_identifier("GLM6a"), None);
        assert_eq!(parse_identifier("GL6"), None);
        assert_eq!(parse_identifier("GLM 14-"), None);
        assert_eq!(parse_identifier("Band 6"), None);
    }

    // =========================================================================
    // Padding
    // =========================================================================

    #[test]
    fn pad_single_digit() {
        assert_eq!(pad_volume("6"), "06");
    }

    #[test]
    fn pad_normalises_extra_zeros() {
        assert_eq!(pad_volume("006"), "06");
    }

    #[test]
    fn pad_leaves_wide_numbers() {
        assert_eq!(pad_volume("123"), "123");
    }

    #[test]
    fn pad_leaves_ranges_and_text() {
        assert_eq!(pad_volume("14-15"), "14-15");
        assert_eq!(pad_volume("6a"), "6a");
        assert_eq!(pad_volume(""), "");
    }

    #[test]
    fn padded_numbers_round_trip() {
        for n in [0u64, 1, 9, 10, 42, 99, 100, 2024] {
            let padded = pad_volume(&n.to_string());
            assert!(padded.len() >= 2, "{padded} shorter than two digits");
            assert_eq!(padded.parse::<u64>().unwrap(), n);
        }
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    #[test]
    fn sort_key_components() {
        assert_eq!(volume_sort_key("14-15"), vec![14, 15]);
        assert_eq!(volume_sort_key("06"), vec![6]);
        assert!(volume_sort_key("6a").is_empty());
        assert!(volume_sort_key("14-").is_empty());
    }

    #[test]
    fn malformed_range_sorts_after_numeric() {
        // "14-" has no integer second component, so it is not numeric at all
        assert_eq!(compare_volumes_desc("14-", "13"), Ordering::Greater);
        assert_eq!(compare_volumes_desc("13", "14-"), Ordering::Less);
        assert_eq!(compare_volumes_desc("14-", "special"), Ordering::Greater);
    }

    #[test]
    fn range_before_lower_single() {
        assert_eq!(compare_volumes_desc("14-15", "13"), Ordering::Less);
        assert_eq!(compare_volumes_desc("13", "14-15"), Ordering::Greater);
    }

    #[test]
    fn range_before_its_own_start() {
        assert_eq!(compare_volumes_desc("14-15", "14"), Ordering::Less);
    }

    #[test]
    fn numeric_before_text() {
        assert_eq!(compare_volumes_desc("01", "special"), Ordering::Less);
        assert_eq!(compare_volumes_desc("special", "01"), Ordering::Greater);
    }

    #[test]
    fn text_descending() {
        assert_eq!(compare_volumes_desc("a", "b"), Ordering::Greater);
    }

    #[test]
    fn equal_numeric_keys_tie() {
        assert_eq!(compare_volumes_desc("6", "06"), Ordering::Equal);
    }

    #[test]
    fn fallback_title_uses_code_and_volume() {
        assert_eq!(fallback_title(Series::Glm, "06"), "GLM 06");
    }
}
