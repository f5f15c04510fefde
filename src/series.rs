//! The fixed set of publication series.
//!
//! Four series carry volumes and are scanned from disk. A fifth code,
//! `PLURIPEN`, is the umbrella imprint: readers list it next to the others,
//! but it never has volumes of its own and is never scanned.
//!
//! ```text
//! assets/
//! ├── GLM/        # scanned
//! ├── GPS/        # scanned
//! ├── GPT/        # scanned
//! ├── GRP/        # scanned
//! └── misc/       # ignored (not a series code)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A series that holds volumes.
///
/// Variants are declared in code order, so the derived `Ord` matches the
/// lexical ordering of [`Series::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Series {
    #[serde(rename = "GLM")]
    Glm,
    #[serde(rename = "GPS")]
    Gps,
    #[serde(rename = "GPT")]
    Gpt,
    #[serde(rename = "GRP")]
    Grp,
}

/// Umbrella imprint code. Always reported with zero volumes.
pub const UMBRELLA_CODE: &str = "PLURIPEN";

impl Series {
    /// All scanned series, in code order.
    pub const ALL: [Series; 4] = [Series::Glm, Series::Gps, Series::Gpt, Series::Grp];

    pub fn code(self) -> &'static str {
        match self {
            Series::Glm => "GLM",
            Series::Gps => "GPS",
            Series::Gpt => "GPT",
            Series::Grp => "GRP",
        }
    }

    /// Exact, case-sensitive match against a series code.
    ///
    /// Directory names on disk are matched exactly (`glm/` is not a series).
    pub fn from_code(code: &str) -> Option<Series> {
        Series::ALL.into_iter().find(|s| s.code() == code)
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
