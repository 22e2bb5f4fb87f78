//! Value converters applied to raw data element values.
//!
//! Converters are pure functions chained left-to-right by the field map
//! (see [`crate::fields`]). They accept `Option<&str>` so that an absent
//! value passes through every chain untouched.

use serde::{Deserialize, Serialize};

use crate::text::clamped;

/// A named converter, referenced by [`crate::fields::FieldDefinition`]
/// converter chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Converter {
    Clean,
    Date,
    SexCode,
}

impl Converter {
    pub fn apply(self, value: Option<&str>) -> Option<String> {
        match self {
            Self::Clean => clean(value),
            Self::Date => date(value),
            Self::SexCode => sex_code(value),
        }
    }
}

/// Removes trailing whitespace, then at most one trailing comma.
///
/// The two steps are not re-run after one another: whitespace sitting before
/// a removed comma stays in the result (`"X   ," -> "X   "`).
pub fn clean(value: Option<&str>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim_end();
    Some(trimmed.strip_suffix(',').unwrap_or(trimmed).to_owned())
}

/// Normalizes an AAMVA date to `YYYY-MM-DD`.
///
/// Non-digit characters are stripped first. An empty or all-zero result maps
/// to the empty string (jurisdictions encode "no date" as `00000000`). The
/// leading two digits pick the layout: below 13 the value is read as
/// MMDDYYYY, otherwise as YYYYMMDD. The YYYYMMDD branch slices positions
/// `[0:4]`, `[4:6]` and `[6:8]` verbatim with no calendar validation, so a
/// malformed input such as `13012024` yields `1301-20-24`. That lenient
/// slicing is long-standing decoder behavior that downstream consumers
/// depend on; do not "fix" it here.
pub fn date(value: Option<&str>) -> Option<String> {
    let value = value?;
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() || digits.bytes().all(|b| b == b'0') {
        return Some(String::new());
    }

    let start: u32 = clamped(&digits, 0, 2).parse().unwrap_or(0);
    let (year, month, day) = if start < 13 {
        (
            clamped(&digits, 4, 8),
            clamped(&digits, 0, 2),
            clamped(&digits, 2, 4),
        )
    } else {
        (
            clamped(&digits, 0, 4),
            clamped(&digits, 4, 6),
            clamped(&digits, 6, 8),
        )
    };

    Some(format!("{year}-{month}-{day}"))
}

/// Maps an AAMVA sex code to `M`, `F` or `NS`.
///
/// Only the first character is considered; unknown codes pass through as
/// that first character so jurisdiction extensions (e.g. `X`) survive.
pub fn sex_code(value: Option<&str>) -> Option<String> {
    let value = value?;
    Some(match value.chars().next() {
        Some('1') => "M".to_owned(),
        Some('2') => "F".to_owned(),
        Some('9') => "NS".to_owned(),
        Some(other) => other.to_string(),
        None => String::new(),
    })
}
