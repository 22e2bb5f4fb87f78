//! AAMVA document header.
//!
//! The preamble of a DL/ID barcode payload has a fixed layout:
//!
//! ```text
//! @    \n   \x1e  \r   ANSI ______ __ __ __
//! 0    1    2     3    4..9 9..15  15 17 19
//! cmpl sep  rsep  term file iin    v  jv  n
//! ```
//!
//! See the AAMVA DL/ID Card Design Standard:
//! <https://www.aamva.org/assets/best-practices,-guides,-standards,-manuals,-whitepapers/aamva-dl-id-card-design-standard-(2020)>

use serde::Serialize;

use crate::text::{clamped, lenient_uint};

/// Parsed document header.
///
/// Parsing is tolerant: a token that cannot be sliced from a short input is
/// left empty (strings, separators) or zero (integers) and parsing carries
/// on, so minor jurisdiction deviations still yield a usable result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// Character delimiting data elements within a subfile.
    pub separator: Option<char>,
    /// Character ending the whole document.
    pub terminator: Option<char>,
    /// `ANSI` for 2000-series documents, `AAMVA` for older ones.
    pub file_type: String,
    /// Issuer identification number, a 6-digit string naming the issuing
    /// jurisdiction (e.g. `636010` for Florida).
    pub iin: String,
    /// AAMVA specification revision.
    pub version: u8,
    /// The jurisdiction's own revision of the specification.
    pub jurisdiction_version: u8,
    /// Number of subfile directory entries.
    pub number_of_entries: u8,
}

impl Header {
    /// Byte offset of the first subfile directory record. The `ANSI ` and
    /// `AAMVA` file-type literals both occupy five bytes, so the directory
    /// position does not move between revisions.
    pub const DIRECTORY_OFFSET: usize = 21;

    /// Compliance indicator expected at index 0. Its absence does not stop
    /// parsing, only conformance checks care.
    pub const COMPLIANCE_INDICATOR: char = '@';

    pub fn parse(text: &str) -> Self {
        Self {
            separator: clamped(text, 1, 2).chars().next(),
            terminator: clamped(text, 3, 4).chars().next(),
            file_type: clamped(text, 4, 9).trim().to_owned(),
            iin: clamped(text, 9, 15).to_owned(),
            version: lenient_uint(clamped(text, 15, 17)) as u8,
            jurisdiction_version: lenient_uint(clamped(text, 17, 19)) as u8,
            number_of_entries: lenient_uint(clamped(text, 19, 21)) as u8,
        }
    }

    pub fn is_compliant(&self, text: &str) -> bool {
        text.starts_with(Self::COMPLIANCE_INDICATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ansi_preamble() {
        let header = Header::parse("@\n\x1e\nANSI 636010090002DL00410249");

        assert_eq!(header.separator, Some('\n'));
        assert_eq!(header.terminator, Some('\n'));
        assert_eq!(header.file_type, "ANSI");
        assert_eq!(header.iin, "636010");
        assert_eq!(header.version, 9);
        assert_eq!(header.jurisdiction_version, 0);
        assert_eq!(header.number_of_entries, 2);
    }

    #[test]
    fn parses_legacy_aamva_preamble() {
        let header = Header::parse("@\n\x1e\rAAMVA636000010101DL00310100");

        assert_eq!(header.file_type, "AAMVA");
        assert_eq!(header.iin, "636000");
        assert_eq!(header.version, 1);
        assert_eq!(header.jurisdiction_version, 1);
        assert_eq!(header.number_of_entries, 1);
    }

    #[test]
    fn short_input_leaves_remaining_fields_empty() {
        let header = Header::parse("@\n\x1e\nANSI 6360");

        assert_eq!(header.separator, Some('\n'));
        assert_eq!(header.file_type, "ANSI");
        assert_eq!(header.iin, "6360");
        assert_eq!(header.version, 0);
        assert_eq!(header.jurisdiction_version, 0);
        assert_eq!(header.number_of_entries, 0);
    }

    #[test]
    fn empty_input_yields_empty_header() {
        let header = Header::parse("");

        assert_eq!(header.separator, None);
        assert_eq!(header.terminator, None);
        assert_eq!(header.file_type, "");
        assert_eq!(header.iin, "");
        assert_eq!(header.number_of_entries, 0);
    }

    #[test]
    fn compliance_indicator_is_checked_not_enforced() {
        let header = Header::parse("#\n\x1e\nANSI 636010090002");
        assert!(!header.is_compliant("#\n\x1e\nANSI 636010090002"));
        assert_eq!(header.iin, "636010");
    }
}
