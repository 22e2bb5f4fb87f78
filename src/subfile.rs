//! Subfile directory and payload extraction.
//!
//! The directory sits right after the header: one fixed-width record per
//! subfile, each naming a 2-character type, a 4-digit absolute offset and a
//! 4-digit length. Payloads are sliced straight out of the document text and
//! split on the header's element separator.

use serde::Serialize;

use crate::{
    header::Header,
    text::{clamped, lenient_uint},
};

/// Separator used when the header failed to yield one.
const DEFAULT_ELEMENT_SEPARATOR: char = '\n';

/// Width of one directory record: 2-char type + 4-digit offset + 4-digit
/// length.
const SUBFILE_DESIGNATOR_SIZE: usize = 10;

/// One subfile directory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubfileDesignator {
    #[serde(rename = "type")]
    pub kind: String,
    pub offset: usize,
    pub length: usize,
}

impl SubfileDesignator {
    fn parse(record: &str) -> Self {
        Self {
            kind: clamped(record, 0, 2).to_owned(),
            offset: lenient_uint(clamped(record, 2, 6)),
            length: lenient_uint(clamped(record, 6, 10)),
        }
    }
}

/// A raw `(id, value)` pair, one per payload line. The id is the line's
/// first three characters, the value everything after them, pre-trim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub id: String,
    pub value: String,
}

/// A named section of the document payload with its raw elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subfile {
    #[serde(rename = "type")]
    pub kind: String,
    pub offset: usize,
    pub length: usize,
    pub data: Vec<Element>,
}

/// Reads `header.number_of_entries` directory records and slices each
/// subfile payload out of `text`.
pub fn extract_subfiles(text: &str, header: &Header) -> Vec<Subfile> {
    let separator = header.separator.unwrap_or(DEFAULT_ELEMENT_SEPARATOR);
    let count = header.number_of_entries as usize;

    (0..count)
        .map(|i| {
            let start = Header::DIRECTORY_OFFSET + SUBFILE_DESIGNATOR_SIZE * i;
            let designator =
                SubfileDesignator::parse(clamped(text, start, start + SUBFILE_DESIGNATOR_SIZE));
            read_subfile(text, designator, separator)
        })
        .collect()
}

fn read_subfile(text: &str, designator: SubfileDesignator, separator: char) -> Subfile {
    let payload = clamped(text, designator.offset, designator.offset + designator.length);

    // Payloads embed their own 2-character type marker ahead of the first
    // element. When it disagrees with the directory record and looks like a
    // real marker, the embedded one is authoritative; scanners misalign
    // directory offsets far more often than they corrupt payloads.
    let marker = clamped(payload, 0, 2);
    let kind = if !marker.is_empty()
        && marker != designator.kind
        && marker.bytes().all(|b| b.is_ascii_uppercase())
    {
        marker.to_owned()
    } else {
        designator.kind.clone()
    };

    let body = match payload.strip_prefix(kind.as_str()) {
        Some(rest) if !kind.is_empty() => rest,
        _ => payload,
    };

    let data = body
        .split(separator)
        .filter_map(|line| {
            let id = line.get(..3)?;
            Some(Element {
                id: id.to_owned(),
                value: line.get(3..).unwrap_or("").to_owned(),
            })
        })
        .collect();

    Subfile {
        kind,
        offset: designator.offset,
        length: designator.length,
        data,
    }
}
