//! Mapper/assembler and the two public entry points.
//!
//! Raw elements from every subfile are resolved against the field map,
//! pushed through their converter chains and assembled into a flat record,
//! with jurisdiction-local subfiles nested under `localFields`.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};

use crate::{
    fields,
    header::Header,
    subfile::{extract_subfiles, Subfile},
};

/// Value replaced by the empty string under [`ParseOptions::clear_none_value`].
const NONE_VALUE: &str = "NONE";

/// Element id carrying the issuing state/province code.
const STATE_ELEMENT_ID: &str = "DAJ";

/// Post-processing options. All default to off.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseOptions {
    /// Replace exact-match `NONE` values with the empty string, after
    /// conversion and before emptiness filtering.
    pub clear_none_value: bool,
    /// Drop empty-string fields from the record and from `localFields`.
    pub remove_empty_fields: bool,
}

/// Assembled output record: normalized fields keyed by name, with
/// jurisdiction-local subfile data nested separately.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentData {
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
    pub local_fields: BTreeMap<String, String>,
}

/// Full result of one decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub header: Header,
    pub subfiles: Vec<Subfile>,
    pub data: DocumentData,
    /// Type code of the primary document subfile (`DL` or `ID`).
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),

    #[error("decoded document is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// True for jurisdiction-local subfile types (conventionally `Z`-prefixed),
/// whose fields land under `localFields` instead of the top-level record.
pub fn is_local_type(code: &str) -> bool {
    !matches!(code, "DL" | "ID")
}

/// Decodes an AAMVA document presented as raw text.
///
/// Decoding is best-effort and never fails: malformed regions contribute
/// empty or partial fields rather than aborting the parse.
pub fn parse_raw(text: &str, options: ParseOptions) -> ParseResult {
    let header = Header::parse(text);
    let subfiles = extract_subfiles(text, &header);
    let jurisdiction = jurisdiction_context(&header, &subfiles);

    let mut data = DocumentData::default();
    for subfile in &subfiles {
        let destination = if is_local_type(&subfile.kind) {
            &mut data.local_fields
        } else {
            &mut data.fields
        };

        for element in &subfile.data {
            let Some(definition) = fields::resolve(&element.id, jurisdiction.as_deref()) else {
                continue;
            };

            let mut value = Some(element.value.clone());
            for converter in definition.converters {
                value = converter.apply(value.as_deref());
            }

            let mut value = value.unwrap_or_default();
            if options.clear_none_value && value == NONE_VALUE {
                value.clear();
            }

            destination.insert(definition.name.to_owned(), value);
        }
    }

    if options.remove_empty_fields {
        data.fields.retain(|_, value| !value.is_empty());
        data.local_fields.retain(|_, value| !value.is_empty());
    }

    let kind = subfiles
        .iter()
        .find(|s| !is_local_type(&s.kind))
        .or_else(|| subfiles.first())
        .map(|s| s.kind.clone())
        .unwrap_or_default();

    ParseResult {
        header,
        subfiles,
        data,
        kind,
    }
}

/// Decodes a standard-base64 AAMVA document, then behaves like [`parse_raw`].
///
/// Invalid base64 (or a non-UTF-8 payload) is an encoding contract violation
/// rather than a format conformance issue, and is the one hard failure.
pub fn parse_base64(text: &str, options: ParseOptions) -> Result<ParseResult, DecodeError> {
    let bytes = BASE64.decode(text)?;
    let decoded = String::from_utf8(bytes)?;
    Ok(parse_raw(&decoded, options))
}

/// Jurisdiction context for field resolution: the document's own
/// state/province element when present, otherwise the issuer identification
/// number looked up against the known-IIN table.
fn jurisdiction_context(header: &Header, subfiles: &[Subfile]) -> Option<String> {
    for subfile in subfiles {
        for element in &subfile.data {
            if element.id == STATE_ELEMENT_ID {
                let state = element.value.trim();
                if !state.is_empty() {
                    return Some(state.to_owned());
                }
            }
        }
    }

    fields::jurisdiction_for_iin(&header.iin).map(str::to_owned)
}
