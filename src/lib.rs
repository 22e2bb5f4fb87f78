//! Decoder for the machine-readable text payload of AAMVA-compliant
//! driver's-license and ID-card barcodes (PDF417 content, presented as raw
//! text or base64).
//!
//! The pipeline runs header parsing, subfile directory and payload
//! extraction, element-to-field mapping with jurisdiction overrides, and a
//! value-conversion chain (trimming, date normalization, sex-code
//! normalization), producing a flat record of normalized fields plus a
//! nested `localFields` map for jurisdiction-local subfiles.
//!
//! Decoding is tolerant by design: a partially non-conformant credential
//! yields as much correct data as possible instead of an error. This crate
//! does not validate checksums, verify signatures, or render/scan PDF417
//! symbols.
//!
//! ```
//! use aamva_decoder::{parse_raw, ParseOptions};
//!
//! let doc = "@\n\x1e\nANSI 636010090001DL00310018DLDCSSAMPLE\nDBC1\n\n";
//! let result = parse_raw(doc, ParseOptions::default());
//! assert_eq!(result.data.fields["familyName"], "SAMPLE");
//! assert_eq!(result.data.fields["sex"], "M");
//! ```

pub mod converters;
pub mod fields;
pub mod header;
pub mod parse;
pub mod subfile;

mod text;

pub use converters::Converter;
pub use fields::{resolve, FieldDefinition, FIELD_DEFINITIONS};
pub use header::Header;
pub use parse::{
    is_local_type, parse_base64, parse_raw, DecodeError, DocumentData, ParseOptions, ParseResult,
};
pub use subfile::{extract_subfiles, Element, Subfile, SubfileDesignator};
