//! Static field map: data element id → output field name + converter chain.
//!
//! Definitions may be scoped to a single issuing jurisdiction; the same
//! 3-character id can mean different things on different credentials.
//! Resolution prefers a jurisdiction-scoped definition and falls back to the
//! unscoped one, so scoped rows act as overrides rather than additions.
//!
//! Element ids and default names follow the AAMVA DL/ID Card Design Standard:
//! <https://www.aamva.org/assets/best-practices,-guides,-standards,-manuals,-whitepapers/aamva-dl-id-card-design-standard-(2020)>

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::converters::Converter;

/// One row of the field map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefinition {
    /// 3-character data element id.
    pub id: &'static str,
    /// Output field key.
    pub name: &'static str,
    /// Converters folded left-to-right over the raw value.
    pub converters: &'static [Converter],
    /// Restricts the definition to one issuing jurisdiction. `None` is the
    /// catch-all.
    pub jurisdiction: Option<&'static str>,
}

macro_rules! field_definitions {
    ($($id:literal => $name:literal [$($conv:ident),*] $(@ $state:literal)?),* $(,)?) => {
        pub const FIELD_DEFINITIONS: &[FieldDefinition] = &[
            $(FieldDefinition {
                id: $id,
                name: $name,
                converters: &[$(Converter::$conv),*],
                jurisdiction: field_definitions!(@scope $($state)?),
            }),*
        ];
    };
    (@scope $state:literal) => { Some($state) };
    (@scope) => { None };
}

field_definitions! {
    // DL/ID mandatory elements (2000-series revisions).
    "DCA" => "vehicleClass" [Clean],
    "DCB" => "restrictionCodes" [Clean],
    "DCD" => "endorsementCodes" [Clean],
    "DBA" => "expirationDate" [Clean, Date],
    "DCS" => "familyName" [Clean],
    "DAC" => "firstName" [Clean],
    "DAD" => "middleName" [Clean],
    "DBD" => "issueDate" [Clean, Date],
    "DBB" => "dateOfBirth" [Clean, Date],
    "DBC" => "sex" [Clean, SexCode],
    "DAY" => "eyeColor" [Clean],
    "DAU" => "height" [Clean],
    "DAG" => "address" [Clean],
    "DAH" => "addressLine2" [Clean],
    "DAI" => "city" [Clean],
    "DAJ" => "state" [Clean],
    "DAK" => "zip" [Clean],
    "DAQ" => "idNumber" [Clean],
    "DCF" => "discriminator" [Clean],
    "DCG" => "country" [Clean],
    "DDE" => "familyNameTruncation" [Clean],
    "DDF" => "firstNameTruncation" [Clean],
    "DDG" => "middleNameTruncation" [Clean],

    // Optional elements.
    "DAZ" => "hairColor" [Clean],
    "DAW" => "weight" [Clean],
    "DCE" => "weightRange" [Clean],
    "DCI" => "placeOfBirth" [Clean],
    "DCJ" => "auditInformation" [Clean],
    "DCK" => "inventoryControlNumber" [Clean],
    "DCL" => "raceEthnicity" [Clean],
    "DCU" => "nameSuffix" [Clean],
    "DBN" => "otherFamilyName" [Clean],
    "DBG" => "otherFirstName" [Clean],
    "DBS" => "otherSuffixName" [Clean],
    "DDA" => "complianceType" [Clean],
    "DDB" => "cardRevisionDate" [Clean, Date],
    "DDC" => "hazmatExpirationDate" [Clean, Date],
    "DDD" => "limitedDurationDocument" [Clean],
    "DDH" => "under18Until" [Clean, Date],
    "DDI" => "under19Until" [Clean, Date],
    "DDJ" => "under21Until" [Clean, Date],
    "DDK" => "organDonor" [Clean],
    "DDL" => "veteran" [Clean],

    // Florida `ZF` jurisdiction subfile.
    "ZFA" => "specialRestrictions" [Clean],
    "ZFC" => "safeDriverIndicator" [Clean],
    "ZFD" => "sexualPredator" [Clean],
    "ZFE" => "sexOffenderStatute" [Clean],
    "ZFF" => "insulinDependent" [Clean],
    "ZFG" => "developmentalDisability" [Clean],
    "ZFH" => "hearingImpaired" [Clean],
    "ZFI" => "fishAndWildlifeDesignations" [Clean],
    "ZFJ" => "customerNumber" [Clean],

    // Jurisdiction-scoped overrides and locals.
    "DAK" => "postalCode" [Clean] @ "ON",
    "ZNA" => "county" [Clean] @ "NY",
}

lazy_static! {
    static ref FIELD_INDEX: HashMap<&'static str, Vec<&'static FieldDefinition>> = {
        let mut index: HashMap<&'static str, Vec<&'static FieldDefinition>> = HashMap::new();
        for definition in FIELD_DEFINITIONS {
            index.entry(definition.id).or_default().push(definition);
        }
        index
    };

    /// Issuer identification numbers of well-known jurisdictions, used as a
    /// fallback when the document carries no state/province element.
    /// Abbreviated; the full registry is published by AAMVA.
    static ref IIN_JURISDICTIONS: HashMap<&'static str, &'static str> = HashMap::from([
        ("636000", "VA"),
        ("636001", "NY"),
        ("636010", "FL"),
        ("636012", "ON"),
        ("636014", "CA"),
        ("636015", "TX"),
        ("636026", "AZ"),
    ]);
}

/// Looks up the definition for `id`, preferring one scoped to `jurisdiction`
/// and falling back to the unscoped catch-all. Unknown ids resolve to `None`
/// and are dropped from output by the assembler.
pub fn resolve(id: &str, jurisdiction: Option<&str>) -> Option<&'static FieldDefinition> {
    let candidates = FIELD_INDEX.get(id)?;

    if let Some(jurisdiction) = jurisdiction {
        if let Some(definition) = candidates
            .iter()
            .find(|d| d.jurisdiction == Some(jurisdiction))
            .copied()
        {
            return Some(definition);
        }
    }

    candidates
        .iter()
        .find(|d| d.jurisdiction.is_none())
        .copied()
}

/// Maps an issuer identification number to its jurisdiction code, when known.
pub fn jurisdiction_for_iin(iin: &str) -> Option<&'static str> {
    IIN_JURISDICTIONS.get(iin).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_the_core_elements() {
        for id in ["DBA", "DBB", "DBC", "DCS", "DAC"] {
            assert!(resolve(id, None).is_some(), "missing definition for {id}");
        }
    }

    #[test]
    fn date_fields_chain_clean_then_date() {
        let dba = resolve("DBA", None).unwrap();
        assert_eq!(dba.name, "expirationDate");
        assert_eq!(dba.converters, &[Converter::Clean, Converter::Date]);
    }

    #[test]
    fn sex_field_chains_clean_then_sex_code() {
        let dbc = resolve("DBC", None).unwrap();
        assert_eq!(dbc.name, "sex");
        assert_eq!(dbc.converters, &[Converter::Clean, Converter::SexCode]);
    }

    #[test]
    fn scoped_definition_wins_for_its_jurisdiction() {
        assert_eq!(resolve("DAK", Some("ON")).unwrap().name, "postalCode");
        assert_eq!(resolve("DAK", Some("FL")).unwrap().name, "zip");
        assert_eq!(resolve("DAK", None).unwrap().name, "zip");
    }

    #[test]
    fn scoped_only_ids_do_not_leak_across_jurisdictions() {
        assert_eq!(resolve("ZNA", Some("NY")).unwrap().name, "county");
        assert_eq!(resolve("ZNA", Some("FL")), None);
        assert_eq!(resolve("ZNA", None), None);
    }

    #[test]
    fn unknown_ids_resolve_to_none() {
        assert_eq!(resolve("XXX", None), None);
        assert_eq!(resolve("XXX", Some("FL")), None);
    }

    #[test]
    fn florida_local_fields_are_mapped() {
        assert_eq!(resolve("ZFC", None).unwrap().name, "safeDriverIndicator");
        assert_eq!(resolve("ZFJ", None).unwrap().name, "customerNumber");
    }

    #[test]
    fn iin_fallback_knows_well_known_issuers() {
        assert_eq!(jurisdiction_for_iin("636010"), Some("FL"));
        assert_eq!(jurisdiction_for_iin("636012"), Some("ON"));
        assert_eq!(jurisdiction_for_iin("999999"), None);
    }

    #[test]
    fn at_most_one_definition_matches_a_context() {
        // For every (id, jurisdiction) pair in the table, the scoped and
        // default rows must not collide.
        for definition in FIELD_DEFINITIONS {
            let same_scope = FIELD_DEFINITIONS
                .iter()
                .filter(|d| d.id == definition.id && d.jurisdiction == definition.jurisdiction)
                .count();
            assert_eq!(same_scope, 1, "duplicate definition for {}", definition.id);
        }
    }
}
