use std::collections::BTreeMap;

use tracing::debug;

use crate::core::fields::FieldRecord;
use crate::core::model::{MergedRecord, Section, SectionedGroups};

/// Which field each spatial section feeds. Section-derived text replaces
/// whatever the lexical passes produced for that field.
pub const SECTION_FIELD_MAP: &[(Section, &str)] = &[
    (Section::Nutrition, "Nutritional Facts"),
    (Section::Ingredients, "Ingredients"),
    (Section::Allergen, "Warnings"),
    (Section::Mrp, "Price"),
    (Section::Mfd, "Date of Manufacturing"),
    (Section::Qty, "Weight"),
];

/// External key/value record overlaid onto the merged result; keys are
/// field display names.
pub type ExternalRecord = BTreeMap<String, String>;

/// First merge pass: concatenated section text overwrites the mapped field
/// whenever the section has any grouped tokens. Columns are treated as an
/// unordered bag.
pub fn apply_section_overrides(
    record: &FieldRecord,
    sections: &SectionedGroups,
) -> MergedRecord {
    let mut merged = record.clone();
    for (section, field) in SECTION_FIELD_MAP {
        let Some(columns) = sections.get(section) else {
            continue;
        };
        if columns.is_empty() {
            continue;
        }
        let text = columns
            .values()
            .flatten()
            .map(|token| token.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();
        merged.set(field, text);
    }
    merged
}

/// Second merge pass: external record values win over everything, trimmed
/// but otherwise verbatim. Keys matching no field are ignored.
pub fn apply_external_overrides(
    record: &FieldRecord,
    external: &ExternalRecord,
) -> MergedRecord {
    let mut merged = record.clone();
    for (key, value) in external {
        if !merged.set(key.trim(), value.trim().to_string()) {
            debug!(key = %key, "external record key matches no field, ignored");
        }
    }
    merged
}
