use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::fields::FieldRecord;
use crate::core::geometry::BBox;

/// One OCR-recognized text span with its bounding box.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    pub bbox: BBox,
    pub text: String,
}

impl Token {
    pub fn new(bbox: BBox, text: impl Into<String>) -> Self {
        Self {
            bbox,
            text: text.into(),
        }
    }
}

/// Semantic label for a region of the product label.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Nutrition,
    Ingredients,
    Allergen,
    Mrp,
    Mfd,
    Qty,
}

impl Section {
    /// All sections in match priority order.
    pub const ALL: [Section; 6] = [
        Section::Nutrition,
        Section::Ingredients,
        Section::Allergen,
        Section::Mrp,
        Section::Mfd,
        Section::Qty,
    ];

    /// Case-sensitive trigger substrings bound to this section.
    pub fn triggers(self) -> &'static [&'static str] {
        match self {
            Section::Nutrition => &[
                "NUTRITION",
                "NUTRITIONAL INFORMATION",
                "NUTRITION FACTS",
                "NUTRITIONAL INFO",
                "NUTRITIONAL FACTS",
            ],
            Section::Ingredients => &["INGREDIENTS", "CONTAINS"],
            Section::Allergen => &["ALLERGEN"],
            Section::Mrp => &[
                "MRP",
                "MAX RETAIL PRICE",
                "UNIT SALE PRICE",
                "UNIT PRICE",
                "PRICE",
                "COST",
                "COST PRICE",
            ],
            Section::Mfd => &[
                "MFD",
                "USE BY",
                "BEST BEFORE",
                "EXPIRY",
                "EXPIRY DATE",
                "MANUFACTURED",
                "MANUFACTURING DATE",
            ],
            Section::Qty => &["QTY", "NET WEIGHT", "NET QTY", "WEIGHT", "VOLUME"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Nutrition => "nutrition",
            Section::Ingredients => "ingredients",
            Section::Allergen => "allergen",
            Section::Mrp => "mrp",
            Section::Mfd => "mfd",
            Section::Qty => "qty",
        }
    }
}

/// Tokens within a section sharing an approximate horizontal start
/// coordinate, keyed by the anchor x of the first token assigned.
pub type ColumnGroups = BTreeMap<i32, Vec<Token>>;

/// Section -> anchor-x -> column of tokens. Output of spatial grouping.
pub type SectionedGroups = BTreeMap<Section, ColumnGroups>;

/// A [`FieldRecord`] after the merge overrides have been applied; the
/// terminal artifact of the extraction core.
pub type MergedRecord = FieldRecord;
