pub mod classifier;
pub mod columns;
pub mod nutrition;

use serde::{Deserialize, Serialize};

use crate::core::model::{Section, SectionedGroups, Token};

pub use classifier::classify_section;
pub use columns::{ColumnGrouper, SectionState};
pub use nutrition::NutritionFilter;

/// Empirical thresholds of the spatial grouper, tunable per rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Allowed difference between a token's x start and a column anchor.
    pub tolerance: i32,
    /// Allowed difference between a token's x start and the section anchor.
    pub anchor_tolerance: i32,
    /// Vertical reach of the nutrition section; tables are tall.
    pub nutrition_y_cutoff: i32,
    /// Vertical reach of every other section.
    pub default_y_cutoff: i32,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            tolerance: 5,
            anchor_tolerance: 500,
            nutrition_y_cutoff: 2000,
            default_y_cutoff: 200,
        }
    }
}

impl GroupingConfig {
    pub fn y_cutoff(&self, section: Section) -> i32 {
        match section {
            Section::Nutrition => self.nutrition_y_cutoff,
            _ => self.default_y_cutoff,
        }
    }
}

/// Spatial grouping result: the full sectioned groups plus the diagnostic
/// subset of nutrition tokens that pass the content filter. The filter
/// never removes tokens from the groups themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingOutcome {
    pub sections: SectionedGroups,
    pub validated_nutrition: Vec<Token>,
}

/// Runs the column grouper over the token sequence and attaches the
/// validated nutrition subset.
pub fn group_sections(tokens: &[Token], config: &GroupingConfig) -> GroupingOutcome {
    let sections = ColumnGrouper::new(config.clone()).group(tokens);

    let filter = NutritionFilter::new();
    let validated_nutrition = sections
        .get(&Section::Nutrition)
        .map(|columns| {
            columns
                .values()
                .flatten()
                .filter(|token| filter.is_nutrition_fact(&token.text))
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    GroupingOutcome {
        sections,
        validated_nutrition,
    }
}
