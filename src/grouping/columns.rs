use std::collections::BTreeMap;

use tracing::debug;

use crate::core::model::{Section, SectionedGroups, Token};
use crate::grouping::classifier::classify_section;
use crate::grouping::GroupingConfig;

/// Scan state threaded through the single left-to-right, top-to-bottom pass
/// over the OCR-emitted token order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    NoSection,
    InSection {
        section: Section,
        x_anchor: i32,
        y_anchor: i32,
    },
}

/// Clusters tokens into per-section, per-x-coordinate column groups.
#[derive(Debug, Clone)]
pub struct ColumnGrouper {
    config: GroupingConfig,
}

impl ColumnGrouper {
    pub fn new(config: GroupingConfig) -> Self {
        Self { config }
    }

    /// Single pass over the token sequence. Tokens seen outside any section
    /// are dropped; the rest land in exactly one column of exactly one
    /// section.
    pub fn group(&self, tokens: &[Token]) -> SectionedGroups {
        let mut sections: SectionedGroups = Section::ALL
            .into_iter()
            .map(|section| (section, BTreeMap::new()))
            .collect();

        let mut state = SectionState::NoSection;
        for token in tokens {
            state = self.step(state, token, &mut sections);
        }
        sections
    }

    fn step(
        &self,
        state: SectionState,
        token: &Token,
        sections: &mut SectionedGroups,
    ) -> SectionState {
        let mut state = state;

        // A trigger always supersedes the current section, even one that has
        // not expired yet, and re-anchors at this token.
        if let Some(section) = classify_section(&token.text) {
            state = SectionState::InSection {
                section,
                x_anchor: token.bbox.x0,
                y_anchor: token.bbox.y0,
            };
        }

        let SectionState::InSection {
            section,
            x_anchor,
            y_anchor,
        } = state
        else {
            return state;
        };

        // Horizontal outlier: drop the token but keep the section open.
        if (token.bbox.x0 - x_anchor).abs() > self.config.anchor_tolerance {
            debug!(text = %token.text, x_anchor, "token outside anchor tolerance, dropped");
            return state;
        }

        // Vertical drift past the cutoff closes the section.
        if token.bbox.y0 - y_anchor > self.config.y_cutoff(section) {
            debug!(text = %token.text, section = section.as_str(), "y cutoff exceeded, section closed");
            return SectionState::NoSection;
        }

        let columns = sections.entry(section).or_default();
        let anchor = columns
            .keys()
            .copied()
            .find(|gx| (gx - token.bbox.x0).abs() <= self.config.tolerance)
            .unwrap_or(token.bbox.x0);
        columns.entry(anchor).or_default().push(token.clone());

        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::BBox;

    fn token(x: i32, y: i32, text: &str) -> Token {
        Token::new(BBox::new(x, y, x + 100, y + 20), text)
    }

    fn grouper() -> ColumnGrouper {
        ColumnGrouper::new(GroupingConfig::default())
    }

    fn section_tokens(groups: &SectionedGroups, section: Section) -> Vec<&str> {
        groups[&section]
            .values()
            .flatten()
            .map(|t| t.text.as_str())
            .collect()
    }

    #[test]
    fn tokens_before_any_trigger_are_dropped() {
        let groups = grouper().group(&[token(10, 10, "Energy 250 kcal")]);
        assert!(groups.values().all(|columns| columns.is_empty()));
    }

    #[test]
    fn trigger_token_opens_section_and_joins_it() {
        let groups = grouper().group(&[
            token(10, 10, "NUTRITION FACTS"),
            token(12, 40, "ENERGY 250kcal"),
            token(11, 70, "FAT 10g"),
        ]);
        assert_eq!(
            section_tokens(&groups, Section::Nutrition),
            vec!["NUTRITION FACTS", "ENERGY 250kcal", "FAT 10g"]
        );
    }

    #[test]
    fn columns_split_by_x_start() {
        let groups = grouper().group(&[
            token(10, 10, "NUTRITION FACTS"),
            token(10, 40, "ENERGY"),
            token(200, 40, "250kcal"),
            token(10, 70, "FAT"),
            token(201, 70, "10g"),
        ]);
        let columns = &groups[&Section::Nutrition];
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[&10].len(), 3);
        assert_eq!(columns[&200].len(), 2);
        // Every member sits within tolerance of its column anchor.
        for (anchor, members) in columns {
            for member in members {
                assert!((member.bbox.x0 - anchor).abs() <= 5);
            }
        }
    }

    #[test]
    fn anchor_mismatch_drops_token_but_keeps_section() {
        let groups = grouper().group(&[
            token(10, 10, "NUTRITION FACTS"),
            token(600, 40, "FSSAI LIC 12345"),
            token(12, 70, "FAT 10g"),
        ]);
        assert_eq!(
            section_tokens(&groups, Section::Nutrition),
            vec!["NUTRITION FACTS", "FAT 10g"]
        );
    }

    #[test]
    fn y_cutoff_closes_section() {
        let groups = grouper().group(&[
            token(10, 10, "NET QTY"),
            token(10, 40, "200g"),
            token(10, 500, "far below"),
            token(10, 520, "still outside"),
        ]);
        assert_eq!(section_tokens(&groups, Section::Qty), vec!["NET QTY", "200g"]);
    }

    #[test]
    fn nutrition_allows_taller_tables() {
        let groups = grouper().group(&[
            token(10, 10, "NUTRITION FACTS"),
            token(10, 1500, "PROTEIN 5g"),
            token(10, 2300, "past even the tall cutoff"),
        ]);
        assert_eq!(
            section_tokens(&groups, Section::Nutrition),
            vec!["NUTRITION FACTS", "PROTEIN 5g"]
        );
    }

    #[test]
    fn new_trigger_supersedes_active_section() {
        // Re-trigger behavior: the switch happens immediately, before the
        // previous section expires, and re-anchors on the new token.
        let groups = grouper().group(&[
            token(10, 10, "INGREDIENTS"),
            token(10, 30, "Water, Sugar"),
            token(400, 60, "MRP Rs. 50"),
            token(402, 80, "incl. of all taxes"),
        ]);
        assert_eq!(
            section_tokens(&groups, Section::Ingredients),
            vec!["INGREDIENTS", "Water, Sugar"]
        );
        assert_eq!(
            section_tokens(&groups, Section::Mrp),
            vec!["MRP Rs. 50", "incl. of all taxes"]
        );
    }

    #[test]
    fn first_seen_anchor_wins_no_rebalancing() {
        let groups = grouper().group(&[
            token(10, 10, "NET QTY"),
            token(14, 30, "200g"),
            token(18, 50, "net"),
        ]);
        let columns = &groups[&Section::Qty];
        // 14 joins the column anchored at 10; 18 is outside that anchor's
        // tolerance and opens its own column, which is never merged back.
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[&10].len(), 2);
        assert_eq!(columns[&18].len(), 1);
    }
}
