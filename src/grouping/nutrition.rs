use regex::Regex;

/// Lines starting with any of these (case-insensitive) are table headers or
/// serving rows and always kept.
const KEEP_PREFIXES: &[&str] = &[
    "NUTRITION",
    "NUTRITIONAL",
    "SERVE",
    "SERVING",
    "PER 100",
    "PER100",
    "%RDA",
];

/// License, URL, address and batch markers that show up spatially inside
/// nutrition tables but are never nutrition rows.
const EXCLUDE_HINTS: &[&str] = &[
    "LIC.",
    "M.LIC",
    "FSSAI",
    "WWW",
    "HTTP",
    "BATCH",
    "BARCODE",
    "ADDRESS",
    "FIND US",
    "FACEBOOK",
    "SCAN",
    "APP:",
    "MKT.",
    "MANUFACTURER",
    "LICENSE",
];

/// Nutrient-name fragments matched against the letters-only uppercase form.
const NAME_HINTS: &[&str] = &[
    "ENER", "CALOR", "PROT", "CARB", "SUG", "FIB", "FAT", "SAT", "TRANS", "SOD", "SALT",
];

/// Heuristic filter deciding whether a token collected under the nutrition
/// section looks like an actual nutrition table line.
#[derive(Debug, Clone)]
pub struct NutritionFilter {
    value_unit: Regex,
}

impl NutritionFilter {
    pub fn new() -> Self {
        Self {
            value_unit: Regex::new(r"(?i)\d+(\.\d+)?\s*(kcal|kj|g|mg|mcg|%)")
                .expect("valid regex"),
        }
    }

    pub fn is_nutrition_fact(&self, text: &str) -> bool {
        let trimmed = text.trim();
        let upper = trimmed.to_uppercase();

        if KEEP_PREFIXES.iter().any(|pfx| upper.starts_with(pfx)) {
            return true;
        }
        if EXCLUDE_HINTS.iter().any(|hint| upper.contains(hint)) {
            return false;
        }
        if self.looks_like_value(trimmed) {
            return true;
        }

        let letters: String = trimmed
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_uppercase();
        NAME_HINTS.iter().any(|hint| letters.contains(hint))
    }

    /// A numeric value followed by a unit counts only when the unit is not
    /// immediately followed by another letter ("10g" yes, "10gm" no).
    fn looks_like_value(&self, text: &str) -> bool {
        self.value_unit.find_iter(text).any(|m| {
            !text[m.end()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic())
        })
    }
}

impl Default for NutritionFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_with_unit_is_kept() {
        let filter = NutritionFilter::new();
        assert!(filter.is_nutrition_fact("ENERGY 250 kcal"));
        assert!(filter.is_nutrition_fact("Sodium 120mg"));
        assert!(filter.is_nutrition_fact("45%"));
    }

    #[test]
    fn exclusion_hints_reject() {
        let filter = NutritionFilter::new();
        assert!(!filter.is_nutrition_fact("FSSAI LIC. NO 12345"));
        assert!(!filter.is_nutrition_fact("www.example.com"));
        assert!(!filter.is_nutrition_fact("BATCH NO 42"));
    }

    #[test]
    fn keep_prefixes_win_over_everything() {
        let filter = NutritionFilter::new();
        assert!(filter.is_nutrition_fact("NUTRITION INFORMATION"));
        assert!(filter.is_nutrition_fact("Per 100 g"));
        assert!(filter.is_nutrition_fact("%RDA"));
    }

    #[test]
    fn unit_glued_to_letters_is_not_a_value() {
        let filter = NutritionFilter::new();
        // "gm" is not a recognized unit; without a nutrient name the line
        // is rejected.
        assert!(!filter.is_nutrition_fact("10gm of something"));
    }

    #[test]
    fn nutrient_name_hints_keep_unitless_rows() {
        let filter = NutritionFilter::new();
        assert!(filter.is_nutrition_fact("Total Fat"));
        assert!(filter.is_nutrition_fact("of which sugars"));
        assert!(!filter.is_nutrition_fact("Made in India"));
    }
}
