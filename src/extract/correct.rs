use std::collections::HashSet;

use crate::extract::similarity::ratio;

/// Brand/label terms the spell pass prefers when a word is close enough.
pub const DOMAIN_VOCABULARY: &[&str] = &[
    "Title",
    "Description",
    "Brand",
    "Ingredients",
    "Instructions",
    "Nutritional",
    "Facts",
    "Barcode",
    "GS1",
    "EAN",
    "Weight",
    "Height",
    "Width",
    "Volume",
    "COO",
    "UNSPSC",
    "Expiry",
    "Manufacturing",
    "Category",
    "Sub-category",
    "MRP",
    "Price",
    "MFD",
    "Best Before",
    "Use By",
];

/// Words considered already correct. Common English plus the vocabulary of
/// packaged-goods labels; lowercase.
const BASE_DICTIONARY: &[&str] = &[
    "a", "about", "added", "additives", "advice", "all", "allergen", "allergens", "allergy",
    "amount", "and", "approx", "artificial", "as", "at", "average", "baking", "barcode", "batch",
    "be", "before", "best", "brand", "by", "calcium", "calories", "care", "carbohydrate",
    "carbohydrates", "category", "caution", "cholesterol", "cocoa", "code", "cold", "color",
    "colour", "consume", "contact", "contains", "content", "contents", "cook", "cool", "corn",
    "country", "customer", "daily", "date", "description", "dietary", "direct", "directions",
    "dry", "edible", "email", "energy", "estimated", "expiry", "extra", "facts", "fat", "fats",
    "fatty", "fiber", "fibre", "flavor", "flavour", "flour", "food", "for", "free", "fresh",
    "from", "fruit", "glucose", "gluten", "grams", "green", "gross", "heat", "height", "helpline",
    "hot", "in", "included", "inclusive", "industry", "information", "ingredients",
    "instructions", "iron", "is", "keep", "kept", "label", "lactose", "licence", "license",
    "light", "liquid", "litre", "low", "made", "manufactured", "manufacturer", "manufacturing",
    "marketed", "max", "maximum", "may", "milk", "mineral", "minerals", "moisture", "natural",
    "nature", "net", "no", "not", "number", "nutrient", "nutrients", "nutrition", "nutritional",
    "of", "oil", "on", "or", "organic", "origin", "other", "pack", "package", "packed", "palm",
    "per", "phone", "place", "plastic", "please", "potassium", "powder", "premium",
    "preservative", "preservatives", "price", "product", "protein", "quality", "quantity",
    "recyclable", "refined", "refrigerate", "retail", "rice", "roasted", "salt", "saturated",
    "serve", "serving", "servings", "size", "sodium", "soy", "soya", "starch", "storage",
    "store", "sugar", "sugars", "sunflower", "taste", "than", "the", "this", "to", "total",
    "trans", "type", "unit", "unsaturated", "use", "value", "values", "vegetable", "vegetarian",
    "vitamin", "vitamins", "volume", "warning", "warnings", "water", "weight", "wheat", "when",
    "width", "with", "zero", "zinc",
];

/// Digit glyphs the OCR engine commonly confuses with letters.
const CONFUSED_GLYPHS: &[(char, char)] = &[
    ('0', 'o'),
    ('1', 'l'),
    ('2', 'z'),
    ('5', 's'),
    ('6', 'g'),
    ('8', 'b'),
];

/// Spell/fuzzy corrector for cleaned OCR text. Dictionary words pass
/// through untouched; unknown words are matched fuzzily against the domain
/// vocabulary, then run through a glyph-confusion repair, and kept as-is
/// when neither applies.
#[derive(Debug, Clone)]
pub struct Corrector {
    dictionary: HashSet<String>,
    fuzzy_accept: f64,
}

impl Corrector {
    pub fn new(fuzzy_accept: f64) -> Self {
        let mut dictionary: HashSet<String> =
            BASE_DICTIONARY.iter().map(|w| w.to_lowercase()).collect();
        // Vocabulary entries (and each word of the multi-word ones) count as
        // known, so corrected output survives a second pass unchanged.
        for entry in DOMAIN_VOCABULARY {
            for word in entry.split_whitespace() {
                dictionary.insert(word.to_lowercase());
            }
        }
        Self {
            dictionary,
            fuzzy_accept,
        }
    }

    pub fn correct_text(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|word| self.correct_word(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn correct_word(&self, word: &str) -> String {
        if self.dictionary.contains(&word.to_lowercase()) {
            return word.to_string();
        }
        if let Some(hit) = self.fuzzy_vocabulary(word) {
            return hit;
        }
        self.glyph_repair(word)
            .unwrap_or_else(|| word.to_string())
    }

    fn fuzzy_vocabulary(&self, word: &str) -> Option<String> {
        let lower = word.to_lowercase();
        let mut best: Option<(f64, &str)> = None;
        for entry in DOMAIN_VOCABULARY {
            let score = ratio(&lower, &entry.to_lowercase());
            if best.is_none_or(|(b, _)| score > b) {
                best = Some((score, entry));
            }
        }
        best.filter(|(score, _)| *score > self.fuzzy_accept)
            .map(|(_, entry)| entry.to_string())
    }

    /// Remaps confused digit glyphs and accepts the repair only when it
    /// lands in the dictionary. Words without letters are left alone so
    /// numbers and dates survive.
    fn glyph_repair(&self, word: &str) -> Option<String> {
        if !word.chars().any(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        let repaired: String = word
            .to_lowercase()
            .chars()
            .map(|c| {
                CONFUSED_GLYPHS
                    .iter()
                    .find(|(glyph, _)| *glyph == c)
                    .map_or(c, |(_, letter)| *letter)
            })
            .collect();
        (repaired != word.to_lowercase() && self.dictionary.contains(&repaired))
            .then_some(repaired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn corrector() -> Corrector {
        Corrector::new(85.0)
    }

    #[test]
    fn dictionary_words_pass_through() {
        assert_eq!(corrector().correct_text("NET Weight 200g of sugar"), "NET Weight 200g of sugar");
    }

    #[test]
    fn fuzzy_match_pulls_toward_vocabulary() {
        assert_eq!(corrector().correct_word("Ingrediants"), "Ingredients");
        assert_eq!(corrector().correct_word("Barcod"), "Barcode");
    }

    #[test]
    fn glyph_confusion_is_repaired() {
        assert_eq!(corrector().correct_word("pr0duct"), "product");
        assert_eq!(corrector().correct_word("5ugar"), "sugar");
    }

    #[test]
    fn numbers_and_dates_are_untouched() {
        assert_eq!(corrector().correct_word("01-02-2023"), "01-02-2023");
        assert_eq!(corrector().correct_word("12345678"), "12345678");
    }

    #[test]
    fn unknown_words_are_kept() {
        assert_eq!(corrector().correct_word("xqzzy"), "xqzzy");
    }

    #[test]
    fn correction_is_idempotent() {
        let c = corrector();
        let once = c.correct_text("Ingrediants: pr0duct of 5ugar");
        assert_eq!(c.correct_text(&once), once);
    }
}
