pub mod clean;
pub mod correct;
pub mod multiline;
pub mod ngram;
pub mod rules;
pub mod similarity;

use serde::{Deserialize, Serialize};

use crate::core::fields::FieldRecord;

pub use clean::clean_text;
pub use correct::Corrector;
pub use rules::RuleSet;

/// Acceptance thresholds of the lexical passes, tunable per rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Similarity score (0..=100 scale) a fuzzy candidate must exceed.
    pub fuzzy_accept: f64,
    /// Minimum length of an accepted n-gram candidate.
    pub min_candidate_len: usize,
    /// Longest word sequence considered a candidate.
    pub max_ngram: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            fuzzy_accept: 85.0,
            min_candidate_len: 3,
            max_ngram: 4,
        }
    }
}

/// Maps free-form OCR text onto the field record through the layered
/// passes: cleaning, spell correction, regex rules, multi-line capture,
/// fuzzy n-gram mapping. Passes are strictly additive; rerunning on the
/// same input yields the same record.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    config: ExtractConfig,
    corrector: Corrector,
    rules: RuleSet,
}

impl FieldExtractor {
    pub fn new(config: ExtractConfig) -> Self {
        let corrector = Corrector::new(config.fuzzy_accept);
        Self {
            config,
            corrector,
            rules: RuleSet::new(),
        }
    }

    /// Cleaning and correction only: the canonical token stream the
    /// rule-based passes read.
    pub fn normalize(&self, raw_text: &str) -> String {
        self.corrector.correct_text(&clean_text(raw_text))
    }

    /// All extraction passes over an already-normalized text. The raw text
    /// is still consulted by the multi-line pass, which needs the original
    /// line structure.
    pub fn extract_normalized(&self, raw_text: &str, corrected: &str) -> FieldRecord {
        let mut record = FieldRecord::default();
        self.rules.apply(corrected, &mut record);
        multiline::apply(raw_text, &mut record);
        ngram::apply(corrected, &self.config, &mut record);
        record
    }

    /// Convenience entry point: normalize, then extract.
    pub fn extract(&self, raw_text: &str) -> FieldRecord {
        let corrected = self.normalize(raw_text);
        self.extract_normalized(raw_text, &corrected)
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(ExtractConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_all_null_record() {
        let record = FieldExtractor::default().extract("");
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 43);
        assert!(object.values().all(|v| v.is_null()));
    }

    #[test]
    fn passes_are_deterministic() {
        let extractor = FieldExtractor::default();
        let text = "NUTRITION FACTS\nENERGY 250kcal\nFAT 10g\nMFD: 01-02-2023";
        assert_eq!(extractor.extract(text), extractor.extract(text));
    }

    #[test]
    fn normalize_is_idempotent() {
        let extractor = FieldExtractor::default();
        let once = extractor.normalize("  Ingrediants:  pr0duct \u{2122} of 5ugar ");
        assert_eq!(extractor.normalize(&once), once);
    }

    #[test]
    fn earlier_passes_take_precedence() {
        let extractor = FieldExtractor::default();
        // The regex pass sets Weight; the n-gram pass must not replace it
        // even though "Weight" appears verbatim in the text.
        let record = extractor.extract("Weight 200g");
        assert_eq!(record.weight.as_deref(), Some("200g"));
    }
}
