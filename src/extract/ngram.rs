use crate::core::fields::FieldRecord;
use crate::extract::similarity::partial_ratio;
use crate::extract::ExtractConfig;

/// Last-resort mapping for fields no earlier pass populated: the field name
/// itself is fuzzily matched against every short word sequence of the
/// corrected text, and the best-scoring candidate is taken when it clears
/// the acceptance bar.
pub fn apply(corrected: &str, config: &ExtractConfig, record: &mut FieldRecord) {
    let words: Vec<&str> = corrected
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return;
    }

    let ngrams = build_ngrams(&words, config.max_ngram);

    for name in FieldRecord::FIELD_NAMES {
        let unset = record.get(name).is_none_or(str::is_empty);
        if !unset {
            continue;
        }
        if let Some(candidate) = best_candidate(name, &ngrams, config) {
            record.set(name, candidate);
        }
    }
}

/// All 1..=max_len-word contiguous sequences, shortest lengths first.
fn build_ngrams(words: &[&str], max_len: usize) -> Vec<String> {
    let mut ngrams = Vec::new();
    for n in 1..=max_len {
        for window in words.windows(n) {
            ngrams.push(window.join(" "));
        }
    }
    ngrams
}

fn best_candidate(field: &str, ngrams: &[String], config: &ExtractConfig) -> Option<String> {
    let mut best: Option<(f64, &String)> = None;
    for ngram in ngrams {
        let score = partial_ratio(field, ngram);
        if best.is_none_or(|(b, _)| score > b) {
            best = Some((score, ngram));
        }
    }
    let (score, candidate) = best?;
    let acceptable = score > config.fuzzy_accept
        && candidate.len() >= config.min_candidate_len
        && candidate.chars().any(|c| c.is_ascii_alphabetic());
    acceptable.then(|| candidate.clone())
}
