use strsim::normalized_levenshtein;

/// Levenshtein similarity on the 0..=100 scale the acceptance thresholds
/// are expressed in.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    normalized_levenshtein(a, b) * 100.0
}

/// Best [`ratio`] of the shorter string against every equal-length window
/// of the longer one. A short query scores high against any text that
/// contains something close to it.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (short, long) = if a_chars.len() <= b_chars.len() {
        (a_chars, b_chars)
    } else {
        (b_chars, a_chars)
    };
    if short.is_empty() {
        return 0.0;
    }
    if short.len() == long.len() {
        let short: String = short.into_iter().collect();
        let long: String = long.into_iter().collect();
        return ratio(&short, &long);
    }

    let needle: String = short.iter().collect();
    let mut best = 0.0_f64;
    for start in 0..=(long.len() - short.len()) {
        let window: String = long[start..start + short.len()].iter().collect();
        let score = ratio(&needle, &window);
        if score > best {
            best = score;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(ratio("Weight", "Weight"), 100.0);
        assert_eq!(partial_ratio("Weight", "Weight"), 100.0);
    }

    #[test]
    fn close_misspelling_scores_high() {
        assert!(ratio("ingrediants", "ingredients") > 85.0);
        assert!(ratio("weight", "wieght") > 60.0);
    }

    #[test]
    fn unrelated_strings_score_low() {
        assert!(ratio("barcode", "nutrition") < 50.0);
    }

    #[test]
    fn partial_ratio_finds_embedded_match() {
        assert_eq!(partial_ratio("Barcode", "the Barcode is here"), 100.0);
        assert!(partial_ratio("Brand", "Brand new pack") > 85.0);
    }

    #[test]
    fn empty_needle_scores_zero() {
        assert_eq!(partial_ratio("", "anything"), 0.0);
    }
}
