use unicode_normalization::UnicodeNormalization;

/// Punctuation allowed through cleaning; everything else outside letters,
/// digits and whitespace is OCR noise.
const ALLOWED_PUNCT: &str = "%/.,:-";

/// Normalizes raw OCR text into the canonical form the extraction passes
/// operate on: NFKC, printable ASCII only, single-spaced, restricted to the
/// allowed character set, trimmed. Idempotent.
pub fn clean_text(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect();
    let printable: String = normalized
        .chars()
        .filter(|c| matches!(c, '\x20'..='\x7e' | '\n'))
        .collect();
    let collapsed = printable.split_whitespace().collect::<Vec<_>>().join(" ");
    let restricted: String = collapsed
        .chars()
        .filter(|&c| c.is_ascii_alphanumeric() || c.is_whitespace() || ALLOWED_PUNCT.contains(c))
        .collect();
    restricted.trim().to_string()
}
