use crate::core::model::Section;

/// Maps a token's text to a section label via keyword containment.
///
/// Matching is case-sensitive substring containment, not tokenization; a
/// trigger appearing inside an unrelated word still matches. The first
/// section in priority order wins.
pub fn classify_section(text: &str) -> Option<Section> {
    Section::ALL
        .into_iter()
        .find(|section| section.triggers().iter().any(|kw| text.contains(kw)))
}
