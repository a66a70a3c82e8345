use crate::core::fields::FieldRecord;

/// Trigger keywords for the block-captured fields, matched
/// case-insensitively against raw lines.
const INGREDIENT_TRIGGERS: &[&str] = &["ingredients", "contents"];
const NUTRITION_TRIGGERS: &[&str] = &["nutrition", "nutritional facts", "per serving"];

/// Multi-line block capture over the raw, pre-clean text: a trigger line
/// claims every following line until a blank line or another trigger line.
/// Runs only for fields still unset.
pub fn apply(raw_text: &str, record: &mut FieldRecord) {
    let lines: Vec<&str> = raw_text.lines().map(str::trim).collect();

    for (idx, line) in lines.iter().enumerate() {
        let lower = line.to_lowercase();
        if record.ingredients.is_none() && contains_any(&lower, INGREDIENT_TRIGGERS) {
            if let Some(block) = capture_block(&lines, idx) {
                record.ingredients = Some(block);
            }
        }
        if record.nutritional_facts.is_none() && contains_any(&lower, NUTRITION_TRIGGERS) {
            if let Some(block) = capture_block(&lines, idx) {
                record.nutritional_facts = Some(block);
            }
        }
    }
}

fn contains_any(line: &str, triggers: &[&str]) -> bool {
    triggers.iter().any(|kw| line.contains(kw))
}

fn capture_block(lines: &[&str], trigger_idx: usize) -> Option<String> {
    let mut captured = Vec::new();
    for line in &lines[trigger_idx + 1..] {
        if line.is_empty() {
            break;
        }
        let lower = line.to_lowercase();
        if contains_any(&lower, INGREDIENT_TRIGGERS) || contains_any(&lower, NUTRITION_TRIGGERS) {
            break;
        }
        captured.push(*line);
    }
    let block = captured.join(" ").trim().to_string();
    (!block.is_empty()).then_some(block)
}
