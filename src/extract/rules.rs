use regex::Regex;

use crate::core::fields::FieldRecord;

/// Fixed regular-expression rules extracting single-value fields from the
/// corrected text. Rules are independent; the first match wins per field
/// and a field already populated is never overwritten.
#[derive(Debug, Clone)]
pub struct RuleSet {
    weight: Regex,
    size: Regex,
    mfd: Regex,
    expiry: Regex,
    price: Regex,
    barcode: Regex,
}

impl RuleSet {
    pub fn new() -> Self {
        Self {
            weight: Regex::new(r"(?i)(\d+\.?\d*)\s?(kg|g|mg|lb)").expect("valid regex"),
            size: Regex::new(r"(?i)(\d+\.?\d*)\s?(ml|l|oz)").expect("valid regex"),
            mfd: Regex::new(
                r"(?i)(MFD|Manufactured|Manufacturing|MFD&USE BY)[:\s-]*([0-9]{1,2}[-/][0-9]{1,2}[-/][0-9]{2,4})?",
            )
            .expect("valid regex"),
            expiry: Regex::new(
                r"(?i)(EXP|Expiry|Best Before|Use By)[:\s-]*([0-9]{1,2}[-/][0-9]{1,2}[-/][0-9]{2,4})?",
            )
            .expect("valid regex"),
            price: Regex::new(r"(?i)(UNIT SALE PRICE|MRP RS\.?)[:\s-]*([0-9]+(?:\.[0-9]{1,2})?)")
                .expect("valid regex"),
            barcode: Regex::new(r"\b\d{8,13}\b").expect("valid regex"),
        }
    }

    pub fn apply(&self, text: &str, record: &mut FieldRecord) {
        if record.weight.is_none() {
            if let Some(m) = self.weight.find(text) {
                record.weight = Some(m.as_str().to_string());
            }
        }
        if record.size_volume.is_none() {
            if let Some(m) = self.size.find(text) {
                record.size_volume = Some(m.as_str().to_string());
            }
        }
        if record.date_of_manufacturing.is_none() {
            if let Some(caps) = self.mfd.captures(text) {
                record.date_of_manufacturing = Some(date_or_unknown(caps.get(2)));
            }
        }
        if record.expiry_date.is_none() {
            if let Some(caps) = self.expiry.captures(text) {
                record.expiry_date = Some(date_or_unknown(caps.get(2)));
            }
        }
        if record.price.is_none() {
            if let Some(caps) = self.price.captures(text) {
                if let Some(amount) = caps.get(2) {
                    record.price = Some(amount.as_str().to_string());
                }
            }
        }
        if record.barcode.is_none() {
            if let Some(m) = self.barcode.find(text) {
                record.barcode = Some(m.as_str().to_string());
            }
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

/// A date keyword without a parsable date still marks the field as present.
fn date_or_unknown(date: Option<regex::Match>) -> String {
    date.map_or_else(|| "unknown".to_string(), |m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> FieldRecord {
        let mut record = FieldRecord::default();
        RuleSet::new().apply(text, &mut record);
        record
    }

    #[test]
    fn extracts_weight_and_volume() {
        let record = extract("NET WT 200g VOLUME 500 ml");
        assert_eq!(record.weight.as_deref(), Some("200g"));
        assert_eq!(record.size_volume.as_deref(), Some("500 ml"));
    }

    #[test]
    fn extracts_manufacturing_date() {
        let record = extract("MFD: 01-02-2023");
        assert_eq!(record.date_of_manufacturing.as_deref(), Some("01-02-2023"));
    }

    #[test]
    fn keyword_without_date_marks_unknown() {
        let record = extract("Manufactured by Acme Foods");
        assert_eq!(record.date_of_manufacturing.as_deref(), Some("unknown"));
    }

    #[test]
    fn extracts_expiry_date() {
        let record = extract("Best Before 12/08/24");
        assert_eq!(record.expiry_date.as_deref(), Some("12/08/24"));
    }

    #[test]
    fn extracts_price_amount_only() {
        let record = extract("MRP RS. 45.50 incl. of all taxes");
        assert_eq!(record.price.as_deref(), Some("45.50"));
        let record = extract("UNIT SALE PRICE: 120");
        assert_eq!(record.price.as_deref(), Some("120"));
    }

    #[test]
    fn extracts_first_barcode_run() {
        let record = extract("call 1800 123 456 code 89012345678 alt 99887766");
        assert_eq!(record.barcode.as_deref(), Some("89012345678"));
    }

    #[test]
    fn short_and_long_digit_runs_are_not_barcodes() {
        let record = extract("pin 1234567 serial 12345678901234");
        assert_eq!(record.barcode, None);
    }

    #[test]
    fn rules_never_overwrite_existing_values() {
        let mut record = FieldRecord::default();
        record.weight = Some("1kg".to_string());
        RuleSet::new().apply("NET WT 200g", &mut record);
        assert_eq!(record.weight.as_deref(), Some("1kg"));
    }

    #[test]
    fn unmatched_rules_leave_fields_null() {
        let record = extract("nothing of interest here");
        assert_eq!(record.weight, None);
        assert_eq!(record.price, None);
        assert_eq!(record.barcode, None);
    }
}
