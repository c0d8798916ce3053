//! Ordered prefix classification table.
//!
//! Rules are evaluated top to bottom; the first match wins and anything
//! unmatched is `PlainText`.

use crate::model::action::ActionCategory;
use once_cell::sync::Lazy;
use regex::Regex;

/// One entry of the classification table.
#[derive(Debug)]
pub struct ClassificationRule {
    category: ActionCategory,
    pattern: Regex,
}

impl ClassificationRule {
    fn new(category: ActionCategory, pattern: &str) -> Self {
        Self {
            category,
            pattern: Regex::new(pattern).expect("valid classification regex"),
        }
    }

    pub fn category(&self) -> ActionCategory {
        self.category
    }

    /// Source pattern, for diagnostics.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

// Precedence order. Schemes are case-sensitive; `[0-9]` keeps digits ASCII.
static CLASSIFICATION_RULES: Lazy<Vec<ClassificationRule>> = Lazy::new(|| {
    vec![
        ClassificationRule::new(ActionCategory::Telephone, r"^tel:[0-9]+"),
        ClassificationRule::new(ActionCategory::Mail, r"^mailto:"),
        ClassificationRule::new(ActionCategory::Web, r"^https?://"),
    ]
});

/// Returns the rule table in precedence order.
pub fn classification_rules() -> &'static [ClassificationRule] {
    CLASSIFICATION_RULES.as_slice()
}

/// Classifies decoded text into the action it calls for.
pub fn classify(text: &str) -> ActionCategory {
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| rule.matches(text))
        .map_or(ActionCategory::PlainText, ClassificationRule::category)
}

#[cfg(test)]
mod tests {
    use super::{classification_rules, classify};
    use crate::model::action::ActionCategory;

    #[test]
    fn classifies_known_schemes() {
        assert_eq!(classify("tel:5551234"), ActionCategory::Telephone);
        assert_eq!(classify("mailto:a@b.com"), ActionCategory::Mail);
        assert_eq!(classify("https://example.com"), ActionCategory::Web);
        assert_eq!(classify("http://example.com/PATH"), ActionCategory::Web);
    }

    #[test]
    fn falls_back_to_plain_text() {
        assert_eq!(classify(""), ActionCategory::PlainText);
        assert_eq!(classify("ftp://x"), ActionCategory::PlainText);
        assert_eq!(classify("hello"), ActionCategory::PlainText);
    }

    #[test]
    fn telephone_requires_a_leading_ascii_digit() {
        assert_eq!(classify("tel:"), ActionCategory::PlainText);
        assert_eq!(classify("tel:+15551234"), ActionCategory::PlainText);
        assert_eq!(classify("tel:\u{0661}\u{0662}"), ActionCategory::PlainText);
        assert_eq!(classify("tel:1-800-FLOWERS"), ActionCategory::Telephone);
    }

    #[test]
    fn schemes_are_case_sensitive_and_anchored() {
        assert_eq!(classify("HTTPS://example.com"), ActionCategory::PlainText);
        assert_eq!(classify("MAILTO:a@b.com"), ActionCategory::PlainText);
        assert_eq!(classify(" https://example.com"), ActionCategory::PlainText);
        assert_eq!(classify("see https://example.com"), ActionCategory::PlainText);
    }

    #[test]
    fn mailto_without_address_is_still_mail() {
        assert_eq!(classify("mailto:"), ActionCategory::Mail);
    }

    #[test]
    fn table_lists_rules_in_precedence_order() {
        let order = classification_rules()
            .iter()
            .map(|rule| (rule.category(), rule.pattern()))
            .collect::<Vec<_>>();
        assert_eq!(
            order,
            vec![
                (ActionCategory::Telephone, "^tel:[0-9]+"),
                (ActionCategory::Mail, "^mailto:"),
                (ActionCategory::Web, "^https?://"),
            ]
        );
    }
}
