//! Field schema and validation rules for the passenger interview.

use serde_json::{Value, json};

/// Outcome of validating one raw answer.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// Input accepted; carries the coerced value to record.
    Valid(Value),
    /// Input rejected; carries the user-facing error message.
    Invalid(String),
}

/// Rule-based coercion for a single field. No free-text understanding —
/// every rule is an exact shape match on the trimmed input.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRule {
    /// Any non-empty text, stored verbatim.
    FreeText,
    /// Integer restricted to a fixed set of choices.
    IntChoice(&'static [i64]),
    /// One of a fixed keyword set, matched case-insensitively, stored lowercase.
    KeywordLower(&'static [&'static str]),
    /// One of a fixed keyword set, matched case-insensitively, stored uppercase.
    KeywordUpper(&'static [&'static str]),
    /// Non-negative real number.
    NonNegativeReal,
    /// Non-negative integer.
    NonNegativeInt,
    /// Real number in the closed range `[min, max]`; `max: None` leaves the
    /// range unbounded above.
    RealRange { min: f64, max: Option<f64> },
}

impl FieldRule {
    /// Coerce `raw` under this rule, or `None` if it doesn't fit.
    pub fn coerce(&self, raw: &str) -> Option<Value> {
        let raw = raw.trim();
        match self {
            Self::FreeText => (!raw.is_empty()).then(|| json!(raw)),
            Self::IntChoice(choices) => {
                let n: i64 = raw.parse().ok()?;
                choices.contains(&n).then(|| json!(n))
            }
            Self::KeywordLower(keywords) => keywords
                .iter()
                .find(|k| k.eq_ignore_ascii_case(raw))
                .map(|k| json!(k.to_lowercase())),
            Self::KeywordUpper(keywords) => keywords
                .iter()
                .find(|k| k.eq_ignore_ascii_case(raw))
                .map(|k| json!(k.to_uppercase())),
            Self::NonNegativeReal => {
                let n: f64 = raw.parse().ok()?;
                (n.is_finite() && n >= 0.0).then(|| json!(n))
            }
            Self::NonNegativeInt => {
                let n: i64 = raw.parse().ok()?;
                (n >= 0).then(|| json!(n))
            }
            Self::RealRange { min, max } => {
                let n: f64 = raw.parse().ok()?;
                let in_range =
                    n.is_finite() && n >= *min && max.is_none_or(|cap| n <= cap);
                in_range.then(|| json!(n))
            }
        }
    }
}

/// One attribute collected during the interview.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Record key the coerced value is stored under. Unique within a schema.
    pub key: &'static str,
    /// Question the assistant asks for this field.
    pub prompt: String,
    /// Coercion rule.
    pub rule: FieldRule,
    /// User-facing message when the rule rejects an answer.
    pub error: String,
}

impl FieldSpec {
    fn new(
        key: &'static str,
        prompt: impl Into<String>,
        rule: FieldRule,
        error: impl Into<String>,
    ) -> Self {
        Self {
            key,
            prompt: prompt.into(),
            rule,
            error: error.into(),
        }
    }

    /// Run this field's rule against a raw answer.
    pub fn validate(&self, raw: &str) -> ValidationResult {
        match self.rule.coerce(raw) {
            Some(value) => ValidationResult::Valid(value),
            None => ValidationResult::Invalid(self.error.clone()),
        }
    }
}

/// The full Titanic passenger questionnaire, in interview order.
///
/// `fare_cap` bounds the accepted fare range above (inclusive); `None`
/// leaves fares unbounded.
pub fn passenger_fields(fare_cap: Option<f64>) -> Vec<FieldSpec> {
    let fare_prompt = match fare_cap {
        Some(cap) => format!("What is your fare? ($0 - ${cap:.0})"),
        None => "What is your fare?".to_string(),
    };
    let fare_error = match fare_cap {
        Some(cap) => format!("Fare should be between 0 and {cap:.0}."),
        None => "Please enter a valid non-negative fare.".to_string(),
    };

    vec![
        FieldSpec::new(
            "name",
            "What's your name?",
            FieldRule::FreeText,
            "Please tell me your name.",
        ),
        FieldSpec::new(
            "class",
            "Which class are you traveling in? (1, 2, or 3)",
            FieldRule::IntChoice(&[1, 2, 3]),
            "Please enter 1, 2, or 3 for class.",
        ),
        FieldSpec::new(
            "sex",
            "What is your sex (male/female)?",
            FieldRule::KeywordLower(&["male", "female"]),
            "Please enter 'male' or 'female'.",
        ),
        FieldSpec::new(
            "age",
            "What is your age?",
            FieldRule::NonNegativeReal,
            "Please enter a valid positive number for age.",
        ),
        FieldSpec::new(
            "siblings_spouses",
            "How many siblings/spouses are aboard?",
            FieldRule::NonNegativeInt,
            "Please enter a valid non-negative integer.",
        ),
        FieldSpec::new(
            "parents_children",
            "How many parents/children are aboard?",
            FieldRule::NonNegativeInt,
            "Please enter a valid non-negative integer.",
        ),
        FieldSpec::new(
            "fare",
            fare_prompt,
            FieldRule::RealRange {
                min: 0.0,
                max: fare_cap,
            },
            fare_error,
        ),
        FieldSpec::new(
            "embarked",
            "What is your port of embarkation? (C, Q, S)",
            FieldRule::KeywordUpper(&["C", "Q", "S"]),
            "Please enter C, Q, or S.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn field<'a>(fields: &'a [FieldSpec], key: &str) -> &'a FieldSpec {
        fields.iter().find(|f| f.key == key).unwrap()
    }

    #[test]
    fn schema_keys_are_unique_and_ordered() {
        let fields = passenger_fields(Some(512.0));
        let keys: Vec<&str> = fields.iter().map(|f| f.key).collect();
        assert_eq!(
            keys,
            vec![
                "name",
                "class",
                "sex",
                "age",
                "siblings_spouses",
                "parents_children",
                "fare",
                "embarked"
            ]
        );
        let unique: HashSet<&str> = keys.iter().copied().collect();
        assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn class_is_exact_integer_choice() {
        let fields = passenger_fields(Some(512.0));
        let class = field(&fields, "class");
        assert_eq!(class.validate("2"), ValidationResult::Valid(json!(2)));
        assert_eq!(class.validate(" 3 "), ValidationResult::Valid(json!(3)));
        for bad in ["4", "0", "first", "1.5", "1abc", ""] {
            assert!(
                matches!(class.validate(bad), ValidationResult::Invalid(_)),
                "class should reject {bad:?}"
            );
        }
    }

    #[test]
    fn sex_is_case_insensitive_and_stored_lowercase() {
        let fields = passenger_fields(Some(512.0));
        let sex = field(&fields, "sex");
        assert_eq!(sex.validate("FEMALE"), ValidationResult::Valid(json!("female")));
        assert_eq!(sex.validate("Male"), ValidationResult::Valid(json!("male")));
        assert!(matches!(sex.validate("other"), ValidationResult::Invalid(_)));
    }

    #[test]
    fn age_is_non_negative_real() {
        let fields = passenger_fields(Some(512.0));
        let age = field(&fields, "age");
        assert_eq!(age.validate("29"), ValidationResult::Valid(json!(29.0)));
        assert_eq!(age.validate("0.5"), ValidationResult::Valid(json!(0.5)));
        for bad in ["-1", "abc", "NaN", "inf"] {
            assert!(
                matches!(age.validate(bad), ValidationResult::Invalid(_)),
                "age should reject {bad:?}"
            );
        }
    }

    #[test]
    fn family_counts_are_non_negative_integers() {
        let fields = passenger_fields(Some(512.0));
        for key in ["siblings_spouses", "parents_children"] {
            let f = field(&fields, key);
            assert_eq!(f.validate("0"), ValidationResult::Valid(json!(0)));
            assert_eq!(f.validate("4"), ValidationResult::Valid(json!(4)));
            assert!(matches!(f.validate("-1"), ValidationResult::Invalid(_)));
            assert!(matches!(f.validate("2.5"), ValidationResult::Invalid(_)));
        }
    }

    #[test]
    fn fare_cap_is_inclusive() {
        let fields = passenger_fields(Some(512.0));
        let fare = field(&fields, "fare");
        assert_eq!(fare.validate("512"), ValidationResult::Valid(json!(512.0)));
        assert_eq!(fare.validate("0"), ValidationResult::Valid(json!(0.0)));
        assert!(matches!(fare.validate("512.01"), ValidationResult::Invalid(_)));
        assert!(matches!(fare.validate("-0.01"), ValidationResult::Invalid(_)));
    }

    #[test]
    fn uncapped_fare_accepts_anything_non_negative() {
        let fields = passenger_fields(None);
        let fare = field(&fields, "fare");
        assert_eq!(fare.validate("10000"), ValidationResult::Valid(json!(10000.0)));
        assert!(matches!(fare.validate("-1"), ValidationResult::Invalid(_)));
    }

    #[test]
    fn embarked_is_coerced_to_uppercase() {
        let fields = passenger_fields(Some(512.0));
        let embarked = field(&fields, "embarked");
        assert_eq!(embarked.validate("c"), ValidationResult::Valid(json!("C")));
        assert_eq!(embarked.validate("Q"), ValidationResult::Valid(json!("Q")));
        assert!(matches!(embarked.validate("X"), ValidationResult::Invalid(_)));
    }

    #[test]
    fn name_is_trimmed_free_text() {
        let fields = passenger_fields(Some(512.0));
        let name = field(&fields, "name");
        assert_eq!(name.validate("  Alice "), ValidationResult::Valid(json!("Alice")));
        assert!(matches!(name.validate("   "), ValidationResult::Invalid(_)));
    }
}
