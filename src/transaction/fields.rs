//! Transaction fields as sent by clients, and their validation.
//!
//! Every write to the store goes through [TransactionFields::validate] or
//! [TransactionFields::validate_merge], which report all violated constraints
//! at once rather than stopping at the first.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::{
    Date, OffsetDateTime, Time, UtcOffset, format_description::well_known::Rfc3339,
    macros::format_description,
};

use crate::transaction::{Transaction, TransactionType};

/// The minimum length of a category after trimming whitespace.
pub const MIN_CATEGORY_LENGTH: usize = 2;

/// The fields of a transaction that a client may set, all optional.
///
/// Unknown keys (including `id`, `createdAt` and `updatedAt`) are ignored
/// and `null` is treated the same as an absent key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFields {
    /// Either "income" or "expense".
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// The category, at least [MIN_CATEGORY_LENGTH] characters once trimmed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// A non-negative amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// An RFC 3339 date-time or a `YYYY-MM-DD` date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// An optional note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Transaction fields that satisfy every constraint, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidTransaction {
    /// Whether the transaction is an income or an expense.
    pub kind: TransactionType,
    /// The trimmed category.
    pub category: String,
    /// The non-negative amount.
    pub value: f64,
    /// When the transaction happened.
    pub date: OffsetDateTime,
    /// The trimmed description, empty if none was given.
    pub description: String,
}

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// The JSON name of the offending field.
    pub field: String,
    /// What is wrong with the field.
    pub message: String,
}

impl FieldViolation {
    /// Create a violation for `field`.
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_owned(),
            message: message.into(),
        }
    }
}

/// All the constraints violated by a set of [TransactionFields].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldViolation>);

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self
            .0
            .iter()
            .map(|violation| format!("{}: {}", violation.field, violation.message))
            .collect();

        f.write_str(&messages.join("; "))
    }
}

impl TransactionFields {
    /// Validate the fields as a complete transaction.
    ///
    /// Used for creating and for replacing a transaction: every required field
    /// must be present and an absent description becomes an empty string.
    ///
    /// # Errors
    /// Returns every violated constraint if any field is missing or invalid.
    pub fn validate(&self) -> Result<ValidTransaction, ValidationErrors> {
        self.validate_onto(None)
    }

    /// Validate the fields as changes to `existing`.
    ///
    /// Fields that are absent keep the value from `existing`, so only the
    /// supplied fields are checked against their constraints.
    ///
    /// # Errors
    /// Returns every violated constraint among the supplied fields.
    pub fn validate_merge(&self, existing: &Transaction) -> Result<ValidTransaction, ValidationErrors> {
        self.validate_onto(Some(existing))
    }

    fn validate_onto(&self, base: Option<&Transaction>) -> Result<ValidTransaction, ValidationErrors> {
        let mut violations = Vec::new();

        let kind = match (&self.kind, base) {
            (Some(kind), _) => kind
                .parse::<TransactionType>()
                .map_err(|error| violations.push(FieldViolation::new("type", error.to_string())))
                .ok(),
            (None, Some(base)) => Some(base.kind),
            (None, None) => {
                violations.push(FieldViolation::new("type", "is required"));
                None
            }
        };

        let category = match (&self.category, base) {
            (Some(category), _) => validate_category(category)
                .map_err(|violation| violations.push(violation))
                .ok(),
            (None, Some(base)) => Some(base.category.clone()),
            (None, None) => {
                violations.push(FieldViolation::new("category", "is required"));
                None
            }
        };

        let value = match (self.value, base) {
            (Some(value), _) => validate_value(value)
                .map_err(|violation| violations.push(violation))
                .ok(),
            (None, Some(base)) => Some(base.value),
            (None, None) => {
                violations.push(FieldViolation::new("value", "is required"));
                None
            }
        };

        let date = match (&self.date, base) {
            (Some(date), _) => parse_date(date)
                .ok_or_else(|| {
                    violations.push(FieldViolation::new(
                        "date",
                        format!("\"{date}\" is not a valid date"),
                    ))
                })
                .ok(),
            (None, Some(base)) => Some(base.date),
            (None, None) => {
                violations.push(FieldViolation::new("date", "is required"));
                None
            }
        };

        let description = match (&self.description, base) {
            (Some(description), _) => description.trim().to_owned(),
            (None, Some(base)) => base.description.clone(),
            (None, None) => String::new(),
        };

        match (kind, category, value, date) {
            (Some(kind), Some(category), Some(value), Some(date)) if violations.is_empty() => {
                Ok(ValidTransaction {
                    kind,
                    category,
                    value,
                    date,
                    description,
                })
            }
            _ => Err(ValidationErrors(violations)),
        }
    }
}

fn validate_category(category: &str) -> Result<String, FieldViolation> {
    let category = category.trim();

    if category.is_empty() {
        Err(FieldViolation::new("category", "is required"))
    } else if category.chars().count() < MIN_CATEGORY_LENGTH {
        Err(FieldViolation::new(
            "category",
            format!("must be at least {MIN_CATEGORY_LENGTH} characters long"),
        ))
    } else {
        Ok(category.to_owned())
    }
}

fn validate_value(value: f64) -> Result<f64, FieldViolation> {
    if !value.is_finite() {
        Err(FieldViolation::new("value", "must be a finite number"))
    } else if value < 0.0 {
        Err(FieldViolation::new(
            "value",
            "must be greater than or equal to 0",
        ))
    } else {
        Ok(value)
    }
}

/// Parse an RFC 3339 date-time, or a `YYYY-MM-DD` date as midnight UTC.
///
/// The result is always in UTC.
pub fn parse_date(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();

    if let Ok(date_time) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(date_time.to_offset(UtcOffset::UTC));
    }

    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.with_time(Time::MIDNIGHT).assume_utc())
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::transaction::{Transaction, TransactionType};

    use super::{FieldViolation, TransactionFields, ValidTransaction, ValidationErrors};

    fn salary() -> TransactionFields {
        TransactionFields {
            kind: Some("income".to_owned()),
            category: Some("Salary".to_owned()),
            value: Some(1000.0),
            date: Some("2024-01-01".to_owned()),
            description: None,
        }
    }

    fn stored_rent() -> Transaction {
        Transaction {
            id: 1,
            kind: TransactionType::Expense,
            category: "Rent".to_owned(),
            value: 400.0,
            date: datetime!(2024-01-02 00:00 UTC),
            description: "January".to_owned(),
            created_at: datetime!(2024-01-02 09:00 UTC),
            updated_at: datetime!(2024-01-02 09:00 UTC),
        }
    }

    #[test]
    fn accepts_complete_fields() {
        let got = salary().validate();

        assert_eq!(
            got,
            Ok(ValidTransaction {
                kind: TransactionType::Income,
                category: "Salary".to_owned(),
                value: 1000.0,
                date: datetime!(2024-01-01 00:00 UTC),
                description: String::new(),
            })
        );
    }

    #[test]
    fn trims_category_and_description() {
        let fields = TransactionFields {
            category: Some("  Groceries ".to_owned()),
            description: Some("  weekly shop  ".to_owned()),
            ..salary()
        };

        let got = fields.validate().unwrap();

        assert_eq!(got.category, "Groceries");
        assert_eq!(got.description, "weekly shop");
    }

    #[test]
    fn accepts_rfc3339_dates() {
        let fields = TransactionFields {
            date: Some("2024-03-05T14:30:00+13:00".to_owned()),
            ..salary()
        };

        let got = fields.validate().unwrap();

        assert_eq!(got.date, datetime!(2024-03-05 14:30 +13));
    }

    #[test]
    fn accepts_zero_value() {
        let fields = TransactionFields {
            value: Some(0.0),
            ..salary()
        };

        assert!(fields.validate().is_ok());
    }

    #[test]
    fn reports_every_missing_field() {
        let got = TransactionFields::default().validate();

        assert_eq!(
            got,
            Err(ValidationErrors(vec![
                FieldViolation::new("type", "is required"),
                FieldViolation::new("category", "is required"),
                FieldViolation::new("value", "is required"),
                FieldViolation::new("date", "is required"),
            ]))
        );
    }

    #[test]
    fn rejects_negative_value() {
        let fields = TransactionFields {
            value: Some(-0.01),
            ..salary()
        };

        assert_eq!(
            fields.validate(),
            Err(ValidationErrors(vec![FieldViolation::new(
                "value",
                "must be greater than or equal to 0"
            )]))
        );
    }

    #[test]
    fn rejects_short_category_after_trimming() {
        let fields = TransactionFields {
            category: Some(" x ".to_owned()),
            ..salary()
        };

        assert_eq!(
            fields.validate(),
            Err(ValidationErrors(vec![FieldViolation::new(
                "category",
                "must be at least 2 characters long"
            )]))
        );
    }

    #[test]
    fn rejects_unknown_type_and_bad_date() {
        let fields = TransactionFields {
            kind: Some("transfer".to_owned()),
            date: Some("yesterday".to_owned()),
            ..salary()
        };

        let errors = fields.validate().unwrap_err();

        let fields: Vec<&str> = errors.0.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["type", "date"]);
    }

    #[test]
    fn merge_keeps_omitted_fields() {
        let existing = stored_rent();
        let patch = TransactionFields {
            description: Some("updated".to_owned()),
            ..Default::default()
        };

        let got = patch.validate_merge(&existing).unwrap();

        assert_eq!(
            got,
            ValidTransaction {
                kind: existing.kind,
                category: existing.category,
                value: existing.value,
                date: existing.date,
                description: "updated".to_owned(),
            }
        );
    }

    #[test]
    fn merge_validates_supplied_fields() {
        let patch = TransactionFields {
            value: Some(-5.0),
            ..Default::default()
        };

        assert!(patch.validate_merge(&stored_rent()).is_err());
    }

    #[test]
    fn deserializes_null_as_absent_and_ignores_unknown_keys() {
        let fields: TransactionFields = serde_json::from_str(
            r#"{"type": "expense", "description": null, "id": 3, "createdAt": "x"}"#,
        )
        .unwrap();

        assert_eq!(
            fields,
            TransactionFields {
                kind: Some("expense".to_owned()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn serializes_only_supplied_fields() {
        let patch = TransactionFields {
            description: Some("updated".to_owned()),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            r#"{"description":"updated"}"#
        );
    }
}
