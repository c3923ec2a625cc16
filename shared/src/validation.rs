//! Validation utilities for the Farm Dashboard Platform
//!
//! Input DTOs carry `validator` rules for single fields; the cross-field
//! rules (transaction category and amount sign) live here as plain functions.

use std::borrow::Cow;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{NewTransaction, Transaction, TransactionPatch, TransactionType};

/// A single rejected field, as reported to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field_label: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field_label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_label: field_label.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field_label, self.message)
    }
}

// ============================================================================
// Field Rules
// ============================================================================

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Required text must contain something other than whitespace
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule_error("blank", "This field is required"));
    }
    Ok(())
}

/// Sizes and similar measures must be strictly positive
pub fn validate_positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(rule_error("not_positive", "Must be greater than zero"));
    }
    Ok(())
}

/// Turn a `snake_case` struct field into the camelCase label the UI uses
pub fn field_label(field: &str) -> String {
    let mut label = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            label.extend(c.to_uppercase());
            upper_next = false;
        } else {
            label.push(c);
        }
    }
    label
}

/// Flatten `validator` output into one error per offending field rule
pub fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(name, _)| *name);

    fields
        .into_iter()
        .flat_map(|(name, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                FieldError::new(field_label(name), message)
            })
        })
        .collect()
}

/// Run the derived rules of an input DTO
pub fn validate_input<T: Validate>(input: &T) -> Result<(), Vec<FieldError>> {
    input.validate().map_err(|e| collect_field_errors(&e))
}

// ============================================================================
// Transaction Rules
// ============================================================================

/// Category must be one of the form's options for the transaction direction
pub fn validate_transaction_category(
    kind: TransactionType,
    category: &str,
) -> Result<(), &'static str> {
    if kind.categories().contains(&category) {
        Ok(())
    } else {
        match kind {
            TransactionType::Income => Err("Category is not an income category"),
            TransactionType::Expense => Err("Category is not an expense category"),
        }
    }
}

/// Amount sign must agree with the transaction direction
pub fn validate_amount_sign(kind: TransactionType, amount: Decimal) -> Result<(), &'static str> {
    if amount.is_zero() {
        return Err("Amount must not be zero");
    }
    match kind {
        TransactionType::Income if amount.is_sign_negative() => {
            Err("Income amounts must be positive")
        }
        TransactionType::Expense if amount.is_sign_positive() => {
            Err("Expense amounts must be negative")
        }
        _ => Ok(()),
    }
}

/// All rules for a new transaction
pub fn check_new_transaction(input: &NewTransaction) -> Result<(), Vec<FieldError>> {
    let mut errors = match validate_input(input) {
        Ok(()) => Vec::new(),
        Err(errors) => errors,
    };

    if let Err(message) = validate_transaction_category(input.kind, &input.category) {
        if !input.category.trim().is_empty() {
            errors.push(FieldError::new("category", message));
        }
    }
    if let Err(message) = validate_amount_sign(input.kind, input.amount) {
        errors.push(FieldError::new("amount", message));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Rules for a transaction patch applied to `current`. Cross-field rules
/// run against the merged result whenever the patch touches one side of
/// the pair, so a lone amount cannot flip sign against the stored type.
pub fn check_transaction_patch(
    current: &Transaction,
    patch: &TransactionPatch,
) -> Result<(), Vec<FieldError>> {
    let mut errors = match validate_input(patch) {
        Ok(()) => Vec::new(),
        Err(errors) => errors,
    };

    let kind = patch.kind.unwrap_or(current.kind);
    let category = patch.category.as_deref().unwrap_or(&current.category);
    let amount = patch.amount.unwrap_or(current.amount);

    if patch.kind.is_some() || patch.category.is_some() {
        if let Err(message) = validate_transaction_category(kind, category) {
            if !category.trim().is_empty() {
                errors.push(FieldError::new("category", message));
            }
        }
    }
    if patch.kind.is_some() || patch.amount.is_some() {
        if let Err(message) = validate_amount_sign(kind, amount) {
            errors.push(FieldError::new("amount", message));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewFarm, SizeUnit};
    use chrono::NaiveDate;

    fn new_transaction(kind: TransactionType, category: &str, amount: i64) -> NewTransaction {
        NewTransaction {
            farm_id: 1,
            kind,
            category: category.to_string(),
            amount: Decimal::from(amount),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            description: None,
        }
    }

    #[test]
    fn test_field_label() {
        assert_eq!(field_label("size_unit"), "sizeUnit");
        assert_eq!(field_label("name"), "name");
        assert_eq!(field_label("gps_coordinates"), "gpsCoordinates");
    }

    #[test]
    fn test_new_farm_rules() {
        let farm = NewFarm {
            name: "  ".to_string(),
            size: Decimal::ZERO,
            size_unit: SizeUnit::Hectares,
            location: "Valley Road".to_string(),
            soil_type: None,
            farm_type: None,
            notes: None,
            contact_number: None,
            gps_coordinates: None,
            water_resource: None,
            machinery_available: None,
        };

        let errors = validate_input(&farm).unwrap_err();
        let labels: Vec<_> = errors.iter().map(|e| e.field_label.as_str()).collect();
        assert_eq!(labels, vec!["name", "size"]);
    }

    #[test]
    fn test_transaction_category_must_match_direction() {
        assert!(validate_transaction_category(TransactionType::Expense, "Seeds").is_ok());
        assert!(validate_transaction_category(TransactionType::Income, "Crop Sales").is_ok());
        assert!(validate_transaction_category(TransactionType::Income, "Seeds").is_err());
        assert!(validate_transaction_category(TransactionType::Expense, "Other").is_ok());
        assert!(validate_transaction_category(TransactionType::Income, "Other").is_ok());
    }

    #[test]
    fn test_amount_sign_matches_direction() {
        assert!(validate_amount_sign(TransactionType::Income, Decimal::from(100)).is_ok());
        assert!(validate_amount_sign(TransactionType::Expense, Decimal::from(-40)).is_ok());
        assert!(validate_amount_sign(TransactionType::Income, Decimal::from(-5)).is_err());
        assert!(validate_amount_sign(TransactionType::Expense, Decimal::from(5)).is_err());
        assert!(validate_amount_sign(TransactionType::Expense, Decimal::ZERO).is_err());
    }

    #[test]
    fn test_check_new_transaction_collects_all_errors() {
        assert!(check_new_transaction(&new_transaction(
            TransactionType::Expense,
            "Fuel",
            -80
        ))
        .is_ok());

        let errors =
            check_new_transaction(&new_transaction(TransactionType::Income, "Fuel", -80))
                .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field_label, "category");
        assert_eq!(errors[1].field_label, "amount");
    }

    fn stored_expense() -> Transaction {
        Transaction {
            id: 9,
            farm_id: 1,
            kind: TransactionType::Expense,
            category: "Fuel".to_string(),
            amount: Decimal::from(-40),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            description: None,
        }
    }

    #[test]
    fn test_patch_is_checked_against_stored_record() {
        let current = stored_expense();

        let flipped = TransactionPatch {
            amount: Some(Decimal::from(40)),
            ..TransactionPatch::default()
        };
        let errors = check_transaction_patch(&current, &flipped).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("amount", "Expense amounts must be negative")]);

        let retyped = TransactionPatch {
            kind: Some(TransactionType::Income),
            ..TransactionPatch::default()
        };
        let fields: Vec<_> = check_transaction_patch(&current, &retyped)
            .unwrap_err()
            .into_iter()
            .map(|e| e.field_label)
            .collect();
        assert_eq!(fields, vec!["category", "amount"]);

        let consistent = TransactionPatch {
            amount: Some(Decimal::from(-55)),
            description: Some("Diesel".to_string()),
            ..TransactionPatch::default()
        };
        assert!(check_transaction_patch(&current, &consistent).is_ok());

        let untouched = TransactionPatch {
            description: Some("Receipt lost".to_string()),
            ..TransactionPatch::default()
        };
        assert!(check_transaction_patch(&current, &untouched).is_ok());
    }
}
