//! Draft validation for journal entries.
//!
//! A draft is checked in full before anything touches the database: the
//! caller either gets the all-clear or a map of every field that needs
//! fixing, keyed the way the entry form is laid out (entry fields by name,
//! line fields by line index).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;

use tasyir_types::primitives::{AccountId, PeriodId};

/// Debits and credits are considered equal when they differ by less than
/// this amount (currency rounding tolerance).
pub fn balance_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// An unsaved journal entry as submitted by a client.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryDraft {
    #[serde(default)]
    pub reference: String,
    pub entry_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    pub period_id: Option<PeriodId>,
    #[serde(default)]
    pub lines: Vec<JournalEntryLineDraft>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryLineDraft {
    pub account_id: Option<AccountId>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub debit: Decimal,
    #[serde(default)]
    pub credit: Decimal,
}

/// Every problem found in a draft, keyed by where it belongs on the form.
/// `fields` holds entry-level errors by field name, `lines` holds per-line
/// errors by line index then field name, and `form` holds the balance error
/// that belongs to the entry as a whole rather than any one field.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub fields: BTreeMap<String, String>,
    pub lines: BTreeMap<usize, BTreeMap<String, String>>,
    pub form: Option<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.lines.is_empty() && self.form.is_none()
    }

    fn field(&mut self, name: &str, message: &str) {
        self.fields.insert(name.to_string(), message.to_string());
    }

    fn line(&mut self, idx: usize, name: &str, message: &str) {
        self.lines
            .entry(idx)
            .or_default()
            .insert(name.to_string(), message.to_string());
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} field error(s), {} line(s) with errors",
            self.fields.len(),
            self.lines.len()
        )?;
        if let Some(form) = &self.form {
            write!(f, ", {form}")?;
        }
        Ok(())
    }
}

/// Sums the debit and credit columns of a draft.
pub fn totals(lines: &[JournalEntryLineDraft]) -> (Decimal, Decimal) {
    lines.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(debit, credit), line| (debit + line.debit, credit + line.credit),
    )
}

/// Checks a draft for submission. Returns all errors at once so a client
/// can surface every invalid field in a single pass. No error means the
/// entry may be posted as-is.
pub fn validate_draft(draft: &JournalEntryDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if draft.reference.trim().is_empty() {
        errors.field("reference", "Reference is required");
    }
    if draft.entry_date.is_none() {
        errors.field("entryDate", "Date is required");
    }
    if draft.description.trim().is_empty() {
        errors.field("description", "Description is required");
    }
    if draft.period_id.is_none() {
        errors.field("periodId", "Accounting period is required");
    }
    if draft.lines.is_empty() {
        errors.field("lines", "At least one line is required");
    }

    for (idx, line) in draft.lines.iter().enumerate() {
        if line.account_id.is_none() {
            errors.line(idx, "accountId", "Account is required");
        }
        if line.description.trim().is_empty() {
            errors.line(idx, "description", "Description is required");
        }
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            errors.line(idx, "amount", "Amounts must not be negative");
        } else if line.debit.is_zero() && line.credit.is_zero() {
            errors.line(idx, "amount", "Either a debit or a credit is required");
        } else if !line.debit.is_zero() && !line.credit.is_zero() {
            errors.line(
                idx,
                "amount",
                "A line cannot carry both a debit and a credit",
            );
        }
    }

    let (total_debit, total_credit) = totals(&draft.lines);
    let difference = (total_debit - total_credit).abs();
    if !draft.lines.is_empty() && difference >= balance_tolerance() {
        errors.form = Some(format!(
            "Entry is not balanced: debits {total_debit:.2}, credits {total_credit:.2}, difference {difference:.2}"
        ));
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
    use rust_decimal_macros::dec;

    fn line(debit: Decimal, credit: Decimal) -> JournalEntryLineDraft {
        JournalEntryLineDraft {
            account_id: Some(AccountId::new()),
            description: "line".to_string(),
            debit,
            credit,
        }
    }

    fn draft(lines: Vec<JournalEntryLineDraft>) -> JournalEntryDraft {
        JournalEntryDraft {
            reference: "JE-2024-001".to_string(),
            entry_date: Some("2024-06-15".parse().unwrap()),
            description: "Office supplies".to_string(),
            period_id: Some(PeriodId::new()),
            lines,
        }
    }

    #[test]
    fn balanced_entry_is_valid() {
        let draft = draft(vec![
            line(dec!(100), dec!(0)),
            line(dec!(0), dec!(100)),
        ]);
        assert!(validate_draft(&draft).is_ok());
    }

    #[test]
    fn balanced_within_tolerance_is_valid() {
        let draft = draft(vec![
            line(dec!(100.005), dec!(0)),
            line(dec!(0), dec!(100)),
        ]);
        assert!(validate_draft(&draft).is_ok());
    }

    #[test]
    fn unbalanced_entry_reports_difference() {
        let draft = draft(vec![
            line(dec!(100), dec!(0)),
            line(dec!(0), dec!(90)),
        ]);
        let errors = validate_draft(&draft).unwrap_err();
        assert!(errors.fields.is_empty());
        assert!(errors.lines.is_empty());
        let form = errors.form.unwrap();
        assert!(form.contains("difference 10.00"), "{form}");
    }

    #[test]
    fn both_sides_nonzero_flags_the_line() {
        let draft = draft(vec![
            line(dec!(100), dec!(50)),
            line(dec!(0), dec!(50)),
        ]);
        let errors = validate_draft(&draft).unwrap_err();
        assert!(errors.lines[&0].contains_key("amount"));
        assert!(!errors.lines.contains_key(&1));
    }

    #[test]
    fn both_sides_zero_flags_the_line() {
        let draft = draft(vec![
            line(dec!(100), dec!(0)),
            line(dec!(0), dec!(100)),
            line(dec!(0), dec!(0)),
        ]);
        let errors = validate_draft(&draft).unwrap_err();
        assert!(errors.lines[&2].contains_key("amount"));
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let draft = draft(vec![
            line(dec!(-100), dec!(0)),
            line(dec!(0), dec!(-100)),
        ]);
        let errors = validate_draft(&draft).unwrap_err();
        assert!(errors.lines[&0].contains_key("amount"));
        assert!(errors.lines[&1].contains_key("amount"));
    }

    #[test]
    fn missing_entry_fields_are_reported_by_name() {
        let mut empty = draft(vec![line(dec!(100), dec!(0)), line(dec!(0), dec!(100))]);
        empty.reference = "  ".to_string();
        empty.entry_date = None;
        empty.description = String::new();
        empty.period_id = None;
        let errors = validate_draft(&empty).unwrap_err();
        for field in ["reference", "entryDate", "description", "periodId"] {
            assert!(errors.fields.contains_key(field), "missing {field}");
        }
        assert!(errors.form.is_none());
    }

    #[test]
    fn missing_line_fields_are_keyed_by_index() {
        let mut d = draft(vec![line(dec!(100), dec!(0)), line(dec!(0), dec!(100))]);
        d.lines[1].account_id = None;
        d.lines[1].description = String::new();
        let errors = validate_draft(&d).unwrap_err();
        assert!(errors.lines[&1].contains_key("accountId"));
        assert!(errors.lines[&1].contains_key("description"));
        assert!(!errors.lines.contains_key(&0));
    }

    #[test]
    fn empty_line_list_is_an_error() {
        let draft = draft(vec![]);
        let errors = validate_draft(&draft).unwrap_err();
        assert!(errors.fields.contains_key("lines"));
        // An empty entry is trivially balanced; no balance error on top.
        assert!(errors.form.is_none());
    }

    #[test]
    fn totals_sum_both_columns() {
        let lines = vec![
            line(dec!(70), dec!(0)),
            line(dec!(30), dec!(0)),
            line(dec!(0), dec!(100)),
        ];
        assert_eq!(totals(&lines), (dec!(100), dec!(100)));
    }
}
