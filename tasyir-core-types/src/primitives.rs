use serde::{Deserialize, Serialize};

crate::entity_id! { AccountId }
crate::entity_id! { DepartmentId }
crate::entity_id! { EmployeeId }
crate::entity_id! { JournalEntryId }
crate::entity_id! { PeriodId }
crate::entity_id! { PositionId }
crate::entity_id! { SessionId }
crate::entity_id! { StockCategoryId }
crate::entity_id! { StockItemId }
crate::entity_id! { SupplierId }
crate::entity_id! { UserId }

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "DebitOrCredit", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DebitOrCredit {
    Debit,
    Credit,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "Status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Active,
    Inactive,
}

impl Default for Status {
    fn default() -> Self {
        Self::Active
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "PeriodStatus", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PeriodStatus {
    Open,
    Closed,
}

impl Default for PeriodStatus {
    fn default() -> Self {
        Self::Open
    }
}

#[derive(
    Debug,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    sqlx::Type,
    strum::Display,
    strum::EnumString,
)]
#[sqlx(type_name = "Role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    Admin,
    Accountant,
    Hr,
    StockManager,
}

/// SCF account classes, keyed by the leading digit of the account code.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AccountClass {
    Capitaux,
    Immobilisations,
    Stocks,
    Tiers,
    Financier,
    Charges,
    Produits,
    Speciaux,
}

/// An SCF chart-of-accounts code: 1 to 8 ASCII digits, where the leading
/// digit selects the account class. Deserialization goes through the same
/// digit rules as `FromStr`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(transparent)]
#[serde(try_from = "String")]
pub struct AccountCode(String);

impl TryFrom<String> for AccountCode {
    type Error = ParseAccountCodeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl AccountCode {
    pub fn class(&self) -> AccountClass {
        match self.0.as_bytes()[0] {
            b'1' => AccountClass::Capitaux,
            b'2' => AccountClass::Immobilisations,
            b'3' => AccountClass::Stocks,
            b'4' => AccountClass::Tiers,
            b'5' => AccountClass::Financier,
            b'6' => AccountClass::Charges,
            b'7' => AccountClass::Produits,
            _ => AccountClass::Speciaux,
        }
    }

    /// A sub-account code strictly extends its parent's digit prefix.
    pub fn is_child_of(&self, parent: &AccountCode) -> bool {
        self.0.len() > parent.0.len() && self.0.starts_with(&parent.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for AccountCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseAccountCodeError {
    #[error("Account code must not be empty.")]
    Empty,
    #[error("Account code must be 8 digits or less.")]
    TooLong,
    #[error("Account code must contain only digits.")]
    NotNumeric,
    #[error("Account code class digit must not be 0.")]
    ZeroClass,
}

impl std::str::FromStr for AccountCode {
    type Err = ParseAccountCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            Err(ParseAccountCodeError::Empty)
        } else if s.len() > 8 {
            Err(ParseAccountCodeError::TooLong)
        } else if !s.bytes().all(|b| b.is_ascii_digit()) {
            Err(ParseAccountCodeError::NotNumeric)
        } else if s.starts_with('0') {
            Err(ParseAccountCodeError::ZeroClass)
        } else {
            Ok(AccountCode(s.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_code_parses_and_classifies() {
        let code: AccountCode = "512".parse().unwrap();
        assert_eq!(code.class(), AccountClass::Financier);
        let code: AccountCode = "701".parse().unwrap();
        assert_eq!(code.class(), AccountClass::Produits);
    }

    #[test]
    fn account_code_rejects_bad_input() {
        assert_eq!(
            "".parse::<AccountCode>(),
            Err(ParseAccountCodeError::Empty)
        );
        assert_eq!(
            "123456789".parse::<AccountCode>(),
            Err(ParseAccountCodeError::TooLong)
        );
        assert_eq!(
            "51a".parse::<AccountCode>(),
            Err(ParseAccountCodeError::NotNumeric)
        );
        assert_eq!(
            "012".parse::<AccountCode>(),
            Err(ParseAccountCodeError::ZeroClass)
        );
    }

    #[test]
    fn account_code_deserialization_applies_digit_rules() {
        assert!(serde_json::from_str::<AccountCode>(r#""""#).is_err());
        assert!(serde_json::from_str::<AccountCode>(r#""abc""#).is_err());
        assert!(serde_json::from_str::<AccountCode>(r#""012""#).is_err());
        let code: AccountCode = serde_json::from_str(r#""411""#).unwrap();
        assert_eq!(code.class(), AccountClass::Tiers);
        assert_eq!(serde_json::to_string(&code).unwrap(), r#""411""#);
    }

    #[test]
    fn sub_account_extends_parent_prefix() {
        let parent: AccountCode = "41".parse().unwrap();
        let child: AccountCode = "411".parse().unwrap();
        let other: AccountCode = "421".parse().unwrap();
        assert!(child.is_child_of(&parent));
        assert!(!other.is_child_of(&parent));
        assert!(!parent.is_child_of(&parent));
    }
}
