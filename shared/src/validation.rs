//! Validation rules for postings and master data
//!
//! All entry-time checks live here so the backend services and the tests
//! exercise the same rules.

use rust_decimal::Decimal;

use crate::models::Account;

/// Minimum description length for a journal posting
pub const MIN_DESCRIPTION_LEN: usize = 3;

/// Validate a posting amount: strictly positive
pub fn validate_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount <= Decimal::ZERO {
        return Err("Amount must be positive");
    }
    Ok(())
}

/// Validate a posting description
pub fn validate_description(description: &str) -> Result<(), &'static str> {
    if description.trim().len() < MIN_DESCRIPTION_LEN {
        return Err("Description must be at least 3 characters");
    }
    Ok(())
}

/// Debit and credit legs must name different accounts
pub fn validate_distinct_legs(debit: &str, credit: &str) -> Result<(), &'static str> {
    if debit == credit {
        return Err("Debit and credit accounts must differ");
    }
    Ok(())
}

/// Combined entry-time validation for a journal posting. Account existence
/// is checked separately against the chart of accounts.
pub fn validate_posting(
    description: &str,
    debit: &str,
    credit: &str,
    amount: Decimal,
) -> Result<(), &'static str> {
    validate_description(description)?;
    validate_distinct_legs(debit, credit)?;
    validate_amount(amount)?;
    Ok(())
}

/// Both legs must exist in the chart of accounts
pub fn validate_legs_exist<'a>(
    accounts: &[Account],
    debit: &'a str,
    credit: &'a str,
) -> Result<(), &'a str> {
    for leg in [debit, credit] {
        if !accounts.iter().any(|a| a.name == leg) {
            return Err(leg);
        }
    }
    Ok(())
}

/// Validate a stock movement quantity: strictly positive
pub fn validate_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// Unit prices may be zero (standard cost applies) but never negative
pub fn validate_unit_price(unit_price: Decimal) -> Result<(), &'static str> {
    if unit_price < Decimal::ZERO {
        return Err("Unit price cannot be negative");
    }
    Ok(())
}

/// Validate an account or item code: short, uppercase alphanumeric with
/// dashes (e.g. "1-11", "PKN-MERAH")
pub fn validate_code(code: &str) -> Result<(), &'static str> {
    if code.is_empty() || code.len() > 20 {
        return Err("Code must be 1-20 characters");
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("Code must be uppercase alphanumeric with dashes");
    }
    Ok(())
}

/// Validate a username: 3-30 word characters
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 3 || username.len() > 30 {
        return Err("Username must be 3-30 characters");
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err("Username must be alphanumeric");
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountType;
    use proptest::prelude::*;

    fn account(name: &str) -> Account {
        Account {
            code: "1-11".to_string(),
            name: name.to_string(),
            account_type: AccountType::Asset,
            is_contra: false,
            cost_category: None,
        }
    }

    #[test]
    fn test_validate_amount_boundary() {
        assert!(validate_amount(Decimal::ZERO).is_err());
        assert!(validate_amount(Decimal::new(1, 2)).is_ok());
        assert!(validate_amount(Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn test_validate_description_trims_whitespace() {
        assert!(validate_description("   ab   ").is_err());
        assert!(validate_description("abc").is_ok());
    }

    #[test]
    fn test_validate_legs_exist_reports_missing_leg() {
        let chart = vec![account("Kas"), account("Bank Mandiri")];
        assert!(validate_legs_exist(&chart, "Kas", "Bank Mandiri").is_ok());
        assert_eq!(validate_legs_exist(&chart, "Kas", "Missing"), Err("Missing"));
        assert_eq!(validate_legs_exist(&chart, "Missing", "Kas"), Err("Missing"));
    }

    #[test]
    fn test_validate_unit_price_allows_zero() {
        assert!(validate_unit_price(Decimal::ZERO).is_ok());
        assert!(validate_unit_price(Decimal::new(-1, 0)).is_err());
    }

    proptest! {
        #[test]
        fn prop_posting_rejects_equal_legs(name in "[A-Za-z ]{1,20}") {
            prop_assert!(validate_posting("valid description", &name, &name, Decimal::ONE).is_err());
        }

        #[test]
        fn prop_valid_codes_accepted(code in "[A-Z0-9][A-Z0-9-]{0,19}") {
            prop_assert!(validate_code(&code).is_ok());
        }
    }
}
