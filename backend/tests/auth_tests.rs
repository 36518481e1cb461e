//! Authentication and authorization tests
//!
//! Role capability checks, credential validation rules, password hashing,
//! and JWT round trips.

use proptest::prelude::*;
use std::str::FromStr;

use shared::models::Role;
use shared::validation;

// ============================================================================
// Role Tests
// ============================================================================

#[cfg(test)]
mod role_tests {
    use super::*;

    #[test]
    fn manager_can_do_everything() {
        let role = Role::Manager;
        assert!(role.can_manage_master_data());
        assert!(role.can_view_reports());
        assert!(role.can_delete_transactions());
    }

    #[test]
    fn staff_is_limited_to_daily_entry() {
        let role = Role::Staff;
        assert!(!role.can_manage_master_data());
        assert!(!role.can_view_reports());
        assert!(!role.can_delete_transactions());
    }

    #[test]
    fn role_round_trips_through_storage_form() {
        for role in [Role::Manager, Role::Staff] {
            assert_eq!(Role::from_str(role.as_str()), Ok(role));
        }
    }

    #[test]
    fn unknown_role_fails_to_parse() {
        assert!(Role::from_str("admin").is_err());
        assert!(Role::from_str("Manager").is_err());
    }
}

// ============================================================================
// Credential Validation Tests
// ============================================================================

#[cfg(test)]
mod credential_tests {
    use super::*;

    #[test]
    fn valid_usernames_pass() {
        assert!(validation::validate_username("admin").is_ok());
        assert!(validation::validate_username("kasir_2").is_ok());
    }

    #[test]
    fn short_and_long_usernames_fail() {
        assert!(validation::validate_username("ab").is_err());
        assert!(validation::validate_username(&"a".repeat(31)).is_err());
    }

    #[test]
    fn usernames_with_symbols_fail() {
        assert!(validation::validate_username("admin!").is_err());
        assert!(validation::validate_username("a b c").is_err());
    }

    #[test]
    fn password_must_have_minimum_length() {
        assert!(validation::validate_password("short").is_err());
        assert!(validation::validate_password("longenough").is_ok());
    }
}

// ============================================================================
// Password Hashing Tests
// ============================================================================

#[cfg(test)]
mod hashing_tests {
    #[test]
    fn hash_verifies_against_original_password() {
        let hash = bcrypt::hash("admin123", 4).unwrap();
        assert!(bcrypt::verify("admin123", &hash).unwrap());
        assert!(!bcrypt::verify("wrong", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let first = bcrypt::hash("staff123", 4).unwrap();
        let second = bcrypt::hash("staff123", 4).unwrap();
        // Same password, different salt, different hash
        assert_ne!(first, second);
    }
}

// ============================================================================
// JWT Tests
// ============================================================================

#[cfg(test)]
mod jwt_tests {
    use chrono::Utc;
    use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Claims {
        sub: String,
        username: String,
        role: String,
        exp: i64,
        iat: i64,
    }

    fn claims(expiry_offset: i64) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: uuid::Uuid::new_v4().to_string(),
            username: "admin".to_string(),
            role: "manager".to_string(),
            exp: now + expiry_offset,
            iat: now,
        }
    }

    #[test]
    fn token_round_trips_with_correct_secret() {
        let claims = claims(3600);
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.username, "admin");
        assert_eq!(decoded.claims.role, "manager");
        assert_eq!(decoded.claims.sub, claims.sub);
    }

    #[test]
    fn token_fails_with_wrong_secret() {
        let token = encode(
            &Header::default(),
            &claims(3600),
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"other-secret"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = encode(
            &Header::default(),
            &claims(-3600),
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// Username validation accepts exactly the documented shape.
        #[test]
        fn prop_username_validation_matches_rules(name in "[a-zA-Z0-9_]{1,40}") {
            let valid = name.len() >= 3 && name.len() <= 30;
            prop_assert_eq!(validation::validate_username(&name).is_ok(), valid);
        }

        /// Password validation is purely a length check.
        #[test]
        fn prop_password_validation_is_length_check(password in ".{0,20}") {
            prop_assert_eq!(
                validation::validate_password(&password).is_ok(),
                password.len() >= 8
            );
        }
    }
}
