//! Domain entities of the records system.
//!
//! Entities are plain values owned by callers. Each one can check itself with
//! [`Validate::validate_basic`]; DAOs run that check before issuing any write.

pub mod academic;
pub mod finance;
pub mod login;
pub mod user;

pub use academic::{Course, CourseResult, Enrollment, Faculty, UNGRADED};
pub use finance::{FeeRecord, SalaryRecord};
pub use login::Login;
pub use user::{Birthday, Role, Student, Teacher, UserProfile, UserStatus};

/// Outcome of an entity self-check; the error is a readable reason.
pub type ValidationResult = Result<(), String>;

/// Business-rule self-check run before an entity reaches storage.
pub trait Validate {
    fn validate_basic(&self) -> ValidationResult;
}

/// Identifiers are non-empty and contain no whitespace.
pub(crate) fn check_id(field: &str, value: &str) -> ValidationResult {
    if value.is_empty() {
        return Err(format!("{} must not be empty", field));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(format!("{} must not contain whitespace: '{}'", field, value));
    }
    Ok(())
}

pub(crate) fn check_not_blank(field: &str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(format!("{} must not be blank", field));
    }
    Ok(())
}

pub(crate) fn check_non_negative(field: &str, value: f64) -> ValidationResult {
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{} must be a non-negative amount, got {}", field, value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_id() {
        assert!(check_id("id", "S001").is_ok());
        assert!(check_id("id", "").is_err());
        assert!(check_id("id", "S 001").unwrap_err().contains("whitespace"));
    }

    #[test]
    fn test_check_non_negative() {
        assert!(check_non_negative("fee", 0.0).is_ok());
        assert!(check_non_negative("fee", -0.5).is_err());
        assert!(check_non_negative("fee", f64::NAN).is_err());
    }
}
