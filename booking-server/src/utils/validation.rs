//! Input validation helpers
//!
//! Centralized text length constants and validation functions for
//! consultation payloads.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Identifiers and short labels: customer id, event type, budget range
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Person names (customer, specialist)
pub const MAX_NAME_LEN: usize = 200;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Status-change notes
pub const MAX_NOTE_LEN: usize = 500;

/// Free-form event details
pub const MAX_DETAILS_LEN: usize = 2000;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-blank and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    check_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value {
        check_len(v, field, max_len)?;
    }
    Ok(())
}

fn check_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.trim().chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Trim, turning blank strings into `None`
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("C1", "customerId", MAX_SHORT_TEXT_LEN).is_ok());
        let err = validate_required_text("   ", "customerId", MAX_SHORT_TEXT_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        let err = validate_required_text(&"x".repeat(101), "eventType", MAX_SHORT_TEXT_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        let value = Some("预订".repeat(50));
        assert!(validate_optional_text(&value, "notes", MAX_SHORT_TEXT_LEN).is_ok());
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(Some("  a ".into())), Some("a".into()));
        assert_eq!(normalize_optional(Some("   ".into())), None);
        assert_eq!(normalize_optional(None), None);
    }
}
