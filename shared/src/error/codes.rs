//! Unified error codes for the booking platform
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Consultation errors
//! - 5xxx: Restaurant errors (profiles, spaces)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Consultation ====================
    /// Consultation not found
    ConsultationNotFound = 4001,
    /// Status is not part of the consultation lifecycle
    InvalidConsultationStatus = 4002,
    /// Date range is malformed or inverted
    InvalidDateRange = 4003,
    /// Specialist id/name missing on assignment
    SpecialistRequired = 4004,

    // ==================== 5xxx: Restaurant ====================
    /// Restaurant profile not found
    RestaurantNotFound = 5001,
    /// Collection not found under any known name
    CollectionNotFound = 5002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Operation timeout
    TimeoutError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Consultation
            ErrorCode::ConsultationNotFound => "Consultation not found",
            ErrorCode::InvalidConsultationStatus => "Invalid consultation status",
            ErrorCode::InvalidDateRange => "Invalid date range",
            ErrorCode::SpecialistRequired => "Specialist id and name are required",

            // Restaurant
            ErrorCode::RestaurantNotFound => "Restaurant profile not found",
            ErrorCode::CollectionNotFound => "Collection not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::TimeoutError => "Operation timed out",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Consultation
            4001 => Ok(ErrorCode::ConsultationNotFound),
            4002 => Ok(ErrorCode::InvalidConsultationStatus),
            4003 => Ok(ErrorCode::InvalidDateRange),
            4004 => Ok(ErrorCode::SpecialistRequired),

            // Restaurant
            5001 => Ok(ErrorCode::RestaurantNotFound),
            5002 => Ok(ErrorCode::CollectionNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9004 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip_through_u16() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::ConsultationNotFound,
            ErrorCode::InvalidConsultationStatus,
            ErrorCode::RestaurantNotFound,
            ErrorCode::CollectionNotFound,
            ErrorCode::DatabaseError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_unknown_value_rejected() {
        assert_eq!(ErrorCode::try_from(4999), Err(InvalidErrorCode(4999)));
        assert_eq!(ErrorCode::try_from(0), Err(InvalidErrorCode(0)));
    }

    #[test]
    fn test_display_format() {
        assert_eq!(ErrorCode::ValidationFailed.to_string(), "E0002");
        assert_eq!(ErrorCode::ConsultationNotFound.to_string(), "E4001");
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&ErrorCode::ConsultationNotFound).unwrap();
        assert_eq!(json, "4001");
    }
}
