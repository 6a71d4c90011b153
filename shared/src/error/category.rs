//! Error category and kind classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// - 0xxx: General errors
/// - 4xxx: Consultation errors
/// - 5xxx: Restaurant errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Consultation errors (4xxx)
    Consultation,
    /// Restaurant errors (5xxx)
    Restaurant,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            4000..5000 => Self::Consultation,
            5000..6000 => Self::Restaurant,
            9000.. => Self::System,
            _ => Self::General,
        }
    }
}

/// What went wrong, independent of which resource it happened to.
///
/// Callers branch on the kind; the code carries the precise reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad or missing input (4xx)
    Validation,
    /// Referenced identifier does not exist (404)
    NotFound,
    /// Store unreachable or query failed (5xx)
    Persistence,
    /// Anything else on the server side (5xx)
    Internal,
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }

    /// Get the kind for this error code
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound
            | Self::ConsultationNotFound
            | Self::RestaurantNotFound
            | Self::CollectionNotFound => ErrorKind::NotFound,
            Self::DatabaseError | Self::TimeoutError => ErrorKind::Persistence,
            Self::InternalError => ErrorKind::Internal,
            _ => ErrorKind::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(2), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Consultation);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Restaurant);
        assert_eq!(ErrorCategory::from_code(9002), ErrorCategory::System);
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(ErrorCode::ValidationFailed.kind(), ErrorKind::Validation);
        assert_eq!(
            ErrorCode::InvalidConsultationStatus.kind(),
            ErrorKind::Validation
        );
        assert_eq!(ErrorCode::ConsultationNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(ErrorCode::DatabaseError.kind(), ErrorKind::Persistence);
        assert_eq!(ErrorCode::InternalError.kind(), ErrorKind::Internal);
    }
}
