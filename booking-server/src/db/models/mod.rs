//! Database Models
//!
//! Storage documents; converted into `shared::models` types at the repository edge.

pub mod consultation;

// Re-exports
pub use consultation::{AssignmentPatch, ConsultationDocument, StatusPatch};
