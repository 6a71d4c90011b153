//! Data models
//!
//! Shared between booking-server, the inspection tool and frontend (via API).
//! Wire form is camelCase; storage documents live in the server crate.

pub mod consultation;
pub mod restaurant;

// Re-exports
pub use consultation::*;
pub use restaurant::*;
