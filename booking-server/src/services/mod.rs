//! Business services
//!
//! Services own the rules; repositories only talk to the store.

pub mod consultation;

pub use consultation::ConsultationService;
