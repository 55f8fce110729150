//! Ticket Triage Core
//!
//! Core types and error handling shared across the triage components.
//!
//! This crate provides:
//! - The closed category and priority sets with their support-group mapping
//! - The classification record produced by the engine
//! - The routing action derived from confidence
//! - Error types, including the recoverable prediction fault taxonomy

pub mod error;
pub mod types;

pub use error::{Error, PredictionFault, Result};
pub use types::{
    Action, Category, ClassificationResult, Method, Priority, TicketText, FIRST_LINE_GROUP,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, PredictionFault, Result};
    pub use crate::types::{Action, Category, ClassificationResult, Method, Priority, TicketText};
}
