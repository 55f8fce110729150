//! Ticket Triage Policy
//!
//! Decides what happens to a classified ticket and carries it out.
//!
//! - [`ActionRouter`] maps confidence to auto-apply, suggest or manual
//! - [`ActionExecutor`] performs the routed action against a [`TicketSink`]
//! - [`JsonLinesSink`] records decisions to a local JSONL file

pub mod executor;
pub mod router;
pub mod sink;

pub use executor::{audit_comment, suggestion_comment, ActionExecutor, ActionOutcome, TicketSink};
pub use router::{ActionRouter, Thresholds};
pub use sink::{DecisionRecord, JsonLinesSink};
pub use triage_core::Action;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::executor::{ActionExecutor, ActionOutcome, TicketSink};
    pub use crate::router::{ActionRouter, Thresholds};
    pub use crate::sink::JsonLinesSink;
    pub use triage_core::Action;
}
