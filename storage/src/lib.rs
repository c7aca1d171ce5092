//! Storage crate: per-user conversation state.
//!
//! ## Modules
//!
//! - [`state_store`] – ConversationStateStore (step per user, known users, per-user locking)

mod state_store;

pub use state_store::{ConversationStateStore, StepGuard};
