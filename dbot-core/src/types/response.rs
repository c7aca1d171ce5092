//! Handler chain result type.

use super::step::Step;

/// What a handler did with a message, including the step transition it decided on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Handled; the step is left unchanged.
    Stop,
    /// Handled; the step moves to the given value.
    Transition(Step),
    /// Nothing claimed the message (no handler matched or a middleware stopped the chain).
    Ignore,
}

impl HandlerResponse {
    /// Step the user ends up in when this response is applied to `current`.
    pub fn next_step(&self, current: Step) -> Step {
        match self {
            HandlerResponse::Transition(next) => *next,
            HandlerResponse::Stop | HandlerResponse::Ignore => current,
        }
    }
}
