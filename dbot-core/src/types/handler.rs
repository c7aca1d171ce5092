//! Handler / Middleware traits and transport conversion traits.

use async_trait::async_trait;

use super::{message::Message, response::HandlerResponse, step::Step, user::User};
use crate::bot::Presence;
use crate::error::Result;

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// The handler the chain resolved for a message, as seen by middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub handler: &'static str,
    /// Step the user was in when the message arrived.
    pub step: Step,
    /// Presence indicator the handler declared.
    pub presence: Option<Presence>,
}

/// One registry entry: a predicate, a body, and a side-effect declaration.
///
/// The chain calls `matches` on each handler in registration order and runs `handle` on the
/// first that returns true. `handle` must decide the next step ([`HandlerResponse::Stop`] keeps it).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Short stable name for logs and routes.
    fn name(&self) -> &'static str;

    /// Whether this handler claims the message given the user's current step.
    fn matches(&self, message: &Message, step: Step) -> bool;

    /// Presence indicator to show before the body runs. Default: typing.
    fn presence(&self) -> Option<Presence> {
        Some(Presence::Typing)
    }

    /// Processes the message.
    async fn handle(&self, message: &Message, step: Step) -> Result<HandlerResponse>;
}

/// Runs around the resolved handler: all `before` in order, the handler, then all `after` in reverse.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Runs before the handler body. Return false to stop the chain.
    async fn before(&self, _message: &Message, _route: &Route) -> Result<bool> {
        Ok(true)
    }

    /// Runs after the handler body succeeded.
    async fn after(
        &self,
        _message: &Message,
        _route: &Route,
        _response: &HandlerResponse,
    ) -> Result<()> {
        Ok(())
    }
}
