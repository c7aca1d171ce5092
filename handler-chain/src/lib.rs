//! # Handler chain
//!
//! Dispatches each inbound message to exactly one handler. The user's step is locked for the
//! whole run; handlers are tried in registration order and the first whose predicate matches is
//! selected (the fallback, if any, is tried last). Middleware `before` runs in order ahead of the
//! handler body (any false stops the chain); once the body succeeds its transition is written back
//! to the state store and middleware `after` runs in reverse.
//!
//! Handler errors are not caught here: they propagate to the caller and leave the step unchanged.

use dbot_core::{Handler, HandlerResponse, Message, Middleware, Result, Route, Step};
use std::sync::Arc;
use storage::ConversationStateStore;
use tracing::{debug, info, instrument};

/// Ordered handler registry plus middleware, bound to a conversation state store.
#[derive(Clone)]
pub struct HandlerChain {
    states: Arc<ConversationStateStore>,
    middleware: Vec<Arc<dyn Middleware>>,
    handlers: Vec<Arc<dyn Handler>>,
    fallback: Option<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain (no middleware, no handlers) over the given state store.
    pub fn new(states: Arc<ConversationStateStore>) -> Self {
        Self {
            states,
            middleware: Vec::new(),
            handlers: Vec::new(),
            fallback: None,
        }
    }

    /// Appends a middleware (before runs in order, after in reverse).
    pub fn add_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Appends a handler. Earlier handlers win when several match.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Sets the catch-all handler, evaluated after every registered handler.
    pub fn set_fallback(mut self, handler: Arc<dyn Handler>) -> Self {
        self.fallback = Some(handler);
        self
    }

    pub fn states(&self) -> &Arc<ConversationStateStore> {
        &self.states
    }

    /// Names of the handlers in evaluation order, fallback last.
    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers
            .iter()
            .chain(self.fallback.iter())
            .map(|h| h.name())
            .collect()
    }

    /// First handler whose predicate matches the message in the given step.
    pub fn resolve(&self, message: &Message, step: Step) -> Option<&Arc<dyn Handler>> {
        self.handlers
            .iter()
            .chain(self.fallback.iter())
            .find(|h| h.matches(message, step))
    }

    /// Dispatches one message. Returns [`HandlerResponse::Ignore`] when no handler matched or a
    /// middleware stopped the chain; otherwise the handler's response.
    #[instrument(skip(self, message), fields(user_id = message.user_id()))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let mut state = self.states.lock(message.user_id()).await;
        let step = state.step();

        info!(
            user_id = message.user_id(),
            message_id = %message.id,
            step = %step,
            "step: handler_chain started"
        );

        let Some(handler) = self.resolve(message, step) else {
            info!(
                user_id = message.user_id(),
                step = %step,
                "step: no handler matched, message ignored"
            );
            return Ok(HandlerResponse::Ignore);
        };

        let route = Route {
            handler: handler.name(),
            step,
            presence: handler.presence(),
        };

        for mw in &self.middleware {
            let mw_name = std::any::type_name_of_val(mw.as_ref());
            debug!(
                user_id = message.user_id(),
                middleware = %mw_name,
                "step: middleware before"
            );
            if !mw.before(message, &route).await? {
                info!(
                    user_id = message.user_id(),
                    middleware = %mw_name,
                    "step: middleware before returned false, chain stopped"
                );
                return Ok(HandlerResponse::Ignore);
            }
        }

        info!(
            user_id = message.user_id(),
            handler = %route.handler,
            "step: handler processing"
        );
        let response = handler.handle(message, step).await?;
        let next = response.next_step(step);
        state.set(next);
        info!(
            user_id = message.user_id(),
            handler = %route.handler,
            response = ?response,
            next_step = %next,
            "step: handler done"
        );

        for mw in self.middleware.iter().rev() {
            let mw_name = std::any::type_name_of_val(mw.as_ref());
            debug!(
                user_id = message.user_id(),
                middleware = %mw_name,
                "step: middleware after"
            );
            mw.after(message, &route, &response).await?;
        }

        info!(
            user_id = message.user_id(),
            message_id = %message.id,
            "step: handler_chain finished"
        );

        Ok(response)
    }
}

// Unit/integration tests live in tests/handler_chain_test.rs
