use async_trait::async_trait;
use dbot_core::{HandlerResponse, Message, Middleware, Result, Route};
use tracing::{debug, info, instrument};

/// Logs each routed message in before() and the response in after(); always continues.
pub struct LoggingMiddleware;

#[async_trait]
impl Middleware for LoggingMiddleware {
    #[instrument(skip(self, message, route))]
    async fn before(&self, message: &Message, route: &Route) -> Result<bool> {
        info!(
            user_id = message.user_id(),
            username = %message.display_name(),
            handler = %route.handler,
            step = %route.step,
            text = %message.text().unwrap_or(""),
            has_location = message.location.is_some(),
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, route, response))]
    async fn after(
        &self,
        message: &Message,
        route: &Route,
        response: &HandlerResponse,
    ) -> Result<()> {
        debug!(
            message_id = %message.id,
            handler = %route.handler,
            response = ?response,
            "Processed message"
        );
        Ok(())
    }
}
