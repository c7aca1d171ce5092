//! Middleware run by the handler chain around the resolved handler.

mod logging;
mod presence;

#[cfg(test)]
mod test;

pub use logging::LoggingMiddleware;
pub use presence::PresenceMiddleware;
