use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbotError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("No text in message")]
    NoText,

    #[error("No location in message")]
    NoLocation,

    #[error("State error: {0}")]
    State(String),
}

/// Failures raised by the external collaborators (geolocation, statistics, analytics, templates).
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Lookup error: {0}")]
    Lookup(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),
}

pub type Result<T> = std::result::Result<T, DbotError>;
