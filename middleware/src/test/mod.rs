//! Unit test module
//!
//! Middleware unit tests live here, separate from source files.
//! Tests interact with middleware via public and pub(crate) APIs.


use dbot_core::{Chat, Message, Presence, Route, Step, User};

pub(crate) fn sample_message(chat_id: i64, text: &str) -> Message {
    Message::new(
        "msg-1",
        User {
            id: 1,
            username: Some("testuser".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        Chat::private(chat_id),
    )
    .with_text(text)
}

pub(crate) fn route(handler: &'static str, presence: Option<Presence>) -> Route {
    Route {
        handler,
        step: Step::Idle,
        presence,
    }
}
