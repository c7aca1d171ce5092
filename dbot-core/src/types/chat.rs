//! Chat identity type for core messages.

use serde::{Deserialize, Serialize};

/// Chat (channel or private) identity. For private chats `username` is the peer's username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
    pub username: Option<String>,
}

impl Chat {
    /// Private chat with the given id and no username.
    pub fn private(id: i64) -> Self {
        Self {
            id,
            chat_type: "private".to_string(),
            username: None,
        }
    }
}
