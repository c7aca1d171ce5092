//! User identity type for core messages.

use serde::{Deserialize, Serialize};

/// Key of a conversation. The bot keys state by chat id, so this is the chat id.
pub type UserId = i64;

/// User identity (id, username, names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// User with only an id set.
    pub fn anonymous(id: i64) -> Self {
        Self {
            id,
            username: None,
            first_name: None,
            last_name: None,
        }
    }
}
