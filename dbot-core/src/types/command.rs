//! Bot commands recognised in message text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HandlerError;

/// Explicit commands the bot routes on. Any other `/word` is treated as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Start,
    Country,
    Location,
    Statistics,
    Help,
    Contacts,
}

impl Command {
    /// Command name without the leading slash.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Country => "country",
            Command::Location => "location",
            Command::Statistics => "statistics",
            Command::Help => "help",
            Command::Contacts => "contacts",
        }
    }

    /// Parses the leading command token of a message, e.g. `/help` or `/help@my_bot extra`.
    /// Returns None for plain text and for unknown commands.
    pub fn parse(text: &str) -> Option<Self> {
        let token = text.split_whitespace().next()?;
        let name = token.strip_prefix('/')?;
        let name = name.split_once('@').map_or(name, |(name, _bot)| name);
        name.parse().ok()
    }
}

impl FromStr for Command {
    type Err = HandlerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Command::Start),
            "country" => Ok(Command::Country),
            "location" => Ok(Command::Location),
            "statistics" => Ok(Command::Statistics),
            "help" => Ok(Command::Help),
            "contacts" => Ok(Command::Contacts),
            other => Err(HandlerError::State(format!("unknown command: {}", other))),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.name())
    }
}
