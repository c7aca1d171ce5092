//! Per-user conversation step.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a user is in a multi-turn interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Step {
    /// No pending prompt.
    #[default]
    Idle,
    /// `/country` was sent; the next free text is a country name.
    AwaitingCountryName,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Idle => "idle",
            Step::AwaitingCountryName => "awaiting_country_name",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
