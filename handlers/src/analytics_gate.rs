//! Privileged analytics requests hidden in ordinary text.
//!
//! A message whose first `pass_char_count` characters equal the key is an analytics request; the
//! rest of the text, split on whitespace, is the token list. The comparison is plain string
//! equality, so it is not timing-safe.

use dbot_core::{AnalyticsMode, AnalyticsQuery, UserId};

/// Token that selects file output.
pub const FILE_MODE_TOKEN: &str = "txt";

/// Prefix/key policy for the analytics channel. A gate without a key never matches.
#[derive(Clone, Default)]
pub struct AnalyticsGate {
    key: Option<GateKey>,
}

#[derive(Clone)]
struct GateKey {
    pass_char_count: usize,
    stat_key: String,
}

impl std::fmt::Debug for AnalyticsGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsGate")
            .field("enabled", &self.is_enabled())
            .field(
                "pass_char_count",
                &self.key.as_ref().map(|k| k.pass_char_count),
            )
            .finish()
    }
}

impl AnalyticsGate {
    pub fn new(pass_char_count: usize, stat_key: impl Into<String>) -> Self {
        Self {
            key: Some(GateKey {
                pass_char_count,
                stat_key: stat_key.into(),
            }),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.key.is_some()
    }

    /// Parses `text` into an analytics query, or None when the prefix does not match the key.
    pub fn parse(&self, user_id: UserId, text: &str) -> Option<AnalyticsQuery> {
        let key = self.key.as_ref()?;
        let split = text
            .char_indices()
            .nth(key.pass_char_count)
            .map_or(text.len(), |(i, _)| i);
        let (prefix, rest) = text.split_at(split);
        if prefix != key.stat_key {
            return None;
        }

        let tokens: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
        let mode = if tokens.iter().any(|t| t == FILE_MODE_TOKEN) {
            AnalyticsMode::File
        } else {
            AnalyticsMode::Inline
        };
        Some(AnalyticsQuery {
            user_id,
            tokens,
            mode,
        })
    }
}
