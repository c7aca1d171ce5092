//! Unit test module
//!
//! Handler unit tests live here, separate from source files.
//! Tests interact with handlers via public and pub(crate) APIs and in-memory fakes.

mod commands_test;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dbot_core::{
    AnalyticsBackend, AnalyticsQuery, AnalyticsReport, Bot, Chat, CountryInfo, CountryLookup,
    DbotError, KeyboardButton, Message, Presence, Result, ServiceError, StatisticsGateway,
    TemplateRenderer, TextFormat, User, UserId,
};

use crate::Services;

/// One outbound call recorded by [`MockBot`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Sent {
    Text(i64, String, TextFormat),
    Document(i64, PathBuf),
    Presence(i64, Presence),
    Keyboard(i64, String, Vec<KeyboardButton>),
}

/// Bot that records every call in order. Recorded calls still fail when the matching
/// `fail_*` flag is set.
#[derive(Default)]
pub(crate) struct MockBot {
    pub sent: Mutex<Vec<Sent>>,
    pub fail_documents: bool,
    pub fail_presence: bool,
}

impl MockBot {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text(_, text, _) => Some(text),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_text(&self, chat: &Chat, text: &str, format: TextFormat) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Text(chat.id, text.to_string(), format));
        Ok(())
    }

    async fn send_document(&self, chat: &Chat, path: &Path) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Document(chat.id, path.to_path_buf()));
        if self.fail_documents {
            return Err(DbotError::Bot("upload failed".to_string()));
        }
        Ok(())
    }

    async fn send_presence(&self, chat: &Chat, presence: Presence) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Presence(chat.id, presence));
        if self.fail_presence {
            return Err(DbotError::Bot("chat action failed".to_string()));
        }
        Ok(())
    }

    async fn send_keyboard_prompt(
        &self,
        chat: &Chat,
        text: &str,
        buttons: &[KeyboardButton],
    ) -> Result<()> {
        self.sent.lock().unwrap().push(Sent::Keyboard(
            chat.id,
            text.to_string(),
            buttons.to_vec(),
        ));
        Ok(())
    }
}

/// Resolves every coordinate to one fixed country, or fails when `country` is None.
pub(crate) struct FakeCountries {
    pub country: Option<String>,
    pub calls: Mutex<Vec<(f64, f64)>>,
}

impl FakeCountries {
    pub fn resolving(name: &str) -> Self {
        Self {
            country: Some(name.to_string()),
            calls: Mutex::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            country: None,
            calls: Mutex::default(),
        }
    }
}

#[async_trait]
impl CountryLookup for FakeCountries {
    async fn resolve(&self, latitude: f64, longitude: f64) -> Result<CountryInfo> {
        self.calls.lock().unwrap().push((latitude, longitude));
        match &self.country {
            Some(name) => Ok(CountryInfo {
                country_name: name.clone(),
                country_code: None,
            }),
            None => Err(ServiceError::Lookup("no country at these coordinates".to_string()).into()),
        }
    }
}

/// Formats replies from its arguments and records `by_country` calls.
#[derive(Default)]
pub(crate) struct FakeStatistics {
    pub unavailable: bool,
    pub by_country_calls: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl StatisticsGateway for FakeStatistics {
    async fn by_country(&self, country_name: &str, requester: &str) -> Result<String> {
        if self.unavailable {
            return Err(ServiceError::BackendUnavailable("statistics".to_string()).into());
        }
        self.by_country_calls
            .lock()
            .unwrap()
            .push((country_name.to_string(), requester.to_string()));
        Ok(format!("<b>{}</b> stats", country_name))
    }

    async fn aggregate(&self) -> Result<String> {
        if self.unavailable {
            return Err(ServiceError::BackendUnavailable("statistics".to_string()).into());
        }
        Ok("<b>all</b> queries".to_string())
    }
}

/// Answers inline queries with the joined tokens; file queries with `{uid}.txt`.
#[derive(Default)]
pub(crate) struct FakeAnalytics {
    pub queries: Mutex<Vec<AnalyticsQuery>>,
    pub cleanups: Mutex<Vec<UserId>>,
}

#[async_trait]
impl AnalyticsBackend for FakeAnalytics {
    async fn run_query(&self, query: &AnalyticsQuery) -> Result<AnalyticsReport> {
        self.queries.lock().unwrap().push(query.clone());
        Ok(match query.mode {
            dbot_core::AnalyticsMode::Inline => AnalyticsReport::Inline(query.tokens.join(",")),
            dbot_core::AnalyticsMode::File => {
                AnalyticsReport::File(PathBuf::from(format!("{}.txt", query.user_id)))
            }
        })
    }

    async fn cleanup(&self, user_id: UserId) -> Result<()> {
        self.cleanups.lock().unwrap().push(user_id);
        Ok(())
    }
}

/// Renders `name|key=value|...` so tests can assert on the variables; only known names exist.
pub(crate) struct FakeTemplates;

#[async_trait]
impl TemplateRenderer for FakeTemplates {
    async fn render(&self, name: &str, vars: &[(&str, &str)]) -> Result<String> {
        if name != crate::CONTACTS_TEMPLATE && name != crate::UNKNOWN_COMMAND_TEMPLATE {
            return Err(DbotError::Service(ServiceError::TemplateNotFound(
                name.to_string(),
            )));
        }
        let mut out = name.to_string();
        for (key, value) in vars {
            out.push_str(&format!("|{}={}", key, value));
        }
        Ok(out)
    }
}

/// Fakes plus the [`Services`] bundle pointing at them.
pub(crate) struct Fixture {
    pub bot: Arc<MockBot>,
    pub countries: Arc<FakeCountries>,
    pub statistics: Arc<FakeStatistics>,
    pub analytics: Arc<FakeAnalytics>,
    pub services: Services,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with(FakeCountries::resolving("France"), FakeStatistics::default())
    }

    pub fn with(countries: FakeCountries, statistics: FakeStatistics) -> Self {
        let bot = Arc::new(MockBot::default());
        let countries = Arc::new(countries);
        let statistics = Arc::new(statistics);
        let analytics = Arc::new(FakeAnalytics::default());
        let services = Services {
            bot: bot.clone(),
            countries: countries.clone(),
            statistics: statistics.clone(),
            analytics: analytics.clone(),
            templates: Arc::new(FakeTemplates),
        };
        Self {
            bot,
            countries,
            statistics,
            analytics,
            services,
        }
    }

    /// Replaces the bot, e.g. with one whose calls fail.
    pub fn with_bot(mut self, bot: MockBot) -> Self {
        self.bot = Arc::new(bot);
        self.services.bot = self.bot.clone() as Arc<dyn Bot>;
        self
    }
}

/// Text message from user `alice` in chat 42.
pub(crate) fn text_message(text: &str) -> Message {
    Message::new("1", alice(), alice_chat()).with_text(text)
}

pub(crate) fn location_message(latitude: f64, longitude: f64) -> Message {
    Message::new("2", alice(), alice_chat()).with_location(latitude, longitude)
}

fn alice() -> User {
    User {
        id: 7,
        username: Some("alice".to_string()),
        first_name: Some("Alice".to_string()),
        last_name: None,
    }
}

fn alice_chat() -> Chat {
    let mut chat = Chat::private(42);
    chat.username = Some("alice".to_string());
    chat
}
