//! # dbot-core
//!
//! Core types and traits for the bot: [`Bot`] (outbound messages), [`Handler`] and [`Middleware`]
//! for the dispatch chain, the inbound [`Message`] model with its conversation [`Step`], the
//! collaborator traits in [`services`], and tracing initialization. Transport-agnostic; used by
//! storage, handler-chain, handlers and dbot-telegram.

pub mod bot;
pub mod error;
pub mod logger;
pub mod services;
pub mod types;

pub use bot::{Bot, KeyboardButton, Presence, TextFormat};
pub use error::{DbotError, HandlerError, Result, ServiceError};
pub use logger::init_tracing;
pub use services::{
    AnalyticsBackend, AnalyticsMode, AnalyticsQuery, AnalyticsReport, CountryInfo, CountryLookup,
    StatisticsGateway, TemplateRenderer,
};
pub use types::{
    Chat, Command, Handler, HandlerResponse, Location, Message, Middleware, Route, Step,
    ToCoreMessage, ToCoreUser, User, UserId,
};
