//! Core types: user, chat, inbound message, conversation step, handler response, and the
//! Handler / Middleware traits.

mod chat;
mod command;
mod handler;
mod message;
mod response;
mod step;
mod user;

pub use chat::Chat;
pub use command::Command;
pub use handler::{Handler, Middleware, Route, ToCoreMessage, ToCoreUser};
pub use message::{Location, Message};
pub use response::HandlerResponse;
pub use step::Step;
pub use user::{User, UserId};
