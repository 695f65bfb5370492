//! Domain entities - Core business objects with no external dependencies

pub mod command;
pub mod message;
pub mod support;
pub mod user;

pub use command::{Command, CommandContext, CommandHandler, CommandRegistry};
pub use message::Message;
pub use support::SupportList;
pub use user::User;
