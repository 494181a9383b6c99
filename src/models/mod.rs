//! Data models for the Command Control Hub client.
//!
//! These models match the server's wire contract exactly, so they double as
//! the shapes the integration stub serves.

mod auth;
mod command;
mod technology;

pub use auth::*;
pub use command::*;
pub use technology::*;
