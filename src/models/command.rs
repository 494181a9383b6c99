//! Command model matching the wire contract of the commands API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Technology;

/// A saved command/snippet as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    /// Server-assigned identity, immutable.
    pub id: i64,
    pub title: String,
    pub content: String,
    pub technology: Technology,
    /// Server timestamp, read-only.
    pub created_at: NaiveDateTime,
}

/// Request body for creating or updating a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandPayload {
    pub title: String,
    pub content: String,
    pub technology: Technology,
}

/// One server-paginated page of commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandPage {
    pub content: Vec<Command>,
    pub total_elements: i64,
    pub total_pages: u32,
    pub size: u32,
    /// Zero-based page index echoed back by the server.
    pub number: u32,
}
