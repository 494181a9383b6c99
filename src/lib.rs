//! Command Control Hub client core.
//!
//! The state-bearing half of a personal command/snippet library client:
//! a debounced, race-safe list controller, the single-textarea editor
//! encoding and lifecycle, a non-verifying token claims reader, and a
//! best-effort clipboard copy. The presentation layer and routing live
//! outside this crate and consume controller snapshots.

pub mod api;
pub mod auth;
pub mod clipboard;
pub mod config;
pub mod editor;
pub mod errors;
pub mod list;
pub mod models;

pub use api::{CommandApi, HubClient, ListQuery};
pub use auth::{decode_token_claims, display_name, TokenStore};
pub use clipboard::copy_to_clipboard;
pub use config::Config;
pub use editor::{
    decode_draft, encode_draft, CommandEditorController, EditorMode, EditorPhase,
    DRAFT_VALIDATION_MESSAGE,
};
pub use errors::{extract_api_error_message, ApiError, ErrorBody};
pub use list::{page_window, CommandListController, ListPhase, PageWindow, PAGE_SIZE};
pub use models::{Command, CommandPage, CommandPayload, Technology};
