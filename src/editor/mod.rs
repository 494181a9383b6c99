//! Command editor: the single-textarea title/content encoding and the
//! load/edit/save/delete lifecycle around it.

use std::sync::Arc;

use crate::api::CommandApi;
use crate::errors::extract_api_error_message;
use crate::models::{Command, CommandPayload, Technology};

/// Shown when the edited blob does not decode into a usable command.
pub const DRAFT_VALIDATION_MESSAGE: &str =
    "Preencha o título (primeira linha), conteúdo e tecnologia";

const LOAD_ERROR_FALLBACK: &str = "Erro ao carregar comando";
const CREATE_ERROR_FALLBACK: &str = "Erro ao criar comando";
const UPDATE_ERROR_FALLBACK: &str = "Erro ao editar comando";
const DELETE_ERROR_FALLBACK: &str = "Erro ao deletar comando";

/// Title and content recovered from an edited blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedDraft {
    pub title: String,
    pub content: String,
}

/// Join title and content into the single editable blob.
///
/// The title must not contain a newline; that is enforced by construction
/// (titles only ever come out of [`decode_draft`], which cannot produce one).
pub fn encode_draft(title: &str, content: &str) -> String {
    format!("{}\n{}", title, content)
}

/// Split a blob on its first newline into trimmed title and content.
///
/// Returns `None` when either side is empty after trimming; callers surface
/// [`DRAFT_VALIDATION_MESSAGE`] instead of attempting a save.
pub fn decode_draft(blob: &str) -> Option<DecodedDraft> {
    let (title, content) = blob.split_once('\n').unwrap_or((blob, ""));
    let title = title.trim();
    let content = content.trim();
    if title.is_empty() || content.is_empty() {
        return None;
    }
    Some(DecodedDraft {
        title: title.to_string(),
        content: content.to_string(),
    })
}

/// Lifecycle of the editor view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorPhase {
    Loading,
    Ready,
    Saving,
    Deleting,
    Error(String),
}

/// Whether the editor is creating a new command or editing an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit { id: i64 },
}

/// Controller for the command editor.
///
/// Save and delete take `&mut self`, so overlapping submissions cannot be
/// expressed; the caller additionally disables the triggering affordance
/// while [`EditorPhase::Saving`] or [`EditorPhase::Deleting`] is reported.
pub struct CommandEditorController {
    api: Arc<dyn CommandApi>,
    mode: EditorMode,
    phase: EditorPhase,
    buffer: String,
    technology: Technology,
    form_error: Option<String>,
}

impl CommandEditorController {
    /// Editor for a brand-new command: empty draft, default technology.
    pub fn create(api: Arc<dyn CommandApi>) -> Self {
        Self {
            api,
            mode: EditorMode::Create,
            phase: EditorPhase::Ready,
            buffer: String::new(),
            technology: Technology::default(),
            form_error: None,
        }
    }

    /// Editor for an existing command.
    ///
    /// When the navigating caller hands over the full command, the read is
    /// skipped; otherwise the command is fetched by id. A failed fetch lands
    /// in [`EditorPhase::Error`].
    pub async fn edit(api: Arc<dyn CommandApi>, id: i64, hint: Option<Command>) -> Self {
        let mut editor = Self {
            api,
            mode: EditorMode::Edit { id },
            phase: EditorPhase::Loading,
            buffer: String::new(),
            technology: Technology::default(),
            form_error: None,
        };

        match hint {
            Some(command) => editor.adopt(command),
            None => match editor.api.get(id).await {
                Ok(command) => editor.adopt(command),
                Err(e) => {
                    editor.phase =
                        EditorPhase::Error(extract_api_error_message(&e, LOAD_ERROR_FALLBACK));
                }
            },
        }

        editor
    }

    fn adopt(&mut self, command: Command) {
        self.buffer = encode_draft(&command.title, &command.content);
        self.technology = command.technology;
        self.phase = EditorPhase::Ready;
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn phase(&self) -> &EditorPhase {
        &self.phase
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn set_buffer(&mut self, text: &str) {
        self.buffer = text.to_string();
    }

    pub fn technology(&self) -> Technology {
        self.technology
    }

    pub fn set_technology(&mut self, technology: Technology) {
        self.technology = technology;
    }

    /// Validation or server message to display, if any.
    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    /// Decode the draft and persist it.
    ///
    /// A draft that fails validation never reaches the network; the editor
    /// stays editable with [`DRAFT_VALIDATION_MESSAGE`] set. On success the
    /// saved command is returned and the caller navigates back to the list.
    pub async fn save(&mut self) -> Option<Command> {
        if self.phase != EditorPhase::Ready {
            return None;
        }

        let Some(draft) = decode_draft(&self.buffer) else {
            self.form_error = Some(DRAFT_VALIDATION_MESSAGE.to_string());
            return None;
        };

        self.form_error = None;
        self.phase = EditorPhase::Saving;

        let payload = CommandPayload {
            title: draft.title,
            content: draft.content,
            technology: self.technology,
        };

        let (result, fallback) = match self.mode {
            EditorMode::Edit { id } => (self.api.update(id, &payload).await, UPDATE_ERROR_FALLBACK),
            EditorMode::Create => (self.api.create(&payload).await, CREATE_ERROR_FALLBACK),
        };

        self.phase = EditorPhase::Ready;
        match result {
            Ok(command) => Some(command),
            Err(e) => {
                tracing::warn!("Save failed: {}", e);
                self.form_error = Some(extract_api_error_message(&e, fallback));
                None
            }
        }
    }

    /// Destroy the command being edited. The confirmation prompt is the
    /// caller's responsibility; delete is irreversible.
    ///
    /// Returns `true` on success, after which no further operation on this
    /// id is permitted.
    pub async fn delete(&mut self) -> bool {
        let EditorMode::Edit { id } = self.mode else {
            return false;
        };
        if self.phase != EditorPhase::Ready {
            return false;
        }

        self.phase = EditorPhase::Deleting;
        let result = self.api.delete(id).await;
        self.phase = EditorPhase::Ready;

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Delete failed: {}", e);
                self.form_error = Some(extract_api_error_message(&e, DELETE_ERROR_FALLBACK));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    use crate::api::ListQuery;
    use crate::errors::{ApiError, ErrorBody};
    use crate::models::CommandPage;

    fn command(id: i64, title: &str, content: &str) -> Command {
        Command {
            id,
            title: title.to_string(),
            content: content.to_string(),
            technology: Technology::Bash,
            created_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        }
    }

    #[derive(Default)]
    struct Calls {
        gets: usize,
        creates: usize,
        updates: usize,
        deletes: usize,
    }

    struct RecordingApi {
        calls: Mutex<Calls>,
        fail_writes: bool,
    }

    impl RecordingApi {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Calls::default()),
                fail_writes: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Calls::default()),
                fail_writes: true,
            })
        }

        fn write_error(&self) -> ApiError {
            ApiError::Status {
                status: 400,
                body: ErrorBody::from_response_text(r#"{"message":"Título já existe"}"#),
            }
        }
    }

    #[async_trait]
    impl CommandApi for RecordingApi {
        async fn list(&self, _query: &ListQuery) -> Result<CommandPage, ApiError> {
            unimplemented!("not used by editor tests")
        }

        async fn get(&self, id: i64) -> Result<Command, ApiError> {
            self.calls.lock().unwrap().gets += 1;
            Ok(command(id, "fetched title", "fetched content"))
        }

        async fn create(&self, payload: &CommandPayload) -> Result<Command, ApiError> {
            self.calls.lock().unwrap().creates += 1;
            if self.fail_writes {
                return Err(self.write_error());
            }
            Ok(command(1, &payload.title, &payload.content))
        }

        async fn update(&self, id: i64, payload: &CommandPayload) -> Result<Command, ApiError> {
            self.calls.lock().unwrap().updates += 1;
            if self.fail_writes {
                return Err(self.write_error());
            }
            Ok(command(id, &payload.title, &payload.content))
        }

        async fn delete(&self, _id: i64) -> Result<(), ApiError> {
            self.calls.lock().unwrap().deletes += 1;
            if self.fail_writes {
                return Err(self.write_error());
            }
            Ok(())
        }
    }

    #[test]
    fn test_codec_round_trip() {
        let blob = encode_draft("list files", "ls -la\nls -lh");
        let draft = decode_draft(&blob).expect("valid draft");
        assert_eq!(draft.title, "list files");
        assert_eq!(draft.content, "ls -la\nls -lh");
    }

    #[test]
    fn test_codec_trims_both_sides() {
        let draft = decode_draft("  spaced title  \n\n  body  \n").expect("valid draft");
        assert_eq!(draft.title, "spaced title");
        assert_eq!(draft.content, "body");
    }

    #[test]
    fn test_blob_without_newline_fails_validation() {
        assert!(decode_draft("just a title").is_none());
    }

    #[test]
    fn test_empty_sides_fail_validation() {
        assert!(decode_draft("\ncontent only").is_none());
        assert!(decode_draft("title only\n   ").is_none());
        assert!(decode_draft("").is_none());
    }

    #[tokio::test]
    async fn test_create_mode_starts_empty_with_default_technology() {
        let editor = CommandEditorController::create(RecordingApi::ok());
        assert_eq!(editor.mode(), EditorMode::Create);
        assert_eq!(*editor.phase(), EditorPhase::Ready);
        assert_eq!(editor.buffer(), "");
        assert_eq!(editor.technology(), Technology::Text);
    }

    #[tokio::test]
    async fn test_edit_with_hint_skips_fetch() {
        let api = RecordingApi::ok();
        let hint = command(9, "hinted", "echo hinted");

        let editor = CommandEditorController::edit(api.clone(), 9, Some(hint)).await;

        assert_eq!(editor.buffer(), "hinted\necho hinted");
        assert_eq!(*editor.phase(), EditorPhase::Ready);
        assert_eq!(api.calls.lock().unwrap().gets, 0);
    }

    #[tokio::test]
    async fn test_edit_without_hint_fetches() {
        let api = RecordingApi::ok();
        let editor = CommandEditorController::edit(api.clone(), 4, None).await;

        assert_eq!(editor.buffer(), "fetched title\nfetched content");
        assert_eq!(api.calls.lock().unwrap().gets, 1);
    }

    #[tokio::test]
    async fn test_save_validation_short_circuits_network() {
        let api = RecordingApi::ok();
        let mut editor = CommandEditorController::create(api.clone());
        editor.set_buffer("title without content");

        assert!(editor.save().await.is_none());
        assert_eq!(editor.form_error(), Some(DRAFT_VALIDATION_MESSAGE));
        assert_eq!(*editor.phase(), EditorPhase::Ready);

        let calls = api.calls.lock().unwrap();
        assert_eq!(calls.creates, 0);
        assert_eq!(calls.updates, 0);
    }

    #[tokio::test]
    async fn test_save_create_and_update_routes() {
        let api = RecordingApi::ok();

        let mut creator = CommandEditorController::create(api.clone());
        creator.set_buffer("new title\nnew content");
        creator.set_technology(Technology::Docker);
        let created = creator.save().await.expect("created");
        assert_eq!(created.title, "new title");

        let mut editor =
            CommandEditorController::edit(api.clone(), 7, Some(command(7, "t", "c"))).await;
        editor.set_buffer("changed\nbody");
        let updated = editor.save().await.expect("updated");
        assert_eq!(updated.id, 7);

        let calls = api.calls.lock().unwrap();
        assert_eq!(calls.creates, 1);
        assert_eq!(calls.updates, 1);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_editor_editable() {
        let api = RecordingApi::failing();
        let mut editor = CommandEditorController::create(api);
        editor.set_buffer("title\ncontent");

        assert!(editor.save().await.is_none());
        assert_eq!(*editor.phase(), EditorPhase::Ready);
        assert_eq!(editor.form_error(), Some("Título já existe"));
        assert_eq!(editor.buffer(), "title\ncontent");
    }

    #[tokio::test]
    async fn test_delete_only_in_edit_mode() {
        let api = RecordingApi::ok();
        let mut creator = CommandEditorController::create(api.clone());
        assert!(!creator.delete().await);
        assert_eq!(api.calls.lock().unwrap().deletes, 0);

        let mut editor =
            CommandEditorController::edit(api.clone(), 3, Some(command(3, "t", "c"))).await;
        assert!(editor.delete().await);
        assert_eq!(api.calls.lock().unwrap().deletes, 1);
    }

    #[tokio::test]
    async fn test_failed_delete_surfaces_message() {
        let api = RecordingApi::failing();
        let mut editor =
            CommandEditorController::edit(api, 3, Some(command(3, "t", "c"))).await;

        assert!(!editor.delete().await);
        assert_eq!(*editor.phase(), EditorPhase::Ready);
        assert_eq!(editor.form_error(), Some("Título já existe"));
    }

    #[tokio::test]
    async fn test_save_rejected_after_failed_load() {
        struct FailingGet;

        #[async_trait]
        impl CommandApi for FailingGet {
            async fn list(&self, _query: &ListQuery) -> Result<CommandPage, ApiError> {
                unimplemented!()
            }
            async fn get(&self, _id: i64) -> Result<Command, ApiError> {
                Err(ApiError::Status {
                    status: 404,
                    body: None,
                })
            }
            async fn create(&self, _payload: &CommandPayload) -> Result<Command, ApiError> {
                unimplemented!()
            }
            async fn update(&self, _id: i64, _p: &CommandPayload) -> Result<Command, ApiError> {
                unimplemented!()
            }
            async fn delete(&self, _id: i64) -> Result<(), ApiError> {
                unimplemented!()
            }
        }

        let mut editor = CommandEditorController::edit(Arc::new(FailingGet), 5, None).await;
        assert_eq!(
            *editor.phase(),
            EditorPhase::Error("server returned status 404".to_string())
        );

        editor.set_buffer("title\ncontent");
        assert!(editor.save().await.is_none());
        assert!(!editor.delete().await);
    }
}
