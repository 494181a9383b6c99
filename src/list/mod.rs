//! Command list controller.
//!
//! Owns the search text, its debounced counterpart, the technology filter,
//! the current page and the fetched page of items, and coordinates fetches so
//! that the displayed result always reflects the latest triggering query.
//!
//! Must be driven from within a tokio runtime: the debounce timer is a
//! spawned task.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::api::{CommandApi, ListQuery};
use crate::errors::extract_api_error_message;
use crate::models::{Command, Technology};

/// Quiet period before a search keystroke is committed.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Fixed page size; not changeable at runtime.
pub const PAGE_SIZE: u32 = 6;

/// Width of the pagination window.
pub const MAX_PAGE_BUTTONS: u32 = 7;

const LOAD_ERROR_FALLBACK: &str = "Erro ao carregar comandos";

/// Lifecycle of the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    Loading,
    Ready,
    Error(String),
}

/// Point-in-time copy of the controller state for rendering.
#[derive(Debug, Clone)]
pub struct ListSnapshot {
    pub phase: ListPhase,
    pub items: Vec<Command>,
    pub total_pages: u32,
    pub page: u32,
    pub search_input: String,
    pub debounced_search: String,
    pub technology: Option<Technology>,
}

struct ListState {
    phase: ListPhase,
    items: Vec<Command>,
    total_pages: u32,
    page: u32,
    search_input: String,
    debounced_search: String,
    technology: Option<Technology>,
}

struct ListInner {
    api: Arc<dyn CommandApi>,
    state: Mutex<ListState>,
    pending_debounce: Mutex<Option<JoinHandle<()>>>,
    /// Request generation; a response is applied only while its generation is
    /// still the newest one issued.
    generation: AtomicU64,
}

/// Debounced search/filter/pagination controller for the command list.
#[derive(Clone)]
pub struct CommandListController {
    inner: Arc<ListInner>,
}

impl CommandListController {
    pub fn new(api: Arc<dyn CommandApi>) -> Self {
        Self {
            inner: Arc::new(ListInner {
                api,
                state: Mutex::new(ListState {
                    phase: ListPhase::Idle,
                    items: Vec::new(),
                    total_pages: 0,
                    page: 0,
                    search_input: String::new(),
                    debounced_search: String::new(),
                    technology: None,
                }),
                pending_debounce: Mutex::new(None),
                generation: AtomicU64::new(0),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, ListState> {
        self.inner.state.lock().expect("list state lock poisoned")
    }

    pub fn snapshot(&self) -> ListSnapshot {
        let state = self.state();
        ListSnapshot {
            phase: state.phase.clone(),
            items: state.items.clone(),
            total_pages: state.total_pages,
            page: state.page,
            search_input: state.search_input.clone(),
            debounced_search: state.debounced_search.clone(),
            technology: state.technology,
        }
    }

    /// Initial fetch for the current query.
    pub async fn load(&self) {
        self.refresh().await;
    }

    /// Record a keystroke. The visible input updates immediately; the value
    /// is committed to the debounced search term only after
    /// [`SEARCH_DEBOUNCE`] of silence, and every newer keystroke cancels the
    /// pending commit.
    pub fn set_search_input(&self, text: &str) {
        {
            let mut state = self.state();
            if state.search_input == text {
                return;
            }
            state.search_input = text.to_string();
        }

        let controller = self.clone();
        let committed = text.to_string();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(SEARCH_DEBOUNCE).await;
            // No await between the commit and the spawn below, so an abort
            // can no longer split them.
            let changed = {
                let mut state = controller.state();
                if state.debounced_search == committed {
                    false
                } else {
                    state.debounced_search = committed;
                    true
                }
            };
            if changed {
                let refresher = controller.clone();
                tokio::spawn(async move { refresher.refresh().await });
            }
        });

        let mut pending = self
            .inner
            .pending_debounce
            .lock()
            .expect("debounce lock poisoned");
        if let Some(previous) = pending.replace(timer) {
            previous.abort();
        }
    }

    /// Change the technology filter; triggers exactly one fetch when the
    /// value actually changes. The page index is deliberately left alone.
    pub async fn set_technology(&self, technology: Option<Technology>) {
        {
            let mut state = self.state();
            if state.technology == technology {
                return;
            }
            state.technology = technology;
        }
        self.refresh().await;
    }

    /// Move to another page; triggers exactly one fetch when the value
    /// actually changes.
    pub async fn set_page(&self, page: u32) {
        {
            let mut state = self.state();
            if state.page == page {
                return;
            }
            state.page = page;
        }
        self.refresh().await;
    }

    async fn refresh(&self) {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let query = {
            let mut state = self.state();
            state.phase = ListPhase::Loading;
            ListQuery {
                page: state.page,
                size: PAGE_SIZE,
                search: if state.debounced_search.is_empty() {
                    None
                } else {
                    Some(state.debounced_search.clone())
                },
                technology: state.technology,
            }
        };

        let result = self.inner.api.list(&query).await;

        let mut state = self.state();
        if generation != self.inner.generation.load(Ordering::SeqCst) {
            tracing::debug!(
                generation,
                "Discarding stale list response for superseded query"
            );
            return;
        }

        match result {
            Ok(page) => {
                state.items = page.content;
                state.total_pages = page.total_pages;
                state.phase = ListPhase::Ready;
            }
            Err(e) => {
                tracing::warn!("List fetch failed: {}", e);
                state.items.clear();
                state.phase =
                    ListPhase::Error(extract_api_error_message(&e, LOAD_ERROR_FALLBACK));
            }
        }
    }
}

/// The bounded set of page-number controls shown around the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// Contiguous run of page indices, clamped to `[0, total - 1]`.
    pub pages: Vec<u32>,
    /// Render an explicit first-page control before the run.
    pub leading_first: bool,
    /// Render an ellipsis between the first-page control and the run.
    pub leading_gap: bool,
    /// Render an ellipsis between the run and the last-page control.
    pub trailing_gap: bool,
    /// Render an explicit last-page control after the run.
    pub trailing_last: bool,
}

/// Center a run of `max_buttons` page numbers on `current`.
///
/// When the run would overshoot the upper bound it slides left, clamped at
/// zero; when `total <= max_buttons` the window is the full range and no
/// extra controls are flagged. `current` past the last page is treated as
/// the last page: a narrowed filter can shrink `total` under a page index
/// that was valid a moment ago.
pub fn page_window(current: u32, total: u32, max_buttons: u32) -> PageWindow {
    if total == 0 || max_buttons == 0 {
        return PageWindow {
            pages: Vec::new(),
            leading_first: false,
            leading_gap: false,
            trailing_gap: false,
            trailing_last: false,
        };
    }

    let current = current.min(total - 1);
    let half = max_buttons / 2;
    let mut start = current.saturating_sub(half);
    let end = (total - 1).min(start + max_buttons - 1);
    if end - start + 1 < max_buttons {
        start = (end + 1).saturating_sub(max_buttons);
    }

    PageWindow {
        pages: (start..=end).collect(),
        leading_first: start > 0,
        leading_gap: start > 1,
        trailing_gap: end + 2 < total,
        trailing_last: end + 1 < total,
    }
}
