//! Render layer: user intents in, a derived screen out.
//!
//! # Design
//! `App` owns the sync driver and a single notice line. `dispatch` turns an
//! `Intent` into at most one sync operation and converts a failure into a
//! visible notice; it never retries. `screen` is a pure derivation of the
//! current state, so a host can re-render after every intent.

use std::fmt;

use chrono::Local;
use tracing::warn;

use crate::error::ApiError;
use crate::store::{EditDraft, EditSlot};
use crate::sync::TodoSync;
use crate::transport::Transport;
use crate::types::{Draft, TodoId};

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    DraftTitle(String),
    DraftDescription(String),
    Add,
    Toggle(TodoId),
    Delete(TodoId),
    StartEdit(TodoId),
    EditTitle(String),
    EditDescription(String),
    Save,
    Cancel,
}

pub struct App<T> {
    sync: TodoSync<T>,
    notice: Option<String>,
    mounted: bool,
}

impl<T: Transport> App<T> {
    pub fn new(sync: TodoSync<T>) -> Self {
        Self {
            sync,
            notice: None,
            mounted: false,
        }
    }

    pub fn sync(&self) -> &TodoSync<T> {
        &self.sync
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// The initial load. Runs at most once per `App`.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        let result = self.sync.load().map(drop);
        self.report("load todos", result);
    }

    pub fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::DraftTitle(title) => self.sync.state_mut().draft_mut().title = title,
            Intent::DraftDescription(description) => {
                self.sync.state_mut().draft_mut().description = description
            }
            Intent::Add => {
                let result = self.sync.create().map(drop);
                self.report("add todo", result);
            }
            Intent::Toggle(id) => {
                let result = self.sync.toggle(&id);
                self.report("update todo", result);
            }
            Intent::Delete(id) => {
                let result = self.sync.delete(&id);
                self.report("delete todo", result);
            }
            Intent::StartEdit(id) => {
                let result = self.sync.begin_edit(&id);
                self.report("edit todo", result);
            }
            Intent::EditTitle(title) => self.with_edit(|edit| edit.title = title),
            Intent::EditDescription(description) => {
                self.with_edit(|edit| edit.description = description)
            }
            Intent::Save => {
                let result = self.sync.save_edit().map(drop);
                self.report("save todo", result);
            }
            Intent::Cancel => self.sync.cancel_edit(),
        }
    }

    fn with_edit(&mut self, apply: impl FnOnce(&mut EditDraft)) {
        match self.sync.state_mut().edit_mut() {
            Some(edit) => apply(edit),
            None => self.notice = Some("Nothing is being edited".to_string()),
        }
    }

    fn report(&mut self, action: &str, result: Result<(), ApiError>) {
        match result {
            Ok(()) => self.notice = None,
            Err(e) => {
                warn!(action, error = %e, "operation failed");
                self.notice = Some(format!("Could not {action}: {e}"));
            }
        }
    }

    pub fn screen(&self) -> Screen {
        let state = self.sync.state();
        let rows = state
            .items()
            .map(|todo| Row {
                id: todo.id.clone(),
                title: todo.title.clone(),
                description: todo.description.clone(),
                date: todo
                    .date
                    .map(|date| date.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_default(),
                completed: todo.completed,
                mode: match state.edit() {
                    EditSlot::Editing(edit) if edit.id == todo.id => RowMode::Editing(edit.clone()),
                    _ => RowMode::Viewing,
                },
            })
            .collect();
        Screen {
            rows,
            draft: state.draft().clone(),
            notice: self.notice.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowMode {
    Viewing,
    Editing(EditDraft),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: TodoId,
    pub title: String,
    pub description: String,
    /// Creation date in local time, empty when the todo has none.
    pub date: String,
    pub completed: bool,
    pub mode: RowMode,
}

/// Everything the host needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub rows: Vec<Row>,
    pub draft: Draft,
    pub notice: Option<String>,
}

impl Screen {
    pub fn editing(&self) -> Option<&EditDraft> {
        self.rows.iter().find_map(|row| match &row.mode {
            RowMode::Editing(edit) => Some(edit),
            RowMode::Viewing => None,
        })
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Todos")?;
        writeln!(
            f,
            "  new: title=[{}] description=[{}]",
            self.draft.title, self.draft.description
        )?;
        if self.rows.is_empty() {
            writeln!(f, "  (no todos)")?;
        }
        for row in &self.rows {
            let mark = if row.completed { 'x' } else { ' ' };
            writeln!(
                f,
                "  [{mark}] #{} {}  {}  ({})",
                row.id, row.title, row.description, row.date
            )?;
            if let RowMode::Editing(edit) = &row.mode {
                writeln!(
                    f,
                    "      editing: title=[{}] description=[{}]  (save | cancel)",
                    edit.title, edit.description
                )?;
            }
        }
        if let Some(notice) = &self.notice {
            writeln!(f, "! {notice}")?;
        }
        Ok(())
    }
}
