//! Drives the request/response pairs and folds results into `ViewState`.
//!
//! # Design
//! Every operation builds a request with `TodoClient`, hands it to the
//! `Transport`, parses the response, and only then mutates the store. A
//! failure at any step returns early, so the store is never partially
//! updated. Mutations merge by id, which limits (but does not eliminate)
//! lost updates when responses interleave.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::store::{EditSlot, ViewState};
use crate::transport::Transport;
use crate::types::{Completion, Draft, Todo, TodoFields, TodoId, TodoPatch};

pub struct TodoSync<T> {
    client: TodoClient,
    transport: T,
    state: ViewState,
}

impl<T: Transport> TodoSync<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self {
            client,
            transport,
            state: ViewState::new(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Direct access for form edits (draft and edit slot fields).
    pub fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request).inspect_err(|e| {
            warn!(error = %e, "transport failed");
        })?;
        debug!(status = response.status, "received response");
        Ok(response)
    }

    /// Replace the local list with the server's collection.
    pub fn load(&mut self) -> Result<usize, ApiError> {
        let request = self.client.build_list_todos();
        let todos = self
            .client
            .parse_list_todos(self.send(request)?)
            .inspect_err(|e| warn!(error = %e, "load failed"))?;
        self.state.replace_all(todos);
        info!(count = self.state.len(), "loaded todos");
        Ok(self.state.len())
    }

    /// Submit the current draft, append the created todo and reset the draft.
    pub fn create(&mut self) -> Result<Todo, ApiError> {
        let request = self.client.build_create_todo(self.state.draft(), Utc::now())?;
        let created = self
            .client
            .parse_create_todo(self.send(request)?)
            .inspect_err(|e| warn!(error = %e, "create failed"))?;
        self.state.append(created.clone());
        self.state.set_draft(Draft::default());
        info!(id = %created.id, "created todo");
        Ok(created)
    }

    pub fn replace_fields(&mut self, id: &TodoId, fields: &TodoFields) -> Result<(), ApiError> {
        let request = self.client.build_replace_fields(id, fields)?;
        let patch = self
            .client
            .parse_replace_fields(self.send(request)?)
            .inspect_err(|e| warn!(%id, error = %e, "replace fields failed"))?;
        self.apply(id, patch);
        Ok(())
    }

    pub fn patch_completion(&mut self, id: &TodoId, completion: Completion) -> Result<(), ApiError> {
        let request = self.client.build_patch_completion(id, completion)?;
        let patch = self
            .client
            .parse_patch_completion(self.send(request)?)
            .inspect_err(|e| warn!(%id, error = %e, "patch completion failed"))?;
        self.apply(id, patch);
        Ok(())
    }

    /// Flip completion by sending the explicit new value.
    pub fn toggle(&mut self, id: &TodoId) -> Result<(), ApiError> {
        let current = self
            .state
            .get(id)
            .ok_or_else(|| ApiError::UnknownTodo(id.clone()))?
            .completed;
        self.patch_completion(id, Completion::Set(!current))
    }

    /// Remove the todo locally once the server acknowledges the delete.
    pub fn delete(&mut self, id: &TodoId) -> Result<(), ApiError> {
        let request = self.client.build_delete_todo(id);
        self.client
            .parse_delete_todo(self.send(request)?)
            .inspect_err(|e| warn!(%id, error = %e, "delete failed"))?;
        if self.state.remove(id).is_none() {
            warn!(%id, "deleted todo was not in the local list");
        }
        info!(%id, "deleted todo");
        Ok(())
    }

    pub fn begin_edit(&mut self, id: &TodoId) -> Result<(), ApiError> {
        self.state.begin_edit(id)?;
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.state.cancel_edit();
    }

    /// Commit the edit slot with a replace-fields request. The slot is
    /// cleared only when the request succeeds. Returns `None` when nothing
    /// is being edited.
    pub fn save_edit(&mut self) -> Result<Option<TodoId>, ApiError> {
        let EditSlot::Editing(edit) = self.state.edit() else {
            return Ok(None);
        };
        let id = edit.id.clone();
        let fields = edit.to_fields();
        self.replace_fields(&id, &fields)?;
        if self.state.editing_id() == Some(&id) {
            self.state.cancel_edit();
        }
        Ok(Some(id))
    }

    fn apply(&mut self, id: &TodoId, patch: TodoPatch) {
        if self.state.merge(id, patch) {
            info!(%id, "merged todo");
        } else {
            warn!(%id, "response for a todo that is not in the local list");
        }
    }
}
