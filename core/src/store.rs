//! In-memory view state: the todo list, the new-todo draft and the edit slot.
//!
//! # Design
//! Items live in a map keyed by `TodoId` with a separate order vector, so a
//! response can be merged into exactly the item it names instead of
//! rebuilding the whole list. The edit slot is a tagged variant, which makes
//! "at most one todo is being edited" a property of the type.

use std::collections::HashMap;

use crate::error::StoreError;
use crate::types::{Draft, Todo, TodoFields, TodoId, TodoPatch};

/// Detached copy of the editable fields of one todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: TodoId,
    pub title: String,
    pub description: String,
}

impl EditDraft {
    /// The PUT body committed by a save.
    pub fn to_fields(&self) -> TodoFields {
        TodoFields {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            ..TodoFields::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSlot {
    #[default]
    Idle,
    Editing(EditDraft),
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    items: HashMap<TodoId, Todo>,
    order: Vec<TodoId>,
    draft: Draft,
    edit: EditSlot,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list. For duplicate ids the last occurrence wins
    /// and keeps the position of the first.
    pub fn replace_all(&mut self, todos: Vec<Todo>) {
        self.items.clear();
        self.order.clear();
        for todo in todos {
            let id = todo.id.clone();
            if self.items.insert(id.clone(), todo).is_none() {
                self.order.push(id);
            }
        }
        if let EditSlot::Editing(edit) = &self.edit {
            if !self.items.contains_key(&edit.id) {
                self.edit = EditSlot::Idle;
            }
        }
    }

    /// Add a todo at the end of the list, or replace it in place if the id
    /// is already present.
    pub fn append(&mut self, todo: Todo) {
        let id = todo.id.clone();
        if self.items.insert(id.clone(), todo).is_none() {
            self.order.push(id);
        }
    }

    /// Merge-by-id. Returns `false` when no local item has `id`.
    pub fn merge(&mut self, id: &TodoId, patch: TodoPatch) -> bool {
        match self.items.get_mut(id) {
            Some(todo) => {
                todo.merge(patch);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &TodoId) -> Option<Todo> {
        let removed = self.items.remove(id)?;
        self.order.retain(|existing| existing != id);
        if self.editing_id() == Some(id) {
            self.edit = EditSlot::Idle;
        }
        Some(removed)
    }

    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.items.get(id)
    }

    /// Todos in list order.
    pub fn items(&self) -> impl Iterator<Item = &Todo> + '_ {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn set_draft(&mut self, draft: Draft) {
        self.draft = draft;
    }

    pub fn edit(&self) -> &EditSlot {
        &self.edit
    }

    pub fn editing_id(&self) -> Option<&TodoId> {
        match &self.edit {
            EditSlot::Editing(edit) => Some(&edit.id),
            EditSlot::Idle => None,
        }
    }

    pub fn edit_mut(&mut self) -> Option<&mut EditDraft> {
        match &mut self.edit {
            EditSlot::Editing(edit) => Some(edit),
            EditSlot::Idle => None,
        }
    }

    /// Copy the todo into the edit slot, discarding any edit in progress.
    pub fn begin_edit(&mut self, id: &TodoId) -> Result<(), StoreError> {
        let todo = self
            .items
            .get(id)
            .ok_or_else(|| StoreError::UnknownTodo(id.clone()))?;
        self.edit = EditSlot::Editing(EditDraft {
            id: id.clone(),
            title: todo.title.clone(),
            description: todo.description.clone(),
        });
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.edit = EditSlot::Idle;
    }
}
