//! Stateless HTTP request builder and response parser for the todo collection.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the round-trip in between, keeping this module
//! deterministic and free of I/O. The creation instant is passed in rather
//! than read from the clock for the same reason.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Completion, Draft, NewTodo, Todo, TodoFields, TodoId, TodoPatch};

/// Synchronous, stateless client for the `/todos` collection.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn member(&self, id: &TodoId) -> String {
        format!("{}/todos/{id}", self.base_url)
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        bodiless(HttpMethod::Get, self.collection())
    }

    /// POST the draft with `date = now` and `completed = false`.
    pub fn build_create_todo(&self, draft: &Draft, now: DateTime<Utc>) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, self.collection(), &NewTodo::from_draft(draft, now))
    }

    pub fn build_replace_fields(&self, id: &TodoId, fields: &TodoFields) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Put, self.member(id), fields)
    }

    pub fn build_patch_completion(&self, id: &TodoId, completion: Completion) -> Result<HttpRequest, ApiError> {
        match completion {
            Completion::Set(completed) => json_request(HttpMethod::Patch, self.member(id), &completed),
            Completion::Toggle => Ok(bodiless(HttpMethod::Patch, self.member(id))),
        }
    }

    pub fn build_delete_todo(&self, id: &TodoId) -> HttpRequest {
        bodiless(HttpMethod::Delete, self.member(id))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response)
    }

    pub fn parse_replace_fields(&self, response: HttpResponse) -> Result<TodoPatch, ApiError> {
        parse_json(response)
    }

    pub fn parse_patch_completion(&self, response: HttpResponse) -> Result<TodoPatch, ApiError> {
        parse_json(response)
    }

    /// Any 2xx acknowledges the delete; the body is ignored.
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn bodiless(method: HttpMethod, path: String) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn json_request<B: Serialize>(method: HttpMethod, path: String, body: &B) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::from_status(response.status, response.body.clone()))
}
