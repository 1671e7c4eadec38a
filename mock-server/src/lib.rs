use std::{collections::BTreeMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
}

/// The collection plus the next id to hand out. Ids are never reused.
#[derive(Debug)]
pub struct Collection {
    next_id: u64,
    todos: BTreeMap<u64, Todo>,
}

impl Collection {
    fn seeded(seed: Vec<Todo>) -> Self {
        let next_id = seed.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let todos = seed.into_iter().map(|t| (t.id, t)).collect();
        Self { next_id, todos }
    }
}

pub type Db = Arc<RwLock<Collection>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Build the router over a pre-populated collection.
pub fn app_with(seed: Vec<Todo>) -> Router {
    let db: Db = Arc::new(RwLock::new(Collection::seeded(seed)));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            put(replace_fields).patch(patch_completion).delete(delete_todo),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let db = db.read().await;
    Json(db.todos.values().cloned().collect())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> (StatusCode, Json<Todo>) {
    let mut db = db.write().await;
    let todo = Todo {
        id: db.next_id,
        title: input.title,
        description: input.description,
        date: input.date.unwrap_or_else(Utc::now),
        completed: input.completed,
    };
    db.next_id += 1;
    db.todos.insert(todo.id, todo.clone());
    tracing::info!(id = todo.id, "created todo");
    (StatusCode::CREATED, Json(todo))
}

async fn replace_fields(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    let mut db = db.write().await;
    let todo = db.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(description) = input.description {
        todo.description = description;
    }
    if let Some(date) = input.date {
        todo.date = date;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    tracing::info!(id, "replaced fields");
    Ok(Json(todo.clone()))
}

/// A bare JSON boolean sets completion; an empty or `null` body toggles it.
async fn patch_completion(
    State(db): State<Db>,
    Path(id): Path<u64>,
    body: Bytes,
) -> Result<Json<Todo>, StatusCode> {
    let desired = parse_completion(&body).ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;
    let mut db = db.write().await;
    let todo = db.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    todo.completed = desired.unwrap_or(!todo.completed);
    tracing::info!(id, completed = todo.completed, "patched completion");
    Ok(Json(todo.clone()))
}

/// `None` when the body is not a boolean, `Some(None)` for a toggle.
fn parse_completion(body: &[u8]) -> Option<Option<bool>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Some(None);
    }
    serde_json::from_slice::<Option<bool>>(body).ok()
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, StatusCode> {
    let mut db = db.write().await;
    let removed = db.todos.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    tracing::info!(id = removed.id, "deleted todo");
    Ok(StatusCode::NO_CONTENT)
}
