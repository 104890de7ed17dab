use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use anyhow::Context;

use crate::error::ApiError;
use crate::store::{next_id, TaskStore};
use crate::task::{validate_create, validate_update, CreateTask, Task, UpdateTask};

#[derive(Clone)]
pub struct AppState {
    // One lock around every load-mutate-save cycle; two concurrent creates
    // must never read the same id watermark.
    store: Arc<Mutex<Box<dyn TaskStore>>>,
}

impl AppState {
    pub fn new(store: Box<dyn TaskStore>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

pub fn router(state: AppState, static_dir: PathBuf) -> Router {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/{id}", put(update_task).delete(delete_task))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(
    host: &str,
    port: u16,
    state: AppState,
    static_dir: PathBuf,
) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", host, port))?;
    let app = router(state, static_dir);
    println!("🌐 Task Board is running at: http://localhost:{}", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn list_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    let store = state.store.lock().await;
    Json(store.load_all())
}

async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTask>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(req) = payload.map_err(|rej| ApiError::Validation(rej.body_text()))?;
    let new = validate_create(req)?;

    let store = state.store.lock().await;
    let mut tasks = store.load_all();
    let task = Task {
        id: next_id(&tasks),
        content: new.content,
        status: new.status,
    };
    tasks.push(task.clone());
    store.save_all(&tasks)?;
    log::info!("created task {}", task.id);
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<UpdateTask>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let Json(req) = payload.map_err(|rej| ApiError::Validation(rej.body_text()))?;
    let patch = validate_update(req)?;

    let store = state.store.lock().await;
    let mut tasks = store.load_all();
    let task = tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(ApiError::NotFound)?;
    if let Some(content) = patch.content {
        task.content = content;
    }
    if let Some(status) = patch.status {
        task.status = status;
    }
    let updated = task.clone();
    store.save_all(&tasks)?;
    log::info!("updated task {}", id);
    Ok(Json(updated))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let store = state.store.lock().await;
    let mut tasks = store.load_all();
    let before = tasks.len();
    tasks.retain(|t| t.id != id);
    if tasks.len() == before {
        return Err(ApiError::NotFound);
    }
    store.save_all(&tasks)?;
    log::info!("deleted task {}", id);
    Ok(StatusCode::NO_CONTENT)
}
