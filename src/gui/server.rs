//! HTTP server implementation for the web GUI.
//!
//! This module provides the axum-based server that serves the task viewer
//! page and exposes the REST API it talks to. All API handlers operate on a
//! target directory, defaulting to the workspace the server was started in,
//! so one server instance can edit every store the scanner finds.

use std::io::ErrorKind;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::Command;

use axum::{
    extract::{Path as UrlPath, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::templates;
use crate::error::Result;
use crate::scanner::{scan_task_files, TaskFileInfo};
use crate::storage::{task_file, FileStore, TaskStore};
use crate::task::{Stage, Task};
use crate::tasks::{self, CreateOptions, PurgeOptions, UpdateFields};

/// Default port for the GUI server.
pub const DEFAULT_PORT: u16 = 3333;

/// Consecutive ports tried when the requested one is taken.
const BIND_ATTEMPTS: u16 = 10;

/// GUI server state shared across handlers.
#[derive(Clone)]
struct GuiServer {
    /// Workspace directory the server was started in.
    dir: PathBuf,
}

impl GuiServer {
    /// Task file targeted by a request, honoring a per-request dir override.
    fn store_path(&self, dir: Option<PathBuf>) -> PathBuf {
        task_file(dir.as_deref().unwrap_or(&self.dir))
    }
}

/// Start the GUI server and run until interrupted.
pub async fn serve(dir: PathBuf, port: u16) -> Result<()> {
    let listener = bind_listener(port).await?;
    let addr = listener.local_addr()?;
    let url = format!("http://localhost:{}", addr.port());

    println!("Task Tracker GUI running at {}", url);
    println!("Watching: {}", dir.display());
    println!("Press Ctrl+C to stop.");
    open_browser(&url);

    let app = build_router(GuiServer { dir });
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

/// Bind to the requested port, walking forward past ports already in use.
async fn bind_listener(start_port: u16) -> std::io::Result<TcpListener> {
    let mut last_err = None;
    for offset in 0..BIND_ATTEMPTS {
        let Some(port) = start_port.checked_add(offset) else {
            break;
        };
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        match TcpListener::bind(addr).await {
            Ok(listener) => return Ok(listener),
            Err(err) if err.kind() == ErrorKind::AddrInUse => {
                tracing::debug!(port, "port in use, trying the next one");
                last_err = Some(err);
            }
            Err(err) => return Err(err),
        }
    }
    Err(last_err.unwrap_or_else(|| ErrorKind::AddrInUse.into()))
}

/// Build the router with all routes.
fn build_router(state: GuiServer) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_page))
        .route("/api/tasks", get(api_workspace).post(api_create))
        .route("/api/tasks/purge", post(api_purge))
        .route("/api/tasks/{id}", put(api_update).delete(api_remove))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// One task file with its contents loaded.
#[derive(Serialize)]
struct StoreView {
    path: PathBuf,
    dir: PathBuf,
    name: String,
    tasks: Vec<Task>,
}

/// Full workspace payload for the viewer page.
#[derive(Serialize)]
struct WorkspaceView {
    root: Option<StoreView>,
    repos: Vec<StoreView>,
}

fn load_store(info: TaskFileInfo) -> Result<StoreView> {
    let tasks = FileStore.read(&info.path)?;
    Ok(StoreView {
        path: info.path,
        dir: info.dir,
        name: info.name,
        tasks,
    })
}

fn load_workspace(dir: &Path) -> Result<WorkspaceView> {
    let scan = scan_task_files(dir);
    let root = scan.root.map(load_store).transpose()?;
    let repos = scan
        .repos
        .into_iter()
        .map(load_store)
        .collect::<Result<Vec<_>>>()?;
    Ok(WorkspaceView { root, repos })
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn internal_error(err: crate::error::Error) -> Response {
    tracing::error!(%err, "request failed");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

/// Parse a JSON request body. An empty body is treated as `{}`.
fn parse_body<T>(raw: &str) -> std::result::Result<T, Response>
where
    T: DeserializeOwned + Default,
{
    if raw.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(raw)
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, "Invalid JSON body"))
}

#[derive(Debug, Default, Deserialize)]
struct DirQuery {
    dir: Option<PathBuf>,
}

/// Root endpoint - serves the viewer page with the workspace dir injected.
async fn index_page(State(state): State<GuiServer>) -> Html<String> {
    let dir_json = serde_json::to_string(&state.dir.display().to_string())
        .unwrap_or_else(|_| "\"\"".to_string());
    Html(templates::INDEX_TEMPLATE.replace("__GUI_DIR__", &dir_json))
}

/// GET /api/tasks - scan the workspace and return every store with tasks.
async fn api_workspace(State(state): State<GuiServer>, Query(query): Query<DirQuery>) -> Response {
    let dir = query.dir.unwrap_or_else(|| state.dir.clone());
    match load_workspace(&dir) {
        Ok(view) => Json(view).into_response(),
        Err(err) => internal_error(err),
    }
}

#[derive(Debug, Default, Deserialize)]
struct CreateBody {
    description: Option<String>,
    stage: Option<String>,
    repo: Option<String>,
    dir: Option<PathBuf>,
}

/// POST /api/tasks - create a task in the target store.
async fn api_create(State(state): State<GuiServer>, body: String) -> Response {
    let body: CreateBody = match parse_body(&body) {
        Ok(body) => body,
        Err(resp) => return resp,
    };

    let description = match body.description.as_deref().map(str::trim) {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => return error_response(StatusCode::BAD_REQUEST, "description is required"),
    };

    // An unknown stage name falls back to the default rather than failing.
    let stage = body.stage.as_deref().and_then(|s| s.parse::<Stage>().ok());
    let path = state.store_path(body.dir);

    match tasks::create_task(
        &FileStore,
        &path,
        &description,
        CreateOptions {
            stage,
            repo: body.repo,
        },
    ) {
        Ok(task) => (StatusCode::CREATED, Json(task)).into_response(),
        Err(err) => internal_error(err),
    }
}

#[derive(Debug, Default, Deserialize)]
struct UpdateBody {
    stage: Option<String>,
    description: Option<String>,
    repo: Option<String>,
    dir: Option<PathBuf>,
}

/// PUT /api/tasks/{id} - apply a partial update.
async fn api_update(
    State(state): State<GuiServer>,
    UrlPath(id): UrlPath<String>,
    body: String,
) -> Response {
    let body: UpdateBody = match parse_body(&body) {
        Ok(body) => body,
        Err(resp) => return resp,
    };

    let stage = body.stage.as_deref().and_then(|s| s.parse::<Stage>().ok());
    let description = body.description.filter(|d| !d.trim().is_empty());
    let path = state.store_path(body.dir);

    match tasks::update_task(
        &FileStore,
        &path,
        &id,
        UpdateFields {
            stage,
            description,
            repo: body.repo,
        },
    ) {
        Ok(Some(task)) => Json(task).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Task not found"),
        Err(err) => internal_error(err),
    }
}

/// DELETE /api/tasks/{id} - remove a task permanently.
async fn api_remove(
    State(state): State<GuiServer>,
    UrlPath(id): UrlPath<String>,
    Query(query): Query<DirQuery>,
) -> Response {
    let path = state.store_path(query.dir);
    match tasks::remove_task(&FileStore, &path, &id) {
        Ok(true) => Json(json!({ "removed": true })).into_response(),
        Ok(false) => error_response(StatusCode::NOT_FOUND, "Task not found"),
        Err(err) => internal_error(err),
    }
}

#[derive(Debug, Default, Deserialize)]
struct PurgeBody {
    dir: Option<PathBuf>,
}

/// POST /api/tasks/purge - purge every done task in the target store.
async fn api_purge(State(state): State<GuiServer>, body: String) -> Response {
    let body: PurgeBody = match parse_body(&body) {
        Ok(body) => body,
        Err(resp) => return resp,
    };

    let path = state.store_path(body.dir);
    match tasks::purge_tasks(&FileStore, &path, PurgeOptions::default()) {
        Ok(result) => {
            let ids: Vec<&str> = result.purged.iter().map(|t| t.id.as_str()).collect();
            Json(json!({ "count": result.count, "ids": ids })).into_response()
        }
        Err(err) => internal_error(err),
    }
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

/// Open the GUI in the default browser, best effort.
fn open_browser(url: &str) {
    #[cfg(target_os = "macos")]
    let launched = Command::new("open").arg(url).spawn();
    #[cfg(target_os = "windows")]
    let launched = Command::new("cmd").args(["/C", "start", "", url]).spawn();
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let launched = Command::new("xdg-open").arg(url).spawn();

    if launched.is_err() {
        println!("Could not open browser automatically. Visit: {}", url);
    }
}
