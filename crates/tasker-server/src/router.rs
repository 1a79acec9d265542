//! Category-scoped REST routes in front of [`TaskStore`].
//!
//! Every route that carries a `{category}` segment sits behind
//! [`require_category`], so a request naming an unknown category is
//! rejected before any handler (and therefore any store call) runs.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{any, delete, get, put};
use axum::{Extension, Json, Router};
use serde::Serialize;
use tasker_core::{Category, MonotonicClock, NewTask, Task};
use tasker_store::{Criteria, TaskStore};
use tracing::{debug, info};

use crate::body;
use crate::errors::ApiError;

/// Prefix the routes are served under.
pub const API_BASE: &str = "/api/v1";

/// Validation and orchestration layer over a shared [`TaskStore`].
#[derive(Clone)]
pub struct TaskRouter {
    store: TaskStore,
    clock: Arc<MonotonicClock>,
}

#[derive(Debug, Serialize)]
pub struct TaskList {
    pub tasks: Vec<Task>,
}

impl TaskRouter {
    pub fn new(store: TaskStore) -> Self {
        Self {
            store,
            clock: Arc::new(MonotonicClock::new()),
        }
    }

    /// Routes without the [`API_BASE`] prefix.
    pub fn routes(self) -> Router {
        Router::new()
            .route(
                "/{category}",
                get(list).post(create).put(missing_id).delete(missing_id),
            )
            .route("/{category}/", put(missing_id).delete(missing_id))
            .route("/{category}/completed", delete(delete_completed))
            .route("/{category}/{id}", put(update).delete(remove))
            .route_layer(middleware::from_fn(require_category))
            .route("/", any(missing_category))
            .with_state(self)
    }

    /// Run a store operation off the async executor.
    async fn blocking<F, T>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&TaskStore) -> tasker_store::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|e| ApiError::Internal(format!("store task failed: {e}")))?
            .map_err(ApiError::from)
    }
}

/// Whitelist check on the raw category segment.
pub fn check_category(raw: Option<&str>) -> Result<Category, ApiError> {
    match raw {
        None | Some("") => Err(ApiError::BadRequest("Task type required.".into())),
        Some(raw) => Category::parse(raw)
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown task type: {raw}"))),
    }
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid task id: {raw}")))
}

async fn require_category(
    Path(params): Path<HashMap<String, String>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let category = check_category(params.get("category").map(String::as_str))?;
    let _ = req.extensions_mut().insert(category);
    Ok(next.run(req).await)
}

pub(crate) async fn missing_category() -> ApiError {
    ApiError::BadRequest("Task type required.".into())
}

async fn missing_id() -> ApiError {
    ApiError::BadRequest("Task id required.".into())
}

async fn list(
    State(router): State<TaskRouter>,
    Extension(category): Extension<Category>,
) -> Result<Json<TaskList>, ApiError> {
    let tasks = router
        .blocking(move |store| store.list(category.as_str()))
        .await?;
    debug!(%category, count = tasks.len(), "listed tasks");
    Ok(Json(TaskList { tasks }))
}

async fn update(
    State(router): State<TaskRouter>,
    Extension(category): Extension<Category>,
    Path((_, raw_id)): Path<(String, String)>,
    bytes: Bytes,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&raw_id)?;
    let fields = body::parse_object(&bytes)?;
    if !body::all_present(&fields, &["name", "completed"]) {
        return Err(ApiError::BadRequest(
            "Fields 'name' and 'completed' are required.".into(),
        ));
    }

    let task = Task {
        id,
        last_updated: router.clock.now_iso(),
        name: body::name_field(&fields)?,
        completed: fields.get("completed").is_some_and(body::truthy),
    };

    let stored = task.clone();
    let found = router
        .blocking(move |store| store.update(category.as_str(), &stored))
        .await?;
    if !found {
        return Err(ApiError::NotFound(format!("No {category} task with id {id}.")));
    }

    info!(%category, id, "task updated");
    Ok(Json(task))
}

async fn create(
    State(router): State<TaskRouter>,
    Extension(category): Extension<Category>,
    bytes: Bytes,
) -> Result<Json<Task>, ApiError> {
    let fields = body::parse_object(&bytes)?;
    if !body::is_present(&fields, "name") {
        return Err(ApiError::BadRequest("Field 'name' is required.".into()));
    }

    let task = NewTask {
        last_updated: router.clock.now_iso(),
        name: body::name_field(&fields)?,
        completed: fields.get("completed").is_some_and(body::truthy),
    };

    let stored = task.clone();
    let id = router
        .blocking(move |store| store.insert(category.as_str(), &stored))
        .await?;

    info!(%category, id, "task created");
    Ok(Json(task.with_id(id)))
}

async fn remove(
    State(router): State<TaskRouter>,
    Extension(category): Extension<Category>,
    Path((_, raw_id)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(&raw_id)?;
    let removed = router
        .blocking(move |store| store.delete(category.as_str(), &Criteria::by_id(id)))
        .await?;
    if !removed {
        return Err(ApiError::NotFound(format!("No {category} task with id {id}.")));
    }

    info!(%category, id, "task deleted");
    Ok(Json(serde_json::json!({ "deleted": true })))
}

async fn delete_completed(
    State(router): State<TaskRouter>,
    Extension(category): Extension<Category>,
) -> Result<Json<TaskList>, ApiError> {
    let tasks = router
        .blocking(move |store| {
            // Zero completed rows is fine; the remaining list is the answer.
            let removed = store.delete(category.as_str(), &Criteria::completed(true))?;
            debug!(%category, removed, "cleared completed tasks");
            store.list(category.as_str())
        })
        .await?;
    Ok(Json(TaskList { tasks }))
}
