mod auth;
mod task;
mod preferences;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir};
use crate::config::ServerConfig;
use crate::middleware::require_auth;
use crate::services::Workspace;

pub use auth::{handle_register, handle_login, handle_logout, current_session};
pub use task::{list_tasks, add_task, edit_task, toggle_task, delete_task, clear_completed, reorder_tasks, get_progress};
pub use preferences::{get_theme, set_theme, toggle_theme};

// A single lock around the whole core: each command runs to completion before the next starts.
pub type SharedWorkspace = Arc<Mutex<Workspace>>;

pub fn router(workspace: SharedWorkspace, server: &ServerConfig) -> Router {
    let task_routes = Router::new()
        .route("/api/tasks", get(list_tasks).post(add_task))
        .route("/api/tasks/clear-completed", post(clear_completed))
        .route("/api/tasks/reorder", post(reorder_tasks))
        .route("/api/tasks/:task_id", put(edit_task).delete(delete_task))
        .route("/api/tasks/:task_id/toggle", post(toggle_task))
        .route("/api/progress", get(get_progress))
        .route_layer(from_fn_with_state(workspace.clone(), require_auth));

    Router::new()
        // Auth routes
        .route("/api/signup", post(handle_register))
        .route("/api/login", post(handle_login))
        .route("/api/logout", post(handle_logout))
        .route("/api/session", get(current_session))

        // Preference routes
        .route("/api/theme", get(get_theme).put(set_theme))
        .route("/api/theme/toggle", post(toggle_theme))

        .merge(task_routes)

        // Presentation assets
        .fallback_service(ServeDir::new(&server.static_dir))

        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(server.max_body_size))
        .with_state(workspace)
}
