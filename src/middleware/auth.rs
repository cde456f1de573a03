use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use crate::errors::AppError;
use crate::handlers::SharedWorkspace;

// Guards the task routes; the engine enforces the same rule on every call.
pub async fn require_auth(
    State(workspace): State<SharedWorkspace>,
    req: Request,
    next: Next,
) -> Response {
    let signed_in = workspace.lock().await.tasks.current_user().is_some();
    if !signed_in {
        tracing::debug!("Rejected {} without a session", req.uri().path());
        return AppError::NotAuthenticated.into_response();
    }
    next.run(req).await
}
