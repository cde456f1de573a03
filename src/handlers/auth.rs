use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use crate::errors::AppResult;
use crate::models::{LoginForm, RegisterForm};
use super::SharedWorkspace;

pub async fn handle_register(
    State(workspace): State<SharedWorkspace>,
    Json(register_form): Json<RegisterForm>,
) -> AppResult<Response> {
    tracing::info!("Registration attempt for user: {}", register_form.username);

    let mut guard = workspace.lock().await;
    let ws = &mut *guard;
    let username = ws.auth.sign_up(
        &mut ws.tasks,
        &register_form.username,
        &register_form.password,
        &register_form.confirm_password,
    )?;

    Ok(Json(json!({
        "user": username,
        "message": "Account created successfully",
    })).into_response())
}

pub async fn handle_login(
    State(workspace): State<SharedWorkspace>,
    Json(login_form): Json<LoginForm>,
) -> AppResult<Response> {
    tracing::info!("Login attempt for user: {}", login_form.username);

    let mut guard = workspace.lock().await;
    let ws = &mut *guard;
    let username = ws.auth.sign_in(&mut ws.tasks, &login_form.username, &login_form.password)?;

    Ok(Json(json!({
        "user": username,
        "message": format!("Welcome back, {}!", username),
    })).into_response())
}

pub async fn handle_logout(
    State(workspace): State<SharedWorkspace>,
) -> AppResult<Response> {
    let mut guard = workspace.lock().await;
    let ws = &mut *guard;
    ws.auth.log_out(&mut ws.tasks)?;

    Ok(Json(json!({ "message": "Logged out successfully" })).into_response())
}

pub async fn current_session(
    State(workspace): State<SharedWorkspace>,
) -> Response {
    let ws = workspace.lock().await;
    Json(json!({ "user": ws.tasks.current_user() })).into_response()
}
