use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use crate::errors::AppResult;
use crate::models::{Theme, ThemeForm};
use super::SharedWorkspace;

pub async fn get_theme(
    State(workspace): State<SharedWorkspace>,
) -> AppResult<Response> {
    let ws = workspace.lock().await;
    Ok(Json(json!({ "theme": ws.preferences.theme()? })).into_response())
}

pub async fn set_theme(
    State(workspace): State<SharedWorkspace>,
    Json(form): Json<ThemeForm>,
) -> AppResult<Response> {
    let theme = Theme::parse_or_default(&form.theme);
    let ws = workspace.lock().await;
    ws.preferences.set_theme(theme)?;
    Ok(Json(json!({ "theme": theme })).into_response())
}

pub async fn toggle_theme(
    State(workspace): State<SharedWorkspace>,
) -> AppResult<Response> {
    let ws = workspace.lock().await;
    let theme = ws.preferences.toggle_theme()?;
    Ok(Json(json!({
        "theme": theme,
        "message": format!("Switched to {} theme", theme),
    })).into_response())
}
