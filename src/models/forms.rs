use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

// Body of both add and edit requests
#[derive(Debug, Deserialize)]
pub struct TaskTextForm {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ReorderForm {
    pub dragged_id: String,
    pub target_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ThemeForm {
    pub theme: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct FilterQuery {
    pub filter: Option<String>,
}
