mod user;
mod forms;
mod task;
mod theme;

pub use user::{UserCredential, UserMap};
pub use forms::{LoginForm, RegisterForm, TaskTextForm, ReorderForm, ThemeForm, FilterQuery};
pub use task::{Task, FilterMode, Progress};
pub use theme::Theme;
