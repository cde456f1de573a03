use crate::errors::AppResult;
use crate::models::Theme;
use super::storage::{Namespace, SharedStore};

// Process-wide display preferences; not tied to the signed-in user.
pub struct Preferences {
    store: SharedStore,
    theme_key: String,
}

impl Preferences {
    pub fn new(store: SharedStore, namespace: &Namespace) -> Self {
        Self { store, theme_key: namespace.theme() }
    }

    pub fn theme(&self) -> AppResult<Theme> {
        let raw = self.store.get(&self.theme_key)?;
        Ok(raw.as_deref().map(Theme::parse_or_default).unwrap_or_default())
    }

    pub fn set_theme(&self, theme: Theme) -> AppResult<()> {
        self.store.set(&self.theme_key, theme.as_str())?;
        tracing::debug!("Theme set to {}", theme);
        Ok(())
    }

    pub fn toggle_theme(&self) -> AppResult<Theme> {
        let theme = self.theme()?.toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }
}
