use log::warn;

use crate::db::DbPool;
use crate::models::settings::Setting;

/// Settings key holding the persisted preference.
const THEME_KEY: &str = "theme";

/// The two page themes, applied as a class on the document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Class name applied to `<html>`.
    pub fn as_class(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Exactly the two class strings parse; anything else counts as
    /// no stored preference.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    fn flipped(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Current theme: persisted preference, else the platform dark-mode
    /// report, else light. Only resolution chooses an implicit default.
    pub fn resolve(pool: &DbPool, system_prefers_dark: bool) -> Self {
        if let Some(saved) = Setting::get(pool, THEME_KEY).as_deref().and_then(Theme::parse) {
            return saved;
        }
        if system_prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Flip the current state and persist the result. Returns the new state.
    pub fn toggle(pool: &DbPool, system_prefers_dark: bool) -> Self {
        let next = Self::resolve(pool, system_prefers_dark).flipped();
        if let Err(e) = Setting::set(pool, THEME_KEY, next.as_class()) {
            warn!("Could not persist theme preference: {}", e);
        }
        next
    }

    /// Whether the invoking environment reports a dark-mode preference.
    /// Named for the media query it stands in for.
    pub fn system_prefers_dark() -> bool {
        std::env::var("PREFERS_COLOR_SCHEME")
            .map(|v| v == "dark")
            .unwrap_or(false)
    }
}
