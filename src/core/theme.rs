use crate::domain::model::Theme;
use crate::domain::ports::PreferenceStore;
use crate::utils::error::Result;

pub const THEME_KEY: &str = "theme";

/// Reads and writes the persisted theme choice.
pub struct ThemePreference<P: PreferenceStore> {
    store: P,
}

impl<P: PreferenceStore> ThemePreference<P> {
    pub fn new(store: P) -> Self {
        Self { store }
    }

    /// The stored theme, or `system` when nothing usable is stored.
    ///
    /// A broken preference file must not keep the page from rendering, so
    /// read errors degrade to the fallback as well.
    pub async fn resolve(&self, system: Theme) -> Theme {
        match self.store.get(THEME_KEY).await {
            Ok(Some(raw)) => match raw.parse::<Theme>() {
                Ok(theme) => theme,
                Err(e) => {
                    tracing::warn!("Ignoring stored theme: {}", e);
                    system
                }
            },
            Ok(None) => system,
            Err(e) => {
                tracing::warn!("Could not read theme preference: {}", e);
                system
            }
        }
    }

    pub async fn persist(&self, theme: Theme) -> Result<()> {
        self.store.set(THEME_KEY, theme.as_str()).await
    }
}

/// Best guess at the terminal's colour scheme.
///
/// `COLORFGBG` is `"<fg>;<bg>"` (sometimes with a middle field); background
/// colours 7 and 9..=15 are the light ones.
pub fn system_theme() -> Theme {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| theme_from_colorfgbg(&value))
        .unwrap_or_default()
}

pub fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(match bg {
        7 | 9..=15 => Theme::Light,
        _ => Theme::Dark,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorfgbg_parsing() {
        assert_eq!(theme_from_colorfgbg("15;0"), Some(Theme::Dark));
        assert_eq!(theme_from_colorfgbg("0;15"), Some(Theme::Light));
        assert_eq!(theme_from_colorfgbg("0;default;7"), Some(Theme::Light));
        assert_eq!(theme_from_colorfgbg("garbage"), None);
        assert_eq!(theme_from_colorfgbg(""), None);
    }
}
