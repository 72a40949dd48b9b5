//! Light/dark theme selection and the header toggle button.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Key under which the chosen theme is persisted.
pub const STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
    System,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    /// Collapses `System` into the concrete theme the OS asks for.
    pub fn resolve(self, system_prefers_dark: bool) -> Theme {
        match self {
            Theme::System if system_prefers_dark => Theme::Dark,
            Theme::System => Theme::Light,
            concrete => concrete,
        }
    }

    /// The theme a toggle click switches to.
    pub fn toggled(resolved: Theme) -> Theme {
        if resolved == Theme::Dark {
            Theme::Light
        } else {
            Theme::Dark
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(Error::UnknownTheme(other.to_owned())),
        }
    }
}

/// Where the current theme lives and how it is applied.
pub trait ThemeStore {
    fn current(&self) -> Theme;

    fn set(&self, theme: Theme);

    fn system_prefers_dark(&self) -> bool;

    fn resolved(&self) -> Theme {
        self.current().resolve(self.system_prefers_dark())
    }
}

/// Icon and enabled state of the toggle button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleView {
    pub disabled: bool,
    /// `None` until mounted: no icon is drawn before the stored theme is known.
    pub sun_classes: Option<&'static str>,
    pub moon_classes: Option<&'static str>,
}

/// Header button flipping between light and dark.
///
/// Stays disabled until [`mount`](Self::mount) so the first paint never shows
/// an icon for the wrong theme.
#[derive(Debug, Default)]
pub struct ThemeToggle {
    mounted: bool,
}

impl ThemeToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self) {
        self.mounted = true;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Reads the resolved theme once and writes its opposite once.
    pub fn click<T: ThemeStore + ?Sized>(&self, store: &T) -> Option<Theme> {
        if !self.mounted {
            return None;
        }
        let next = Theme::toggled(store.resolved());
        store.set(next);
        log::debug!("theme switched to {next}");
        Some(next)
    }

    pub fn view<T: ThemeStore + ?Sized>(&self, store: &T) -> ToggleView {
        if !self.mounted {
            return ToggleView {
                disabled: true,
                sun_classes: None,
                moon_classes: None,
            };
        }
        let dark = store.resolved() == Theme::Dark;
        ToggleView {
            disabled: false,
            sun_classes: Some(if dark {
                "rotate-0 scale-100 opacity-100"
            } else {
                "rotate-90 scale-0 opacity-0"
            }),
            moon_classes: Some(if dark {
                "-rotate-90 scale-0 opacity-0"
            } else {
                "rotate-0 scale-100 opacity-100"
            }),
        }
    }
}
