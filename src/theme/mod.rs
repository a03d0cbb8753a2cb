use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Persisted presentation preference. Read once at startup, written back on
/// every change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
}

pub fn preferences_path() -> Option<PathBuf> {
    Some(crate::config::config_dir()?.join("prefs.yml"))
}

/// A missing or unreadable preferences file falls back to the defaults; the
/// file is created on the first write.
pub fn load_preferences(path: &Path) -> Preferences {
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_yaml::from_str(&contents).unwrap_or_default(),
        Err(_) => Preferences::default(),
    }
}

pub fn save_preferences(path: &Path, prefs: &Preferences) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            format!(
                "failed to create preferences directory '{}': {e}",
                parent.display()
            )
        })?;
    }
    let contents = serde_yaml::to_string(prefs)
        .map_err(|e| format!("failed to serialize preferences: {e}"))?;
    std::fs::write(path, contents)
        .map_err(|e| format!("failed to write preferences '{}': {e}", path.display()))
}
