//! Persisted session types: user preferences and their partial-update form.

use serde::{Deserialize, Serialize};

use crate::config;

// ============================================================================
// Preference Tiers
// ============================================================================

/// Font size tier for the rendering layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Speed tier for the simulated typing stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    /// No per-line delay at all.
    Off,
    Slow,
    #[default]
    Normal,
    Fast,
}

// ============================================================================
// Preferences
// ============================================================================

/// Fixed-shape user preferences record, persisted across sessions.
///
/// Every field carries a serde default so records written by older builds
/// still deserialize.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: String,
    pub history_size: usize,
    pub autocomplete: bool,
    pub font_size: FontSize,
    pub animation_speed: AnimationSpeed,
    pub show_welcome: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: config::DEFAULT_THEME.to_string(),
            history_size: config::DEFAULT_HISTORY_SIZE,
            autocomplete: true,
            font_size: FontSize::default(),
            animation_speed: AnimationSpeed::default(),
            show_welcome: true,
        }
    }
}

/// Partial preferences update. `None` fields keep their current value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreferencesPatch {
    pub theme: Option<String>,
    pub history_size: Option<usize>,
    pub autocomplete: Option<bool>,
    pub font_size: Option<FontSize>,
    pub animation_speed: Option<AnimationSpeed>,
    pub show_welcome: Option<bool>,
}

impl Preferences {
    /// Merge a partial update over the current record.
    pub fn apply(&mut self, patch: PreferencesPatch) {
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(size) = patch.history_size {
            // A zero-length history would make the cap invariant meaningless.
            self.history_size = size.max(1);
        }
        if let Some(autocomplete) = patch.autocomplete {
            self.autocomplete = autocomplete;
        }
        if let Some(font_size) = patch.font_size {
            self.font_size = font_size;
        }
        if let Some(speed) = patch.animation_speed {
            self.animation_speed = speed;
        }
        if let Some(show) = patch.show_welcome {
            self.show_welcome = show;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.theme, config::DEFAULT_THEME);
        assert_eq!(prefs.history_size, config::DEFAULT_HISTORY_SIZE);
        assert!(prefs.autocomplete);
        assert!(prefs.show_welcome);
    }

    #[test]
    fn test_apply_patch() {
        let mut prefs = Preferences::default();
        prefs.apply(PreferencesPatch {
            theme: Some("light".to_string()),
            history_size: Some(10),
            ..Default::default()
        });
        assert_eq!(prefs.theme, "light");
        assert_eq!(prefs.history_size, 10);
        // Untouched fields keep their values.
        assert!(prefs.autocomplete);
    }

    #[test]
    fn test_history_size_floor() {
        let mut prefs = Preferences::default();
        prefs.apply(PreferencesPatch {
            history_size: Some(0),
            ..Default::default()
        });
        assert_eq!(prefs.history_size, 1);
    }

    #[test]
    fn test_roundtrip_json() {
        let prefs = Preferences::default();
        let json = serde_json::to_string(&prefs).unwrap();
        let back: Preferences = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prefs);
    }

    #[test]
    fn test_partial_record_deserializes() {
        let back: Preferences = serde_json::from_str(r#"{"theme":"light"}"#).unwrap();
        assert_eq!(back.theme, "light");
        assert_eq!(back.history_size, config::DEFAULT_HISTORY_SIZE);
    }
}
