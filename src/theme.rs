//! Level theming (cosmetic only)
//!
//! Themes never influence physics or collision; the simulation just passes
//! the resolved palette through to whatever draws the level. Themes may come
//! from an external text-to-theme generation service; its absence must never
//! block gameplay, so every path here has a built-in fallback.

use serde::{Deserialize, Serialize};

/// Theme record produced by the external generation service.
///
/// Field names follow the service's JSON contract, so a raw response body
/// deserializes directly. Colors are hex strings like `#0A0A2A`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelTheme {
    pub level_name: String,
    pub background_color: String,
    pub ground_color: String,
    pub platform_color: String,
    pub player_color: String,
    pub obstacle_color: String,
    pub collectible_color: String,
    pub enemy_color: String,
    /// One-sentence flavor text
    pub description: String,
}

impl LevelTheme {
    /// Parse a service response body
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Injected capability for theme generation.
///
/// The simulation never calls the service itself; the menu layer owns the
/// call and hands the result (or `None` on any failure) to level selection.
pub trait ThemeSource {
    fn generate(&self, prompt: &str) -> Option<LevelTheme>;
}

/// Resolved presentation colors for a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub background: String,
    pub ground: String,
    pub platform: String,
    /// Only present when a generated theme supplies one; otherwise the
    /// player's avatar glyph is shown instead of a colored block
    pub player: Option<String>,
    pub obstacle: String,
    pub collectible: String,
    pub enemy: String,
}

impl Palette {
    const DEFAULT_PLATFORM: &'static str = "#84cc16";
    const DEFAULT_OBSTACLE: &'static str = "#ef4444";
    const DEFAULT_COLLECTIBLE: &'static str = "#facc15";
    const DEFAULT_ENEMY: &'static str = "#f97316";

    /// Palette for a predefined level: its own background/ground colors plus
    /// the shared entity defaults
    pub fn for_level(background: &str, ground: &str) -> Self {
        Self {
            background: background.to_string(),
            ground: ground.to_string(),
            platform: Self::DEFAULT_PLATFORM.to_string(),
            player: None,
            obstacle: Self::DEFAULT_OBSTACLE.to_string(),
            collectible: Self::DEFAULT_COLLECTIBLE.to_string(),
            enemy: Self::DEFAULT_ENEMY.to_string(),
        }
    }

    /// Fallback palette for a custom run when no theme was produced
    pub fn custom_default() -> Self {
        Self::for_level("#111827", "#374151")
    }

    /// Full pass-through of a generated theme
    pub fn from_theme(theme: &LevelTheme) -> Self {
        Self {
            background: theme.background_color.clone(),
            ground: theme.ground_color.clone(),
            platform: theme.platform_color.clone(),
            player: Some(theme.player_color.clone()),
            obstacle: theme.obstacle_color.clone(),
            collectible: theme.collectible_color.clone(),
            enemy: theme.enemy_color.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVICE_RESPONSE: &str = r##"{
        "levelName": "Midnight Graveyard",
        "backgroundColor": "#0A0A2A",
        "groundColor": "#2A2A4A",
        "platformColor": "#4A4A6A",
        "playerColor": "#00FF00",
        "obstacleColor": "#FF00FF",
        "collectibleColor": "#FFFF00",
        "enemyColor": "#FF6347",
        "description": "A spooky sprint between crooked headstones."
    }"##;

    #[test]
    fn test_parse_service_response() {
        let theme = LevelTheme::from_json(SERVICE_RESPONSE).unwrap();
        assert_eq!(theme.level_name, "Midnight Graveyard");
        assert_eq!(theme.enemy_color, "#FF6347");
    }

    #[test]
    fn test_parse_rejects_incomplete_response() {
        assert!(LevelTheme::from_json(r#"{"levelName": "x"}"#).is_err());
    }

    #[test]
    fn test_palette_passes_theme_through() {
        let theme = LevelTheme::from_json(SERVICE_RESPONSE).unwrap();
        let palette = Palette::from_theme(&theme);
        assert_eq!(palette.background, "#0A0A2A");
        assert_eq!(palette.player.as_deref(), Some("#00FF00"));
    }

    #[test]
    fn test_default_palettes_have_no_player_color() {
        assert!(Palette::custom_default().player.is_none());
        assert!(Palette::for_level("#000000", "#ffffff").player.is_none());
    }
}
