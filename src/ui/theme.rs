use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use rust_i18n::t;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

/// The two looks the site offers. Stored in the config as "light"/"dark".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn label(self) -> String {
        match self {
            ThemeMode::Light => t!("theme.light").to_string(),
            ThemeMode::Dark => t!("theme.dark").to_string(),
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ThemeMode::Light => "☀",
            ThemeMode::Dark => "☾",
        }
    }

    /// Stored choice first, then the terminal's own background.
    pub fn preferred(stored: Option<&str>) -> Self {
        stored
            .and_then(Self::parse)
            .unwrap_or_else(|| Self::from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref()))
    }

    /// `COLORFGBG` is "fg;bg" (sometimes "fg;default;bg"); low ANSI
    /// background indices mean a dark terminal.
    pub fn from_colorfgbg(value: Option<&str>) -> Self {
        let bg = value
            .and_then(|v| v.rsplit(';').next())
            .and_then(|bg| bg.trim().parse::<u8>().ok());
        match bg {
            Some(0..=6) | Some(8) => ThemeMode::Dark,
            _ => ThemeMode::Light,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub muted: String,
    pub accent: String,
    pub accent_dim: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub error: String,
    pub warning: String,
    pub success: String,
    pub slot: String,
    pub slot_hover: String,
    pub wagon_bg: String,
    pub wagon_fg: String,
    pub placeholder: String,
    pub locomotive: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // Try user themes dir
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("potyah")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                match toml::from_str::<Theme>(&content) {
                    Ok(theme) => return Some(theme),
                    Err(err) => tracing::warn!(path = %user_theme_path.display(), "bad theme file: {err}"),
                }
            }
        }

        // Try bundled themes
        let filename = format!("{name}.toml");
        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        Self::load(mode.as_str()).unwrap_or_else(|| match mode {
            ThemeMode::Light => Self::default(),
            ThemeMode::Dark => Self {
                name: "dark".to_string(),
                colors: ThemeColors::dark(),
            },
        })
    }

    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "light".to_string(),
            colors: ThemeColors::default(),
        }
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#fdf6e3".to_string(),
            fg: "#3b3a36".to_string(),
            muted: "#93a1a1".to_string(),
            accent: "#2a7fd4".to_string(),
            accent_dim: "#d9e7f5".to_string(),
            border: "#c9c2ad".to_string(),
            border_focused: "#2a7fd4".to_string(),
            header_bg: "#eee8d5".to_string(),
            header_fg: "#3b3a36".to_string(),
            bar_filled: "#2a7fd4".to_string(),
            bar_empty: "#eee8d5".to_string(),
            error: "#d0463b".to_string(),
            warning: "#b58900".to_string(),
            success: "#4e9a06".to_string(),
            slot: "#e6dfc8".to_string(),
            slot_hover: "#f2d98c".to_string(),
            wagon_bg: "#ffffff".to_string(),
            wagon_fg: "#3b3a36".to_string(),
            placeholder: "#d9e7f5".to_string(),
            locomotive: "#d0463b".to_string(),
        }
    }
}

impl ThemeColors {
    fn dark() -> Self {
        Self {
            bg: "#1e1e2e".to_string(),
            fg: "#cdd6f4".to_string(),
            muted: "#6c7086".to_string(),
            accent: "#89b4fa".to_string(),
            accent_dim: "#45475a".to_string(),
            border: "#45475a".to_string(),
            border_focused: "#89b4fa".to_string(),
            header_bg: "#313244".to_string(),
            header_fg: "#cdd6f4".to_string(),
            bar_filled: "#89b4fa".to_string(),
            bar_empty: "#313244".to_string(),
            error: "#f38ba8".to_string(),
            warning: "#f9e2af".to_string(),
            success: "#a6e3a1".to_string(),
            slot: "#313244".to_string(),
            slot_hover: "#585b70".to_string(),
            wagon_bg: "#45475a".to_string(),
            wagon_fg: "#cdd6f4".to_string(),
            placeholder: "#585b70".to_string(),
            locomotive: "#f38ba8".to_string(),
        }
    }

    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn muted(&self) -> Color { Self::parse_color(&self.muted) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn accent_dim(&self) -> Color { Self::parse_color(&self.accent_dim) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(&self.border_focused) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
    pub fn slot(&self) -> Color { Self::parse_color(&self.slot) }
    pub fn slot_hover(&self) -> Color { Self::parse_color(&self.slot_hover) }
    pub fn wagon_bg(&self) -> Color { Self::parse_color(&self.wagon_bg) }
    pub fn wagon_fg(&self) -> Color { Self::parse_color(&self.wagon_fg) }
    pub fn placeholder(&self) -> Color { Self::parse_color(&self.placeholder) }
    pub fn locomotive(&self) -> Color { Self::parse_color(&self.locomotive) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_themes_parse() {
        let mut names = Theme::available_themes();
        names.sort();
        assert_eq!(names, vec!["dark", "light"]);
        for name in names {
            let theme = Theme::load(&name).unwrap();
            assert_eq!(theme.name, name);
            assert!(matches!(theme.colors.bg(), Color::Rgb(..)));
        }
    }

    #[test]
    fn mode_toggles_and_labels() {
        assert_eq!(ThemeMode::Light.toggle(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggle(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.label(), "Світла тема");
        assert_eq!(ThemeMode::Dark.label(), "Темна тема");
    }

    #[test]
    fn stored_choice_wins() {
        assert_eq!(ThemeMode::preferred(Some("dark")), ThemeMode::Dark);
        assert_eq!(ThemeMode::preferred(Some("light")), ThemeMode::Light);
    }

    #[test]
    fn terminal_background_decides_when_unset() {
        assert_eq!(ThemeMode::from_colorfgbg(Some("15;0")), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_colorfgbg(Some("0;default;15")), ThemeMode::Light);
        assert_eq!(ThemeMode::from_colorfgbg(Some("garbage")), ThemeMode::Light);
        assert_eq!(ThemeMode::from_colorfgbg(None), ThemeMode::Light);
    }

    #[test]
    fn parse_color_falls_back_to_white() {
        assert_eq!(ThemeColors::parse_color("#102030"), Color::Rgb(16, 32, 48));
        assert_eq!(ThemeColors::parse_color("nope"), Color::White);
    }
}
