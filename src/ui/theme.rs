//! # Theme System
//!
//! Provides the color palettes used by the visualizer.
//!
//! ## Overview
//!
//! The [`Theme`] struct defines all colors used throughout the UI. Rendering
//! code references theme fields rather than hardcoded `ratatui::style::Color`
//! values. The active theme can be cycled at runtime with `T`.
//!
//! ## Built-in Themes
//!
//! - **Classic** (default) - light-blue tokens that turn green when found
//! - **Catppuccin Mocha** - warm, dark pastel theme
//! - **Nord** - arctic, north-bluish color palette
//! - **Dracula** - dark theme with vivid colors
//!
//! Token and highlight colors are always `Color::Rgb` so the renderer can
//! blend between them during the fill and fade stages.

use ratatui::style::Color;

/// All colors used by the TUI, grouped by semantic role.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Human-readable name, also the value stored in the config file.
    pub name: &'static str,

    // -- Background colors --
    /// Main background color for panels and modals.
    pub bg: Color,

    // -- Foreground / text colors --
    /// Primary text color.
    pub fg: Color,
    /// Muted/secondary text (index labels, hints, footer).
    pub fg_dim: Color,

    // -- Accent / brand colors --
    /// Focused borders, header, prompt titles.
    pub accent: Color,
    /// Probed-midpoint markers in the steps panel.
    pub secondary: Color,

    // -- Token colors --
    /// Resting fill of a token.
    pub token: Color,
    /// Fill a found token blends towards.
    pub highlight: Color,

    // -- Semantic status colors --
    /// Success / green indicator.
    pub success: Color,
    /// Error / red indicator.
    pub error: Color,
}

impl Theme {
    /// Return the list of all built-in themes (order = cycle order).
    pub fn all() -> &'static [Theme] {
        &BUILT_IN_THEMES
    }

    /// Find a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Return the default theme (Classic).
    pub fn default_theme() -> &'static Theme {
        &BUILT_IN_THEMES[0]
    }

    /// The theme after this one in cycle order, wrapping around.
    pub fn next(&self) -> &'static Theme {
        let position = BUILT_IN_THEMES
            .iter()
            .position(|t| t.name == self.name)
            .unwrap_or(0);
        &BUILT_IN_THEMES[(position + 1) % BUILT_IN_THEMES.len()]
    }
}

// ---------------------------------------------------------------------------
// Built-in theme definitions
// ---------------------------------------------------------------------------

static BUILT_IN_THEMES: [Theme; 4] = [
    // 0 - Classic (default)
    Theme {
        name: "Classic",
        bg: Color::Rgb(20, 24, 33),
        fg: Color::Rgb(230, 236, 245),
        fg_dim: Color::Rgb(120, 130, 150),
        accent: Color::Rgb(135, 206, 250),    // light sky blue
        secondary: Color::Rgb(255, 215, 0),   // gold
        token: Color::Rgb(173, 216, 230),     // light blue
        highlight: Color::Rgb(0, 128, 0),     // green
        success: Color::Rgb(0, 200, 83),
        error: Color::Rgb(239, 83, 80),
    },
    // 1 - Catppuccin Mocha
    Theme {
        name: "Catppuccin Mocha",
        bg: Color::Rgb(30, 30, 46),           // base
        fg: Color::Rgb(205, 214, 244),        // text
        fg_dim: Color::Rgb(108, 112, 134),    // overlay0
        accent: Color::Rgb(137, 180, 250),    // blue
        secondary: Color::Rgb(249, 226, 175), // yellow
        token: Color::Rgb(116, 199, 236),     // sapphire
        highlight: Color::Rgb(166, 227, 161), // green
        success: Color::Rgb(166, 227, 161),   // green
        error: Color::Rgb(243, 139, 168),     // red
    },
    // 2 - Nord
    Theme {
        name: "Nord",
        bg: Color::Rgb(46, 52, 64),
        fg: Color::Rgb(216, 222, 233),
        fg_dim: Color::Rgb(76, 86, 106),
        accent: Color::Rgb(136, 192, 208),    // frost
        secondary: Color::Rgb(235, 203, 139), // yellow
        token: Color::Rgb(129, 161, 193),
        highlight: Color::Rgb(163, 190, 140),
        success: Color::Rgb(163, 190, 140),
        error: Color::Rgb(191, 97, 106),
    },
    // 3 - Dracula
    Theme {
        name: "Dracula",
        bg: Color::Rgb(40, 42, 54),
        fg: Color::Rgb(248, 248, 242),
        fg_dim: Color::Rgb(98, 114, 164),
        accent: Color::Rgb(139, 233, 253),    // cyan
        secondary: Color::Rgb(241, 250, 140), // yellow
        token: Color::Rgb(189, 147, 249),     // purple
        highlight: Color::Rgb(80, 250, 123),  // green
        success: Color::Rgb(80, 250, 123),
        error: Color::Rgb(255, 85, 85),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    /// Convert a catppuccin color to a ratatui Color via its RGB values.
    fn ctp(color: catppuccin::Color) -> Color {
        Color::Rgb(color.rgb.r, color.rgb.g, color.rgb.b)
    }

    #[test]
    fn test_default_is_classic() {
        assert_eq!(Theme::default_theme().name, "Classic");
    }

    #[test]
    fn test_by_name_case_insensitive() {
        assert!(Theme::by_name("catppuccin mocha").is_some());
        assert!(Theme::by_name("CLASSIC").is_some());
        assert!(Theme::by_name("dracula").is_some());
        assert!(Theme::by_name("nonexistent").is_none());
    }

    #[test]
    fn test_catppuccin_mocha_matches_palette() {
        let mocha = catppuccin::PALETTE.mocha.colors;
        let theme = Theme::by_name("Catppuccin Mocha").expect("theme exists");
        assert_eq!(theme.bg, ctp(mocha.base));
        assert_eq!(theme.fg, ctp(mocha.text));
        assert_eq!(theme.accent, ctp(mocha.blue));
        assert_eq!(theme.token, ctp(mocha.sapphire));
        assert_eq!(theme.highlight, ctp(mocha.green));
        assert_eq!(theme.error, ctp(mocha.red));
    }

    #[test]
    fn test_next_cycles_through_all() {
        let mut theme = Theme::default_theme();
        for _ in 0..Theme::all().len() {
            theme = theme.next();
        }
        assert_eq!(theme.name, Theme::default_theme().name);
        assert_eq!(Theme::default_theme().next().name, "Catppuccin Mocha");
    }

    #[test]
    fn test_token_colors_are_rgb() {
        for theme in Theme::all() {
            assert!(matches!(theme.token, Color::Rgb(..)), "{}", theme.name);
            assert!(matches!(theme.highlight, Color::Rgb(..)), "{}", theme.name);
            assert!(matches!(theme.bg, Color::Rgb(..)), "{}", theme.name);
        }
    }

    #[test]
    fn test_all_themes_have_distinct_names() {
        let names: Vec<&str> = Theme::all().iter().map(|t| t.name).collect();
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(names.len(), unique.len(), "duplicate theme names found");
    }
}
