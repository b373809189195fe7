//! Theme data model: built-in palettes and resolution from config.
//!
//! Two built-in palettes (dark and light) plus custom hex overrides from
//! the config file.

use ratatui::style::Color;

use crate::config::{ThemeColorsConfig, ThemeConfig};

// ── Runtime theme colors ─────────────────────────────────────────────────────

/// All runtime colors used in the UI.
///
/// Constructed from a config-level `ThemeConfig` via `resolve_theme()`.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Picker/preview headers
    pub header_bg: Color,
    pub header_fg: Color,

    // Rows
    pub accent_fg: Color,
    pub faded_fg: Color,
    pub dir_fg: Color,
    pub file_fg: Color,

    // Chrome
    pub border_fg: Color,
    pub error_fg: Color,
}

// ── Built-in palettes ────────────────────────────────────────────────────────

/// Dark theme using Catppuccin Mocha palette.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        header_bg: Color::Rgb(203, 166, 247), // #cba6f7 (mauve)
        header_fg: Color::Rgb(30, 30, 46),    // #1e1e2e (base)
        accent_fg: Color::Rgb(203, 166, 247), // #cba6f7 (mauve)
        faded_fg: Color::Rgb(108, 112, 134),  // #6c7086 (overlay0)
        dir_fg: Color::Rgb(137, 180, 250),    // #89b4fa (blue)
        file_fg: Color::Rgb(205, 214, 244),   // #cdd6f4 (text)
        border_fg: Color::Rgb(88, 91, 112),   // #585b70 (surface2)
        error_fg: Color::Rgb(243, 139, 168),  // #f38ba8 (red)
    }
}

/// Light theme — complementary light palette.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        header_bg: Color::Rgb(136, 57, 239), // #8839ef (mauve)
        header_fg: Color::Rgb(239, 241, 245), // #eff1f5 (base)
        accent_fg: Color::Rgb(136, 57, 239), // #8839ef (mauve)
        faded_fg: Color::Rgb(156, 160, 176), // #9ca0b0 (overlay0)
        dir_fg: Color::Rgb(30, 102, 245),    // #1e66f5 (blue)
        file_fg: Color::Rgb(76, 79, 105),    // #4c4f69 (text)
        border_fg: Color::Rgb(172, 176, 190), // #acb0be (surface2)
        error_fg: Color::Rgb(210, 15, 57),   // #d20f39 (red)
    }
}

// ── Color parsing ────────────────────────────────────────────────────────────

/// Parse a hex color string like `"#aabbcc"` into a `ratatui::style::Color`.
/// Returns `None` for malformed input.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

// ── Theme resolution ─────────────────────────────────────────────────────────

/// Resolve the final `ThemeColors` from config.
///
/// - `"dark"` (default): dark Catppuccin palette
/// - `"light"`: light Catppuccin palette
/// - `"custom"`: start from dark palette, then override with custom hex values
pub fn resolve_theme(config: &ThemeConfig) -> ThemeColors {
    let scheme = config.scheme.as_deref().unwrap_or("dark");
    match scheme {
        "light" => light_theme(),
        "custom" => {
            let mut theme = dark_theme();
            if let Some(custom) = &config.custom {
                apply_custom_colors(&mut theme, custom);
            }
            theme
        }
        _ => dark_theme(), // "dark" or any unrecognized value
    }
}

/// Apply custom hex color overrides on top of an existing theme.
fn apply_custom_colors(theme: &mut ThemeColors, custom: &ThemeColorsConfig) {
    let fields: [(&Option<String>, &mut Color); 8] = [
        (&custom.header_bg, &mut theme.header_bg),
        (&custom.header_fg, &mut theme.header_fg),
        (&custom.accent_fg, &mut theme.accent_fg),
        (&custom.faded_fg, &mut theme.faded_fg),
        (&custom.dir_fg, &mut theme.dir_fg),
        (&custom.file_fg, &mut theme.file_fg),
        (&custom.border_fg, &mut theme.border_fg),
        (&custom.error_fg, &mut theme.error_fg),
    ];
    for (hex, slot) in fields {
        if let Some(color) = hex.as_deref().and_then(parse_hex_color) {
            *slot = color;
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
