//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--config`, `--preview`, `--flatten`, etc.)
//! 2. `$TREEPICK_CONFIG` environment variable (path to config file)
//! 3. Project-local `.treepick.toml` in the current working directory
//! 4. Global `~/.config/treepick/config.toml`
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

// ── Section configs ──────────────────────────────────────────────────────────

/// Picker behavior settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PickerConfig {
    /// Clear the typed query when leaving search mode with Esc.
    pub clear_search_on_exit: Option<bool>,
    /// Start the session in search mode.
    pub start_in_search: Option<bool>,
}

/// Preview pane settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PreviewConfig {
    /// Command used to render file previews (the hovered path is appended).
    pub command: Option<String>,
    /// Whether the preview pane is enabled.
    pub enabled: Option<bool>,
}

/// Tree display settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TreeConfig {
    /// Merge single-child folder chains into one row (`a/b/c`).
    pub flatten: Option<bool>,
    /// Use nerd font icons (false = ASCII fallback).
    pub use_icons: Option<bool>,
}

/// Color settings for a single theme palette.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub header_bg: Option<String>,
    pub header_fg: Option<String>,
    pub accent_fg: Option<String>,
    pub faded_fg: Option<String>,
    pub dir_fg: Option<String>,
    pub file_fg: Option<String>,
    pub border_fg: Option<String>,
    pub error_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub picker: PickerConfig,
    pub preview: PreviewConfig,
    pub tree: TreeConfig,
    pub theme: ThemeConfig,
}

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path — that is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. $TREEPICK_CONFIG environment variable
    if let Ok(env_path) = std::env::var("TREEPICK_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    // 2. Project-local `.treepick.toml` in CWD
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".treepick.toml"));
    }

    // 3. Global `~/.config/treepick/config.toml`
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("treepick").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning printed to stderr).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return None,
    };
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self` — `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            picker: PickerConfig {
                clear_search_on_exit: other
                    .picker
                    .clear_search_on_exit
                    .or(self.picker.clear_search_on_exit),
                start_in_search: other.picker.start_in_search.or(self.picker.start_in_search),
            },
            preview: PreviewConfig {
                command: other.preview.command.clone().or(self.preview.command),
                enabled: other.preview.enabled.or(self.preview.enabled),
            },
            tree: TreeConfig {
                flatten: other.tree.flatten.or(self.tree.flatten),
                use_icons: other.tree.use_icons.or(self.tree.use_icons),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: match (&self.theme.custom, &other.theme.custom) {
                    (_, Some(o)) => Some(o.clone()),
                    (Some(s), None) => Some(s.clone()),
                    (None, None) => None,
                },
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        // Start with built-in defaults (all None — the struct Default).
        let mut config = AppConfig::default();

        // Load from candidate files (lowest priority first so higher overwrites).
        let paths = candidate_paths();
        // Walk in reverse so that highest-priority (env var) overwrites lower.
        for path in paths.iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        // Explicit --config file has higher priority than candidates.
        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        // CLI flag overrides are highest priority.
        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    /// Whether Esc clears the query when leaving search mode.
    pub fn clear_search_on_exit(&self) -> bool {
        self.picker.clear_search_on_exit.unwrap_or(false)
    }

    /// Whether the session starts in search mode.
    pub fn start_in_search(&self) -> bool {
        self.picker.start_in_search.unwrap_or(true)
    }

    /// Whether the preview pane is enabled.
    pub fn preview_enabled(&self) -> bool {
        self.preview.enabled.unwrap_or(true)
    }

    /// Custom preview command, if configured.
    pub fn preview_command(&self) -> Option<&str> {
        self.preview.command.as_deref()
    }

    /// Whether to merge single-child folder chains.
    pub fn flatten(&self) -> bool {
        self.tree.flatten.unwrap_or(false)
    }

    /// Whether to use nerd font icons.
    pub fn use_icons(&self) -> bool {
        self.tree.use_icons.unwrap_or(true)
    }

    /// Theme scheme: "dark", "light", or "custom".
    pub fn theme_scheme(&self) -> &str {
        self.theme.scheme.as_deref().unwrap_or("dark")
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
