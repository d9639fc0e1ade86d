/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Path to the map file loaded at startup.
    pub map_path: PathBuf,
    /// Logical pixel size of one tile.
    pub tile_size: f32,
    /// Player speed, expressed in tiles per second.
    pub player_tiles_per_sec: f32,
    /// Ghost speed as a fraction of player speed.
    pub ghost_speed_factor: f32,
    /// Capture grace window in seconds.
    pub capture_grace_secs: f32,
    pub ui: UiConfig,
}

/// Side-panel layout, in terminal cells.
#[derive(Clone, Debug)]
pub struct UiConfig {
    pub panel_cols: u16,
    pub padding: u16,
    pub row_height: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            map_path: PathBuf::from(default_map_path()),
            tile_size: default_tile_size(),
            player_tiles_per_sec: default_player_speed(),
            ghost_speed_factor: default_ghost_factor(),
            capture_grace_secs: default_grace(),
            ui: UiConfig {
                panel_cols: default_panel_cols(),
                padding: default_padding(),
                row_height: default_row_height(),
            },
        }
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    game: TomlGame,
    #[serde(default)]
    ui: TomlUi,
}

#[derive(Deserialize, Debug)]
struct TomlGame {
    #[serde(default = "default_map_path")]
    map: String,
    #[serde(default = "default_tile_size")]
    tile_size: f32,
    #[serde(default = "default_player_speed")]
    player_tiles_per_sec: f32,
    #[serde(default = "default_ghost_factor")]
    ghost_speed_factor: f32,
    #[serde(default = "default_grace")]
    capture_grace_secs: f32,
}

#[derive(Deserialize, Debug)]
struct TomlUi {
    #[serde(default = "default_panel_cols")]
    panel_cols: u16,
    #[serde(default = "default_padding")]
    padding: u16,
    #[serde(default = "default_row_height")]
    row_height: u16,
}

// ── Defaults ──

fn default_map_path() -> String { "assets/maps/level1.txt".into() }
fn default_tile_size() -> f32 { 24.0 }
fn default_player_speed() -> f32 { 6.0 }
fn default_ghost_factor() -> f32 { 0.25 }
fn default_grace() -> f32 { 1.0 }

fn default_panel_cols() -> u16 { 26 }
fn default_padding() -> u16 { 1 }
fn default_row_height() -> u16 { 1 }

impl Default for TomlGame {
    fn default() -> Self {
        TomlGame {
            map: default_map_path(),
            tile_size: default_tile_size(),
            player_tiles_per_sec: default_player_speed(),
            ghost_speed_factor: default_ghost_factor(),
            capture_grace_secs: default_grace(),
        }
    }
}

impl Default for TomlUi {
    fn default() -> Self {
        TomlUi {
            panel_cols: default_panel_cols(),
            padding: default_padding(),
            row_height: default_row_height(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let toml_cfg = load_toml(&search_dirs);

        // Resolve the map path against the same search dirs
        let map_str = &toml_cfg.game.map;
        let map_path = if PathBuf::from(map_str).is_absolute() {
            PathBuf::from(map_str)
        } else {
            search_dirs
                .iter()
                .map(|d| d.join(map_str))
                .find(|p| p.is_file())
                .unwrap_or_else(|| PathBuf::from(map_str))
        };

        GameConfig {
            map_path,
            tile_size: toml_cfg.game.tile_size,
            player_tiles_per_sec: toml_cfg.game.player_tiles_per_sec,
            ghost_speed_factor: toml_cfg.game.ghost_speed_factor,
            capture_grace_secs: toml_cfg.game.capture_grace_secs,
            ui: UiConfig {
                panel_cols: toml_cfg.ui.panel_cols,
                padding: toml_cfg.ui.padding,
                row_height: toml_cfg.ui.row_height,
            },
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable (resolve symlinks)
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. Fallback
    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}
