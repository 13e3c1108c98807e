//! Demo configuration, read from the environment.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::{levels, TileMap, ViewportConfig};
use crate::types::{ScrollMode, DEFAULT_SCROLL_SPEED};

/// Settings for the terminal demo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub mode: ScrollMode,
    /// Map file in the `[width, height, tiles...]` format; the built-in level when unset.
    pub map_path: Option<PathBuf>,
    /// Camera pixels per frame while a direction is held.
    pub speed: i32,
    /// Where to write tracing output. Logging is off when unset.
    pub log_path: Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            mode: ScrollMode::default(),
            map_path: None,
            speed: DEFAULT_SCROLL_SPEED,
            log_path: None,
        }
    }
}

impl DemoConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup. Unparseable values fall back to the
    /// defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            var(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let mode = non_empty("TILE_SCROLL_MODE")
            .and_then(|s| ScrollMode::from_str(&s))
            .unwrap_or_default();

        let map_path = non_empty("TILE_SCROLL_MAP").map(PathBuf::from);

        let tile = i32::from(ViewportConfig::new(mode).horizontal.tile_size);
        let speed = non_empty("TILE_SCROLL_SPEED")
            .and_then(|s| s.parse::<i32>().ok())
            .unwrap_or(DEFAULT_SCROLL_SPEED)
            .clamp(1, tile);

        let log_path = non_empty("TILE_SCROLL_LOG_PATH").map(PathBuf::from);

        Self {
            mode,
            map_path,
            speed,
            log_path,
        }
    }

    pub fn viewport_config(&self) -> ViewportConfig {
        ViewportConfig::new(self.mode)
    }

    /// Load the configured map file, or the built-in level for the scroll mode.
    pub fn load_map(&self) -> Result<TileMap> {
        match &self.map_path {
            Some(path) => {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("failed to read map file {}", path.display()))?;
                TileMap::from_bytes(&bytes)
                    .with_context(|| format!("invalid map file {}", path.display()))
            }
            None => levels::load(self.mode)
                .with_context(|| format!("built-in {} level is invalid", self.mode.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> DemoConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DemoConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(config(&[]), DemoConfig::default());
    }

    #[test]
    fn parses_mode_aliases_and_paths() {
        let cfg = config(&[
            ("TILE_SCROLL_MODE", " horiz "),
            ("TILE_SCROLL_MAP", "level.bin"),
            ("TILE_SCROLL_LOG_PATH", "/tmp/scroll.log"),
        ]);
        assert_eq!(cfg.mode, ScrollMode::Horizontal);
        assert_eq!(cfg.map_path, Some(PathBuf::from("level.bin")));
        assert_eq!(cfg.log_path, Some(PathBuf::from("/tmp/scroll.log")));
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = config(&[
            ("TILE_SCROLL_MODE", "diagonal"),
            ("TILE_SCROLL_SPEED", "fast"),
            ("TILE_SCROLL_LOG_PATH", "   "),
        ]);
        assert_eq!(cfg.mode, ScrollMode::Both);
        assert_eq!(cfg.speed, DEFAULT_SCROLL_SPEED);
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn speed_is_clamped_to_one_tile() {
        assert_eq!(config(&[("TILE_SCROLL_SPEED", "40")]).speed, 8);
        assert_eq!(config(&[("TILE_SCROLL_SPEED", "0")]).speed, 1);
        assert_eq!(config(&[("TILE_SCROLL_SPEED", "3")]).speed, 3);
    }

    #[test]
    fn builtin_map_matches_mode() {
        let cfg = config(&[("TILE_SCROLL_MODE", "vertical")]);
        let map = cfg.load_map().unwrap();
        assert_eq!(map.width(), crate::types::SCREEN_TILES_H);
    }

    #[test]
    fn missing_map_file_reports_path() {
        let cfg = config(&[("TILE_SCROLL_MAP", "/nonexistent/tile-scroll/map.bin")]);
        let err = cfg.load_map().unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/tile-scroll/map.bin"));
    }
}
