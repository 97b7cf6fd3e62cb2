// src/config.rs

//! Defines the configuration structures for `ptylamp`.
//!
//! This module provides a set of structs that can be deserialized from a
//! configuration file to customize the lamp's appearance and the link's
//! behavior. Default values are provided for every option: a 20000x20000
//! canvas, the `B` sentinel, 10-byte chunks, and a 2 second startup delay.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::color::{Color, NamedColor};

/// Environment variable naming an optional JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "PTYLAMP_CONFIG";

/// Global configuration, loaded once on first access.
///
/// If `PTYLAMP_CONFIG` names a readable JSON file it overrides the defaults;
/// otherwise the defaults apply. A malformed file logs an error and falls
/// back to defaults rather than aborting startup.
pub static CONFIG: Lazy<Config> = Lazy::new(|| match std::env::var(CONFIG_ENV_VAR) {
    Ok(path) => Config::load_from_file(Path::new(&path)).unwrap_or_else(|e| {
        log::error!(
            "Failed to load config from '{}': {:#}. Using defaults.",
            path,
            e
        );
        Config::default()
    }),
    Err(_) => Config::default(),
});

// --- Top-Level Configuration Structure ---

/// Represents the complete configuration for the lamp.
///
/// This struct is the root of the configuration and is intended to be
/// deserialized from a configuration file. It groups settings into logical
/// categories: appearance, link behavior, and performance.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)] // Apply default values for the entire struct if a field is missing.
pub struct Config {
    /// Appearance-related settings.
    pub appearance: AppearanceConfig,
    /// Link (pseudo-terminal) settings.
    pub link: LinkConfig,
    /// Performance-related settings.
    pub performance: PerformanceConfig,
}

impl Config {
    /// Loads a configuration from a JSON file.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }
}

// --- Appearance Configuration ---

/// Defines settings related to the visual appearance of the lamp window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Canvas edge length in logical units. The lamp rectangle spans the
    /// whole canvas; the window manager may clamp the mapped window, in
    /// which case the rectangle still covers the entire drawable.
    pub canvas_dim: u32,
    /// Window title.
    pub title: String,
    /// Fill for the "on" signal.
    pub on_color: Color,
    /// Fill for the "off" signal.
    pub off_color: Color,
    /// Fill shown before the first chunk arrives.
    pub initial_color: Color,
    /// Window background behind the rectangle.
    pub background: Color,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            canvas_dim: 20000,
            title: "ptylamp".to_string(),
            on_color: Color::Named(NamedColor::White),
            off_color: Color::Named(NamedColor::Black),
            initial_color: Color::Named(NamedColor::White),
            background: Color::Named(NamedColor::Black),
        }
    }
}

// --- Link Configuration ---

/// Defines settings for the pseudo-terminal link and the signal protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Payload written once through the follower at startup.
    pub payload: String,
    /// The single byte recognized as the "on" signal.
    pub sentinel: u8,
    /// Maximum bytes per chunk read from the controller.
    pub read_chunk_bytes: usize,
    /// One-time delay before the first read, giving the window time to map.
    pub startup_delay_ms: u64,
    /// Upper bound on each readability wait; the cancellation flag is
    /// re-checked whenever the wait times out.
    pub poll_timeout_ms: u64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        LinkConfig {
            payload: "Your text".to_string(),
            sentinel: b'B',
            read_chunk_bytes: 10,
            startup_delay_ms: 2000,
            poll_timeout_ms: 100,
        }
    }
}

// --- Performance Configuration ---

/// Defines settings related to event-loop pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Sleep between orchestrator cycles in milliseconds.
    pub min_draw_latency_ms: u64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        PerformanceConfig {
            min_draw_latency_ms: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::convert_to_rgb_color;
    use std::io::Write;

    #[test]
    fn defaults_cover_all_sections() {
        let config = Config::default();
        assert_eq!(config.appearance.canvas_dim, 20000);
        assert_eq!(config.link.payload, "Your text");
        assert_eq!(config.link.sentinel, b'B');
        assert_eq!(config.link.read_chunk_bytes, 10);
        assert_eq!(config.link.startup_delay_ms, 2000);
        assert_eq!(
            convert_to_rgb_color(config.appearance.initial_color),
            Color::Rgb(255, 255, 255)
        );
        assert_eq!(
            convert_to_rgb_color(config.appearance.background),
            Color::Rgb(0, 0, 0)
        );
    }

    #[test]
    fn partial_config_file_overrides_only_named_fields() {
        let mut file = tempfile_in_target();
        write!(
            file.1,
            r#"{{ "link": {{ "sentinel": 65, "startup_delay_ms": 0 }} }}"#
        )
        .unwrap();
        file.1.flush().unwrap();

        let config = Config::load_from_file(&file.0).unwrap();
        assert_eq!(config.link.sentinel, b'A');
        assert_eq!(config.link.startup_delay_ms, 0);
        // Unnamed fields keep their defaults.
        assert_eq!(config.link.read_chunk_bytes, 10);
        assert_eq!(config.appearance.canvas_dim, 20000);

        std::fs::remove_file(&file.0).ok();
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let mut file = tempfile_in_target();
        write!(file.1, "not json").unwrap();
        file.1.flush().unwrap();

        assert!(Config::load_from_file(&file.0).is_err());
        std::fs::remove_file(&file.0).ok();
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.link.sentinel, config.link.sentinel);
        assert_eq!(back.appearance.canvas_dim, config.appearance.canvas_dim);
    }

    fn tempfile_in_target() -> (std::path::PathBuf, std::fs::File) {
        let path = std::env::temp_dir().join(format!(
            "ptylamp-config-test-{}-{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        let file = std::fs::File::create(&path).unwrap();
        (path, file)
    }
}
