//! User configuration — reveal timing, accessibility and frame rate.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/reveal-deck/config.toml` (default
//! `~/.config/reveal-deck/config.toml`).  Unknown keys are ignored and values
//! that fail to parse keep their defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use crate::app::page::RevealSettings;
use crate::core::tween::Easing;
use crate::core::viewport::IntersectionSupport;

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Collapse every stagger and tween to zero.
    pub reduced_motion: bool,
    /// Whether to use viewport intersection at all.  When `false` every
    /// container reveals as soon as the page is shown.
    pub observe_viewport: bool,
    /// Frame interval in milliseconds.
    pub tick_ms: u64,
    /// Fraction of the remaining scroll distance covered per frame.
    pub scroll_speed: f64,
    /// Per-card delay step for top-level cards.
    pub coarse_increment_ms: u64,
    /// Per-row delay step inside category cards.
    pub fine_increment_ms: u64,
    pub easing: Easing,
    /// Host segment shown in each listing's prompt.
    pub prompt_host: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            observe_viewport: true,
            tick_ms: 16,
            scroll_speed: 0.35,
            coarse_increment_ms: 100,
            fine_increment_ms: 15,
            easing: Easing::EaseOut,
            prompt_host: "GitOps/NOW".into(),
        }
    }
}

impl AppConfig {
    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                debug!(path = %path.display(), "loaded config");
                Self::parse(&contents)
            }
            Err(_) => Self::default(),
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(path)
    }

    pub fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            let applied = match key {
                "reduced_motion" => parse_bool(value).map(|v| config.reduced_motion = v),
                "observe_viewport" => parse_bool(value).map(|v| config.observe_viewport = v),
                "tick_ms" => value
                    .parse::<u64>()
                    .ok()
                    // Keep the frame rate between ~4 and ~120 fps.
                    .map(|v| config.tick_ms = v.clamp(8, 250)),
                "scroll_speed" => value
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(|v| config.scroll_speed = v.clamp(0.05, 1.0)),
                "coarse_increment_ms" => value
                    .parse::<u64>()
                    .ok()
                    .map(|v| config.coarse_increment_ms = v.min(2000)),
                "fine_increment_ms" => value
                    .parse::<u64>()
                    .ok()
                    .map(|v| config.fine_increment_ms = v.min(2000)),
                "easing" => Easing::from_config_key(value).map(|v| config.easing = v),
                "prompt_host" if !value.is_empty() => {
                    config.prompt_host = value.to_string();
                    Some(())
                }
                _ => continue,
            };
            if applied.is_none() {
                warn!(key, value, "ignoring invalid config value");
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let easing = match self.easing {
            Easing::Linear => "linear",
            Easing::EaseIn => "ease_in",
            Easing::EaseOut => "ease_out",
            Easing::EaseInOut => "ease_in_out",
        };
        [
            "# reveal-deck configuration".to_string(),
            String::new(),
            "# Accessibility".to_string(),
            format!("reduced_motion = {}", self.reduced_motion),
            format!("observe_viewport = {}", self.observe_viewport),
            String::new(),
            "# Timing".to_string(),
            format!("tick_ms = {}", self.tick_ms),
            format!("scroll_speed = {}", self.scroll_speed),
            format!("coarse_increment_ms = {}", self.coarse_increment_ms),
            format!("fine_increment_ms = {}", self.fine_increment_ms),
            format!("easing = {easing}"),
            String::new(),
            "# Content".to_string(),
            format!("prompt_host = \"{}\"", self.prompt_host),
            String::new(),
        ]
        .join("\n")
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Timing profile for every reveal container on the page.
    pub fn reveal_settings(&self) -> RevealSettings {
        let defaults = RevealSettings::default();
        let mut coarse = defaults
            .coarse
            .with_increment(Duration::from_millis(self.coarse_increment_ms));
        let mut fine = defaults
            .fine
            .with_increment(Duration::from_millis(self.fine_increment_ms));
        coarse.easing = self.easing;
        fine.easing = self.easing;
        RevealSettings {
            support: if self.observe_viewport {
                IntersectionSupport::Supported
            } else {
                IntersectionSupport::Unsupported
            },
            coarse,
            fine,
            reduced_motion: self.reduced_motion,
            ..defaults
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "yes" | "on" => Some(true),
        "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/reveal-deck/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml")
}
