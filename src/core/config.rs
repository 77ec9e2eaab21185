//! Configuration system: TOML file + env var override + defaults.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, VizError};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "WVIZ_CONFIG";

/// Full configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub chart: ChartConfig,
    pub view: ViewConfig,
    pub log: LogConfig,
}

/// Bar-chart geometry knobs. Defaults mirror the chart's reference
/// proportions scaled to terminal cells.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChartConfig {
    /// Maximum number of bars retained per test case.
    pub max_bars: usize,
    /// Bar width in cells.
    pub bar_width: u16,
    /// Cells between bars within one test-case group.
    pub bar_spacing: u16,
    /// Cells between test-case groups.
    pub group_spacing: u16,
    /// Horizontal padding inside the chart pane.
    pub padding_x: u16,
    /// Vertical padding inside the chart pane.
    pub padding_y: u16,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            max_bars: 5,
            bar_width: 2,
            bar_spacing: 1,
            group_spacing: 4,
            padding_x: 2,
            padding_y: 1,
        }
    }
}

/// Dashboard view behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    /// Refresh rate in frames per second.
    pub fps: f64,
    /// Show the help overlay on startup.
    pub start_with_help: bool,
    /// Summary pane share of terminal width (0.0..1.0).
    pub summary_split: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            fps: 1.0,
            start_with_help: false,
            summary_split: 0.3,
        }
    }
}

/// JSONL event log settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct LogConfig {
    /// Enable the session event log.
    pub enabled: bool,
    /// Log file path. When unset, events go to stderr only if enabled.
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration, resolving in priority order: explicit path
    /// argument, then `$WVIZ_CONFIG`, then `wviz.toml` in the working
    /// directory, then defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Some(path) = env::var_os(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        let cwd_config = Path::new("wviz.toml");
        if cwd_config.exists() {
            return Self::from_file(cwd_config);
        }
        Ok(Self::default())
    }

    /// Parse a TOML config file from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| VizError::io(path, e))?;
        let config: Self = toml::from_str(&raw).map_err(|e| VizError::ConfigParse {
            context: "toml",
            details: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make layout arithmetic meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.chart.max_bars == 0 {
            return Err(VizError::InvalidConfig {
                details: "chart.max_bars must be at least 1".into(),
            });
        }
        if self.chart.bar_width == 0 {
            return Err(VizError::InvalidConfig {
                details: "chart.bar_width must be at least 1".into(),
            });
        }
        if !self.view.fps.is_finite() || self.view.fps <= 0.0 {
            return Err(VizError::InvalidConfig {
                details: format!("view.fps must be positive, got {}", self.view.fps),
            });
        }
        if !(0.1..=0.9).contains(&self.view.summary_split) {
            return Err(VizError::InvalidConfig {
                details: format!(
                    "view.summary_split must be within 0.1..=0.9, got {}",
                    self.view.summary_split
                ),
            });
        }
        Ok(())
    }

    /// Refresh interval derived from the configured fps.
    #[must_use]
    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.view.fps)
    }
}
