//! Settings file loading.
//!
//! Settings come from a TOML file named by `--config` or the
//! `SELFMAP_CONFIG` environment variable. Every key is optional; command-line
//! flags override whatever the file sets.
//!
//! ```toml
//! [display]
//! radius_mode = "power"
//! size_metric = "weighted_degree"
//! show_edges = false
//! size_scale = 1.2
//! opacity = 0.9
//!
//! [layout]
//! shared_last_quadrant = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use selfmap_core::{CategoryPalette, DisplayConfig, LayoutTables, R_MAX, SectorTable};

pub const CONFIG_ENV: &str = "SELFMAP_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub display: DisplayConfig,
    pub layout: LayoutSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Put `Other` in the same quadrant as `Ideas/Likes`.
    pub shared_last_quadrant: bool,
    pub r_max: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            shared_last_quadrant: false,
            r_max: R_MAX,
        }
    }
}

impl LayoutSettings {
    pub fn tables(&self) -> LayoutTables {
        let sectors = if self.shared_last_quadrant {
            SectorTable::with_shared_last_quadrant()
        } else {
            SectorTable::default()
        };
        LayoutTables {
            sectors,
            palette: CategoryPalette::default(),
            r_max: self.r_max,
        }
    }
}

/// Explicit path wins over the environment variable.
pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
}

pub fn parse(content: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(content).context("invalid settings TOML")?;
    if !settings.layout.r_max.is_finite() || settings.layout.r_max <= 0.0 {
        bail!("layout.r_max must be a positive number, got {}", settings.layout.r_max);
    }
    Ok(settings)
}

/// Load settings, or defaults when no path is configured.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    let Some(path) = config_path(explicit) else {
        tracing::debug!("no settings file, using defaults");
        return Ok(Settings::default());
    };
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read settings {}", path.display()))?;
    let settings = parse(&content).with_context(|| format!("in {}", path.display()))?;
    tracing::info!("loaded settings from {}", path.display());
    Ok(settings)
}
