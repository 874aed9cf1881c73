//! Session settings stored as TOML (default `stepsort.toml`).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Largest generated or supplied input a session accepts.
pub const MAX_INPUT_SIZE: usize = 10_000;

/// Session configuration (TOML).
///
/// Every field is optional in the file; missing ones take the defaults below.
/// CLI flags override whatever is loaded here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SortConfig {
    pub input: InputConfig,
    pub run: RunConfig,
}

/// How to build the input when no explicit values are given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InputConfig {
    /// Number of generated elements.
    pub size: usize,
    pub min_value: i64,
    pub max_value: i64,
    /// Evenly spaced values across `min_value..=max_value`, shuffled,
    /// instead of independent random draws.
    pub uniform: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            size: 25,
            min_value: 10,
            max_value: 200,
            uniform: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RunConfig {
    /// Cancel after this many events; `0` means unlimited.
    pub max_steps: u64,
    /// Pause after every event, in milliseconds.
    pub delay_ms: u64,
    /// Seeds input generation and bogo sort's shuffles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SortConfig {
    pub fn validate(&self) -> Result<()> {
        if self.input.size == 0 {
            bail!("input.size must be > 0");
        }
        if self.input.size > MAX_INPUT_SIZE {
            bail!("input.size must be <= {MAX_INPUT_SIZE}");
        }
        if self.input.min_value > self.input.max_value {
            bail!(
                "input.min_value ({}) must be <= input.max_value ({})",
                self.input.min_value,
                self.input.max_value
            );
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `SortConfig::default()`.
pub fn load_config(path: &Path) -> Result<SortConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config file missing, using defaults");
        let cfg = SortConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SortConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    debug!(path = %path.display(), "loaded config");
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &SortConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
