use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::color::Background;

pub const CONFIG_NAME: &str = "pngflat.toml";

#[derive(Debug, PartialEq, Deserialize)]
pub struct Config {
    /// Canvas color for both commands (default: white)
    #[serde(default)]
    pub background: Background,

    /// Replace files through a temporary file + rename (default: true)
    #[serde(default = "default_true")]
    pub atomic: bool,

    #[serde(default)]
    pub flatten: FlattenConfig,

    #[serde(default)]
    pub strip: StripConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            background: Background::default(),
            atomic: true,
            flatten: FlattenConfig::default(),
            strip: StripConfig::default(),
        }
    }
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct FlattenConfig {
    #[serde(default = "default_flatten_input")]
    pub input: PathBuf,

    #[serde(default = "default_flatten_output")]
    pub output: PathBuf,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            input: default_flatten_input(),
            output: default_flatten_output(),
        }
    }
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct StripConfig {
    /// Directory whose PNGs are flattened in place (default: "icons")
    #[serde(default = "default_strip_dir")]
    pub dir: PathBuf,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            dir: default_strip_dir(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_flatten_input() -> PathBuf {
    PathBuf::from("logo.png")
}

fn default_flatten_output() -> PathBuf {
    PathBuf::from("logo_white_bg.png")
}

fn default_strip_dir() -> PathBuf {
    PathBuf::from("icons")
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn default_template() -> String {
        r##"# pngflat configuration

# Canvas color under transparent pixels: "#rrggbb", "#rgb", "r,g,b", "white" or "black"
background = "#ffffff"

# Overwrite files through a temporary file + rename, so a failed write
# never leaves a truncated PNG behind
atomic = true

# pngflat flatten
[flatten]
input = "logo.png"
output = "logo_white_bg.png"

# pngflat strip
[strip]
dir = "icons"
"##
        .to_string()
    }
}
