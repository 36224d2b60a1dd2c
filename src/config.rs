//! Optional TOML parameter file: request-schema-shaped values merged under
//! explicit CLI flags (flag > file > built-in default).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub fn default_config_path() -> Option<PathBuf> {
    // ~/.pulselink/config.toml (per-user, like the rest of the dotdir)
    dirs_next::home_dir().map(|h| h.join(".pulselink").join("config.toml"))
}

pub fn resolve_config_path(cli_path: &Option<PathBuf>) -> Option<PathBuf> {
    if let Some(p) = cli_path {
        return Some(p.clone());
    }
    default_config_path()
}

/// Parameter-file overlay. Every field optional; groups mirror the request
/// schema so a file can be promoted to an HTTP request body verbatim.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileParams {
    #[serde(default)]
    pub alice: AliceParams,
    #[serde(default)]
    pub bob: BobParams,
    #[serde(default)]
    pub channel: ChannelParams,
    #[serde(default)]
    pub processing: ProcessingParams,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliceParams {
    pub mu1: Option<f64>,
    pub mu2: Option<f64>,
    pub p1: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BobParams {
    pub dark_count: Option<f64>,
    pub time_bin: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelParams {
    pub loss: Option<f64>,
    pub length: Option<f64>,
    pub sync_error: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessingParams {
    pub block_size: Option<u64>,
    pub max_offset: Option<u64>,
}

/// Load the overlay if the file exists; a missing file is an empty overlay,
/// a malformed one is an error worth surfacing.
pub fn load_params(path: &Path) -> Result<FileParams> {
    if !path.exists() {
        return Ok(FileParams::default());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read parameter file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parse parameter file {}", path.display()))
}
