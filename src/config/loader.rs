// src/config/loader.rs

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::ini::parse_ini;
use crate::config::validate::{ValidationReport, validate};
use crate::config::yaml::parse_yaml;
use crate::errors::{PipeconfError, Result};
use crate::fs::FileSystem;
use crate::params::ParameterSet;
use crate::schema::Schema;

/// File names looked for when no config is given explicitly.
pub const CONFIG_FILE_NAMES: &[&str] = &["pipeline.yml", "pipeline.ini"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Ini,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("ini") | Some("cfg") => Ok(ConfigFormat::Ini),
            Some("yml") | Some("yaml") => Ok(ConfigFormat::Yaml),
            _ => Err(PipeconfError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// How [`load_layered`] builds the parameter set.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Start from the schema defaults, below every file.
    pub with_defaults: bool,
    /// `section.key=value` overrides applied after all files.
    pub overrides: Vec<String>,
}

/// Result of loading a stack of configuration files.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub params: ParameterSet,
    /// Files that existed and were read, lowest precedence first.
    pub files: Vec<PathBuf>,
}

/// Parse a single configuration file.
pub fn load_file(fs: &dyn FileSystem, path: &Path) -> Result<ParameterSet> {
    let format = ConfigFormat::from_path(path)?;
    let text = fs.read_to_string(path)?;
    match format {
        ConfigFormat::Ini => parse_ini(&text, path),
        ConfigFormat::Yaml => parse_yaml(&text, path),
    }
}

/// Load `paths` in order, later files overriding earlier ones.
///
/// Files that do not exist are skipped, so a search list such as
/// `../pipeline.ini`, `pipeline.ini` can be passed as is. It is an error if
/// none of them exists.
pub fn load_layered(
    fs: &dyn FileSystem,
    paths: &[PathBuf],
    options: &LoadOptions,
    schema: &Schema,
) -> Result<LoadedConfig> {
    let mut params = if options.with_defaults {
        schema.defaults()
    } else {
        ParameterSet::new()
    };
    let mut files = Vec::new();

    for path in paths {
        if !fs.is_file(path) {
            debug!(path = ?path, "config file not found, skipping");
            continue;
        }
        let layer = load_file(fs, path)?;
        info!(path = ?path, entries = layer.len(), "loaded config layer");
        params.merge_layer(layer);
        files.push(path.clone());
    }

    if files.is_empty() {
        return Err(PipeconfError::NoConfigFiles(paths.to_vec()));
    }

    for spec in &options.overrides {
        params.apply_override(spec)?;
    }

    Ok(LoadedConfig { params, files })
}

/// Load a stack of configuration files and validate the result.
///
/// Parse problems are errors; schema problems are returned in the report.
pub fn load_and_validate(
    fs: &dyn FileSystem,
    paths: &[PathBuf],
    options: &LoadOptions,
    schema: &Schema,
) -> Result<(LoadedConfig, ValidationReport)> {
    let loaded = load_layered(fs, paths, options, schema)?;
    let report = validate(&loaded.params, schema);
    Ok((loaded, report))
}

/// Search list used when no config file is named: the shared configuration
/// in the parent directory first, then the local one.
pub fn default_search_paths(dir: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(CONFIG_FILE_NAMES.len() * 2);
    for base in [dir.join(".."), dir.to_path_buf()] {
        for name in CONFIG_FILE_NAMES {
            paths.push(base.join(name));
        }
    }
    paths
}
