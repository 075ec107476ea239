// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipeconfError {
    #[error("{path:?}:{line}: {message}")]
    Syntax {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error(
        "{path:?}:{line}: key '{key}' in [{section}] is already defined on line {first_line}"
    )]
    DuplicateKey {
        path: PathBuf,
        section: String,
        key: String,
        first_line: usize,
        line: usize,
    },

    #[error("{path:?}:{line}: section [{section}] is already defined")]
    DuplicateSection {
        path: PathBuf,
        section: String,
        line: usize,
    },

    #[error("{path:?}: YAML error: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{path:?}: key '{key}' in [{section}] is defined more than once")]
    DuplicateYamlKey {
        path: PathBuf,
        section: String,
        key: String,
    },

    #[error("{path:?}: {message}")]
    Layout { path: PathBuf, message: String },

    #[error("unsupported config format for {0:?} (expected .ini, .cfg, .yml or .yaml)")]
    UnsupportedFormat(PathBuf),

    #[error("none of the config files exist: {0:?}")]
    NoConfigFiles(Vec<PathBuf>),

    #[error("interpolation cycle in [{section}] involving key '{key}'")]
    InterpolationCycle { section: String, key: String },

    #[error("unresolved reference '%({name})' in {context}")]
    MissingReference { name: String, context: String },

    #[error("bad placeholder in {context}: {message}")]
    BadPlaceholder { context: String, message: String },

    #[error("invalid override '{0}' (expected SECTION.KEY=VALUE or KEY=VALUE)")]
    InvalidOverride(String),

    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("refusing to overwrite existing file {0:?} (use --force)")]
    WouldOverwrite(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML serialisation error: {0}")]
    TomlError(#[from] toml::ser::Error),

    #[error("formatting error: {0}")]
    FormatError(#[from] std::fmt::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PipeconfError>;
