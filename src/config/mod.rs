// src/config/mod.rs

//! Reading and checking pipeline configuration files.
//!
//! Responsibilities:
//! - Parse `pipeline.ini` (`ini.rs`) and `pipeline.yml` (`yaml.rs`).
//! - Locate and layer several files (`loader.rs`).
//! - Check the result against the schema (`validate.rs`).

pub mod ini;
pub mod loader;
pub mod validate;
pub mod yaml;

pub use ini::parse_ini;
pub use loader::{
    ConfigFormat, LoadOptions, LoadedConfig, default_search_paths, load_and_validate, load_file,
    load_layered,
};
pub use validate::{Diagnostic, Severity, ValidationReport, validate};
pub use yaml::parse_yaml;
