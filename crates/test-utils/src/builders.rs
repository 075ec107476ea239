#![allow(dead_code)]

use std::path::PathBuf;

use pipeconf::params::{Origin, ParamValue, ParameterSet};

/// Builder for `ParameterSet` to simplify test setup.
///
/// Values are given as raw text and converted the same way INI values are.
pub struct ParameterSetBuilder {
    params: ParameterSet,
    origin: Origin,
}

impl ParameterSetBuilder {
    pub fn new() -> Self {
        Self {
            params: ParameterSet::new(),
            origin: Origin::File {
                path: PathBuf::from("pipeline.ini"),
                line: None,
            },
        }
    }

    /// Origin attached to values added after this call.
    pub fn from_file(mut self, path: &str) -> Self {
        self.origin = Origin::File {
            path: PathBuf::from(path),
            line: None,
        };
        self
    }

    pub fn with(mut self, section: &str, key: &str, raw: &str) -> Self {
        self.params
            .insert(section, key, ParamValue::from_raw(raw), self.origin.clone());
        self
    }

    pub fn with_value(mut self, section: &str, key: &str, value: ParamValue) -> Self {
        self.params.insert(section, key, value, self.origin.clone());
        self
    }

    pub fn with_general(self, key: &str, raw: &str) -> Self {
        self.with("general", key, raw)
    }

    pub fn build(self) -> ParameterSet {
        self.params
    }
}

impl Default for ParameterSetBuilder {
    fn default() -> Self {
        Self::new()
    }
}
