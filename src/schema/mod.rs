// src/schema/mod.rs

//! Known sections and parameters of pipeline configuration files.
//!
//! - [`model`] describes parameter kinds and specs.
//! - [`sections`] is the built-in table.
//! - [`render`] writes a commented default configuration.

pub mod model;
pub mod render;
pub mod sections;

pub use model::{CrossCheck, ParamKind, ParamSpec, SectionSpec};
pub use render::{render_ini, render_yaml};

use crate::params::{Origin, ParameterSet};

/// A set of section specs plus the cross-section conventions between them.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    sections: &'static [SectionSpec],
    cross_checks: &'static [CrossCheck],
}

impl Schema {
    pub const fn new(
        sections: &'static [SectionSpec],
        cross_checks: &'static [CrossCheck],
    ) -> Self {
        Self {
            sections,
            cross_checks,
        }
    }

    /// The built-in schema covering the standard pipeline sections.
    pub const fn builtin() -> Self {
        Self::new(sections::SECTIONS, sections::CROSS_CHECKS)
    }

    pub fn sections(&self) -> &'static [SectionSpec] {
        self.sections
    }

    pub fn cross_checks(&self) -> &'static [CrossCheck] {
        self.cross_checks
    }

    pub fn section(&self, name: &str) -> Option<&'static SectionSpec> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn param(&self, section: &str, key: &str) -> Option<&'static ParamSpec> {
        self.section(section).and_then(|s| s.param(key))
    }

    /// Every parameter at its default value.
    pub fn defaults(&self) -> ParameterSet {
        let mut params = ParameterSet::new();
        for section in self.sections {
            params.ensure_section(section.name);
            for spec in section.params {
                params.insert(section.name, spec.key, spec.default_value(), Origin::Default);
            }
        }
        params
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::builtin()
    }
}
