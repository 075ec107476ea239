// src/config/validate.rs

use std::fmt;

use tracing::debug;

use crate::params::{Origin, ParameterSet};
use crate::schema::{CrossCheck, Schema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// One problem found in a configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub section: String,
    pub key: Option<String>,
    pub message: String,
    pub origin: Option<Origin>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [{}]", self.severity, self.section)?;
        if let Some(key) = &self.key {
            write!(f, " {key}")?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(origin) = &self.origin {
            write!(f, " ({origin})")?;
        }
        Ok(())
    }
}

/// Everything validation found, in the order it was found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Treat every warning as an error.
    pub fn into_strict(mut self) -> Self {
        for d in &mut self.diagnostics {
            d.severity = Severity::Error;
        }
        self
    }

    fn push(
        &mut self,
        severity: Severity,
        section: &str,
        key: Option<&str>,
        message: String,
        origin: Option<&Origin>,
    ) {
        self.diagnostics.push(Diagnostic {
            severity,
            section: section.to_string(),
            key: key.map(str::to_string),
            message,
            origin: origin.cloned(),
        });
    }
}

/// Check a parameter set against `schema`.
///
/// This checks:
/// - every known parameter has a value of the expected kind and range
/// - unknown sections and unknown keys in known sections (warnings)
/// - parameters shadowed by another with the same flattened name (warnings)
/// - the cross-section conventions of the schema
///
/// It never stops at the first problem.
pub fn validate(params: &ParameterSet, schema: &Schema) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_kinds(params, schema, &mut report);
    check_flat_collisions(params, &mut report);
    check_cross_sections(params, schema, &mut report);

    debug!(
        diagnostics = report.diagnostics.len(),
        errors = report.errors().count(),
        "validation finished"
    );
    report
}

fn check_kinds(params: &ParameterSet, schema: &Schema, report: &mut ValidationReport) {
    for (section, entries) in params.sections() {
        let Some(spec) = schema.section(section) else {
            report.push(
                Severity::Warning,
                section,
                None,
                "unknown section".to_string(),
                entries.values().next().map(|e| &e.origin),
            );
            continue;
        };

        for (key, entry) in entries {
            match spec.param(key) {
                Some(param) => {
                    if let Err(reason) = param.kind.check(&entry.value) {
                        report.push(
                            Severity::Error,
                            section,
                            Some(key),
                            reason,
                            Some(&entry.origin),
                        );
                    }
                }
                None => report.push(
                    Severity::Warning,
                    section,
                    Some(key),
                    "unknown parameter".to_string(),
                    Some(&entry.origin),
                ),
            }
        }
    }
}

fn check_flat_collisions(params: &ParameterSet, report: &mut ValidationReport) {
    for collision in params.flat_collisions() {
        let origin = params
            .get_in(&collision.section, &collision.key)
            .map(|e| &e.origin);
        report.push(
            Severity::Warning,
            &collision.section,
            Some(&collision.key),
            format!(
                "'{}' is shadowed by the same name from [{}]; the [{}] value is used",
                collision.name, collision.winner, collision.winner
            ),
            origin,
        );
    }
}

fn check_cross_sections(params: &ParameterSet, schema: &Schema, report: &mut ValidationReport) {
    for check in schema.cross_checks() {
        match *check {
            CrossCheck::Echo { leader, follower } => {
                let (Some(lead), Some(follow)) = (
                    params.get_in(leader.0, leader.1),
                    params.get_in(follower.0, follower.1),
                ) else {
                    continue;
                };
                if lead.value.to_string() != follow.value.to_string() {
                    report.push(
                        Severity::Warning,
                        follower.0,
                        Some(follower.1),
                        format!(
                            "'{}' differs from {}.{} = '{}'",
                            follow.value, leader.0, leader.1, lead.value
                        ),
                        Some(&follow.origin),
                    );
                }
            }
            CrossCheck::Distinct { a, b } => {
                let (Some(first), Some(second)) =
                    (params.get_in(a.0, a.1), params.get_in(b.0, b.1))
                else {
                    continue;
                };
                if !first.value.is_empty() && first.value == second.value {
                    report.push(
                        Severity::Error,
                        b.0,
                        Some(b.1),
                        format!("must differ from {}.{} (both '{}')", a.0, a.1, first.value),
                        Some(&second.origin),
                    );
                }
            }
        }
    }
}
