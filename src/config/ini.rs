// src/config/ini.rs

//! Reader for `pipeline.ini` files.
//!
//! The dialect is the one the pipeline driver has always used:
//!
//! ```ini
//! [DEFAULT]
//! base=/ifs/data
//!
//! [general]
//! genome=hg19
//! genome_dir=%(base)s/genomes
//!
//! # comments start with '#' or ';'
//! [bwa]
//! threads: 4
//! options=-l 25
//!     -k 2
//! ```
//!
//! - keys are lowercased and trimmed, `=` or `:` separates key and value,
//! - indented lines continue the previous value,
//! - `%(key)s` refers to another key of the same section or of `[DEFAULT]`,
//! - a key may appear only once per section and a section only once per file.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::trace;

use crate::errors::{PipeconfError, Result};
use crate::params::{Origin, ParamValue, ParameterSet, placeholders, substitute};

/// Section whose keys are visible to every other section's interpolation.
pub const DEFAULT_SECTION: &str = "DEFAULT";

#[derive(Debug, Clone)]
struct RawEntry {
    key: String,
    value: String,
    line: usize,
}

#[derive(Debug, Clone)]
struct RawSection {
    name: String,
    entries: Vec<RawEntry>,
}

/// Parse INI text into a [`ParameterSet`]. `path` is used for origins and
/// error messages only.
pub fn parse_ini(text: &str, path: &Path) -> Result<ParameterSet> {
    let (defaults, sections) = scan(text, path)?;

    let mut params = ParameterSet::new();
    for section in &sections {
        params.ensure_section(&section.name);

        let resolved = resolve_section(section, defaults.as_ref())?;
        for entry in &section.entries {
            let value = resolved
                .get(entry.key.as_str())
                .map(String::as_str)
                .unwrap_or(entry.value.as_str());
            params.insert(
                &section.name,
                &entry.key,
                ParamValue::from_raw(value),
                Origin::File {
                    path: path.to_path_buf(),
                    line: Some(entry.line),
                },
            );
        }
    }

    trace!(path = ?path, entries = params.len(), "parsed INI file");
    Ok(params)
}

/// Split the text into sections and entries, enforcing the syntax rules.
fn scan(text: &str, path: &Path) -> Result<(Option<RawSection>, Vec<RawSection>)> {
    let path: PathBuf = path.to_path_buf();
    let syntax = |line: usize, message: String| PipeconfError::Syntax {
        path: path.clone(),
        line,
        message,
    };

    let mut defaults: Option<RawSection> = None;
    let mut sections: Vec<RawSection> = Vec::new();
    let mut section_lines: HashMap<String, usize> = HashMap::new();
    let mut key_lines: HashMap<String, usize> = HashMap::new();
    // Whether new entries go to `defaults` (true) or the last of `sections`.
    let mut in_defaults = false;
    let mut have_section = false;
    let mut last_entry_open = false;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw_line.trim();

        if trimmed.is_empty() {
            last_entry_open = false;
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        let indented = raw_line.starts_with(' ') || raw_line.starts_with('\t');
        if indented && last_entry_open {
            let current = if in_defaults {
                defaults.as_mut()
            } else {
                sections.last_mut()
            };
            if let Some(entry) = current.and_then(|s| s.entries.last_mut()) {
                entry.value.push('\n');
                entry.value.push_str(trimmed);
                continue;
            }
        }

        if let Some(header) = trimmed.strip_prefix('[') {
            // Anything after the closing bracket (usually a comment) is ignored.
            let close = header.find(']').ok_or_else(|| {
                syntax(line_no, format!("unterminated section header '{trimmed}'"))
            })?;
            let name = header[..close].trim();
            if name.is_empty() {
                return Err(syntax(line_no, "empty section name".to_string()));
            }

            let lookup_name = if name == DEFAULT_SECTION {
                name.to_string()
            } else {
                name.to_lowercase()
            };
            if section_lines.insert(lookup_name.clone(), line_no).is_some() {
                return Err(PipeconfError::DuplicateSection {
                    path: path.clone(),
                    section: name.to_string(),
                    line: line_no,
                });
            }

            key_lines.clear();
            have_section = true;
            last_entry_open = false;
            if name == DEFAULT_SECTION {
                in_defaults = true;
                defaults = Some(RawSection {
                    name: name.to_string(),
                    entries: Vec::new(),
                });
            } else {
                in_defaults = false;
                sections.push(RawSection {
                    name: lookup_name,
                    entries: Vec::new(),
                });
            }
            continue;
        }

        let sep = trimmed
            .find(['=', ':'])
            .ok_or_else(|| syntax(line_no, format!("expected 'key=value', got '{trimmed}'")))?;
        let key = trimmed[..sep].trim().to_lowercase();
        let value = trimmed[sep + 1..].trim().to_string();

        if key.is_empty() {
            return Err(syntax(line_no, "empty key".to_string()));
        }
        if !have_section {
            return Err(syntax(
                line_no,
                format!("key '{key}' appears before any [section] header"),
            ));
        }

        let current = if in_defaults {
            defaults.as_mut()
        } else {
            sections.last_mut()
        };
        let Some(current) = current else {
            return Err(syntax(line_no, "no current section".to_string()));
        };

        if let Some(first_line) = key_lines.insert(key.clone(), line_no) {
            return Err(PipeconfError::DuplicateKey {
                path: path.clone(),
                section: current.name.clone(),
                key,
                first_line,
                line: line_no,
            });
        }

        current.entries.push(RawEntry {
            key,
            value,
            line: line_no,
        });
        last_entry_open = true;
    }

    Ok((defaults, sections))
}

/// Expand `%(key)s` references inside one section.
///
/// References are resolved in dependency order; a cycle is reported with
/// one of the keys taking part in it.
fn resolve_section(
    section: &RawSection,
    defaults: Option<&RawSection>,
) -> Result<BTreeMap<String, String>> {
    // Section keys shadow DEFAULT keys.
    let mut scope: BTreeMap<&str, &str> = BTreeMap::new();
    if let Some(defaults) = defaults {
        for entry in &defaults.entries {
            scope.insert(entry.key.as_str(), entry.value.as_str());
        }
    }
    for entry in &section.entries {
        scope.insert(entry.key.as_str(), entry.value.as_str());
    }

    // Edge direction: referenced key -> referencing key.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
    for (&key, &raw) in &scope {
        graph.add_node(key);
        for name in placeholders(raw) {
            if let Some((&dep, _)) = scope.get_key_value(name.as_str()) {
                graph.add_edge(dep, key, ());
            }
        }
    }

    let order = toposort(&graph, None).map_err(|cycle| PipeconfError::InterpolationCycle {
        section: section.name.clone(),
        key: cycle.node_id().to_string(),
    })?;

    let mut resolved: BTreeMap<String, String> = BTreeMap::new();
    for key in order {
        let raw = scope[key];
        let context = format!("[{}] {}", section.name, key);
        let value = substitute(raw, &context, |name| {
            resolved.get(name).map(|v| ParamValue::Str(v.clone()))
        })?;
        resolved.insert(key.to_string(), value);
    }

    Ok(resolved)
}

