// src/config/yaml.rs

//! Reader for `pipeline.yml` files.
//!
//! Layout:
//!
//! ```yaml
//! genome: hg19          # top-level scalars belong to [general]
//! bwa:                  # top-level mappings are sections
//!   threads: 4
//! deep:
//!   bamcoverage:        # deeper mappings are joined with '_'
//!     options: --normalizeUsing RPKM
//! ```
//!
//! The example above yields `genome`, `bwa_threads` and
//! `deep_bamcoverage_options`.

use std::collections::HashSet;
use std::path::Path;

use serde_yaml::Value;
use tracing::trace;

use crate::errors::{PipeconfError, Result};
use crate::params::{GENERAL_SECTION, Origin, ParamValue, ParameterSet};

pub fn parse_yaml(text: &str, path: &Path) -> Result<ParameterSet> {
    let document: Value = serde_yaml::from_str(text).map_err(|source| PipeconfError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;

    let layout = |message: String| PipeconfError::Layout {
        path: path.to_path_buf(),
        message,
    };
    let origin = || Origin::File {
        path: path.to_path_buf(),
        line: None,
    };

    let mut params = ParameterSet::new();
    let root = match document {
        Value::Null => return Ok(params),
        Value::Mapping(map) => map,
        other => {
            return Err(layout(format!(
                "top level must be a mapping, got {}",
                kind_of(&other)
            )));
        }
    };

    // Keys are lowercased and nested mappings joined with '_', so two
    // distinct YAML keys can land on the same parameter.
    let insert = |params: &mut ParameterSet, section: &str, key: &str, value: ParamValue| {
        if params.get_in(section, key).is_some() {
            return Err(PipeconfError::DuplicateYamlKey {
                path: path.to_path_buf(),
                section: section.to_string(),
                key: key.to_string(),
            });
        }
        params.insert(section, key, value, origin());
        Ok(())
    };

    let mut mapped_sections: HashSet<String> = HashSet::new();
    for (key, value) in root {
        let name = key_to_string(&key).ok_or_else(|| layout(format!("unsupported key {key:?}")))?;
        match value {
            Value::Mapping(section) => {
                if !mapped_sections.insert(name.clone()) {
                    return Err(layout(format!("section [{name}] is defined more than once")));
                }
                params.ensure_section(&name);
                let mut flat = Vec::new();
                flatten_mapping(section, None, &mut flat).map_err(&layout)?;
                for (key, value) in flat {
                    insert(&mut params, &name, &key, value)?;
                }
            }
            other => {
                let value = convert(other).map_err(|msg| layout(format!("{name}: {msg}")))?;
                insert(&mut params, GENERAL_SECTION, &name, value)?;
            }
        }
    }

    trace!(path = ?path, entries = params.len(), "parsed YAML file");
    Ok(params)
}

fn flatten_mapping(
    map: serde_yaml::Mapping,
    prefix: Option<&str>,
    out: &mut Vec<(String, ParamValue)>,
) -> std::result::Result<(), String> {
    for (key, value) in map {
        let key = key_to_string(&key).ok_or_else(|| format!("unsupported key {key:?}"))?;
        let name = match prefix {
            Some(prefix) => format!("{prefix}_{key}"),
            None => key,
        };
        match value {
            Value::Mapping(inner) => flatten_mapping(inner, Some(&name), out)?,
            other => {
                let value = convert(other).map_err(|msg| format!("{name}: {msg}"))?;
                out.push((name, value));
            }
        }
    }
    Ok(())
}

fn convert(value: Value) -> std::result::Result<ParamValue, String> {
    match value {
        Value::Null => Ok(ParamValue::Str(String::new())),
        Value::Bool(b) => Ok(ParamValue::Bool(b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(ParamValue::Int(i)),
            None => n
                .as_f64()
                .map(ParamValue::Float)
                .ok_or_else(|| format!("unrepresentable number {n}")),
        },
        Value::String(s) => Ok(ParamValue::Str(s)),
        Value::Sequence(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Sequence(_) | Value::Mapping(_) => {
                    Err("lists may only contain scalar values".to_string())
                }
                scalar => convert(scalar),
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(ParamValue::List),
        Value::Mapping(_) => Err("unexpected mapping".to_string()),
        Value::Tagged(tagged) => convert(tagged.value),
    }
}

fn key_to_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.trim().to_lowercase()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
