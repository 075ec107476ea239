// src/commands.rs

//! Implementation of the CLI subcommands.
//!
//! Every command writes its normal output to the given writer and returns
//! whether it succeeded; diagnostics go through `tracing` or the writer,
//! never straight to the terminal.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::cli::{ConfigFileFormat, ShowFormat};
use crate::config::{LoadedConfig, validate};
use crate::errors::PipeconfError;
use crate::fs::FileSystem;
use crate::params::{ParamValue, ParameterSet, flat_name, render_statement};
use crate::schema::{Schema, render};

/// `check`: print diagnostics and a summary line.
pub fn check(
    out: &mut dyn Write,
    loaded: &LoadedConfig,
    schema: &Schema,
    strict: bool,
) -> Result<bool> {
    let mut report = validate(&loaded.params, schema);
    if strict {
        report = report.into_strict();
    }

    for diagnostic in report.diagnostics() {
        writeln!(out, "{diagnostic}")?;
    }

    let errors = report.errors().count();
    let warnings = report.warnings().count();
    writeln!(
        out,
        "checked {} parameter(s) from {} file(s): {} error(s), {} warning(s)",
        loaded.params.len(),
        loaded.files.len(),
        errors,
        warnings
    )?;

    Ok(errors == 0)
}

/// `show`: print the effective parameters.
pub fn show(
    out: &mut dyn Write,
    params: &ParameterSet,
    section: Option<&str>,
    format: ShowFormat,
    with_origin: bool,
) -> Result<bool> {
    let selected = match section {
        Some(name) => {
            let name = name.to_lowercase();
            let Some(entries) = params.section(&name) else {
                warn!(section = %name, "section not present in configuration");
                return Ok(false);
            };
            let mut only = ParameterSet::new();
            only.ensure_section(&name);
            for (key, entry) in entries {
                only.insert(&name, key, entry.value.clone(), entry.origin.clone());
            }
            only
        }
        None => params.clone(),
    };

    match format {
        ShowFormat::Flat => {
            let flat = if section.is_some() {
                selected
                    .sections()
                    .flat_map(|(s, entries)| {
                        entries
                            .iter()
                            .map(move |(k, e)| (flat_name(s, k), e.value.clone()))
                    })
                    .collect::<BTreeMap<_, _>>()
            } else {
                selected.flatten()
            };
            for (name, value) in flat {
                let text = value.to_string().replace('\n', " ");
                if with_origin {
                    let origin = selected
                        .get(&name)
                        .map(|e| e.origin.to_string())
                        .unwrap_or_default();
                    writeln!(out, "{name}={text}\t# {origin}")?;
                } else {
                    writeln!(out, "{name}={text}")?;
                }
            }
        }
        ShowFormat::Ini => write!(out, "{}", render::write_ini(&selected)?)?,
        ShowFormat::Yaml => {
            let text = serde_yaml::to_string(&selected.to_value_map())
                .context("serialising parameters as YAML")?;
            write!(out, "{text}")?;
        }
        ShowFormat::Toml => {
            let text = toml::to_string(&selected.to_value_map()).map_err(PipeconfError::from)?;
            write!(out, "{text}")?;
        }
    }

    Ok(true)
}

/// `get`: print one parameter by flattened name.
pub fn get(out: &mut dyn Write, params: &ParameterSet, name: &str, as_list: bool) -> Result<bool> {
    let entry = params
        .get(name)
        .ok_or_else(|| PipeconfError::UnknownParameter(name.to_string()))?;

    if as_list {
        for item in entry.value.as_list() {
            writeln!(out, "{item}")?;
        }
    } else {
        writeln!(out, "{}", entry.value)?;
    }
    Ok(true)
}

/// `render`: substitute placeholders in a statement.
pub fn render_cmd(
    out: &mut dyn Write,
    fs: &dyn FileSystem,
    params: &ParameterSet,
    statement: Option<&str>,
    template: Option<&Path>,
    vars: &[String],
) -> Result<bool> {
    let text = match (statement, template) {
        (Some(s), _) => s.to_string(),
        (None, Some(path)) => fs.read_to_string(path)?,
        (None, None) => anyhow::bail!("either --statement or --template is required"),
    };

    let locals = parse_vars(vars)?;
    let rendered = render_statement(&text, params, &locals)?;
    writeln!(out, "{}", rendered.trim_end())?;
    Ok(true)
}

/// `digest`: print the fingerprint of the effective parameters.
pub fn digest(out: &mut dyn Write, params: &ParameterSet) -> Result<bool> {
    let digest = params.digest();
    info!(%digest, "computed parameter digest");
    writeln!(out, "{digest}")?;
    Ok(true)
}

/// `config`: write a default configuration file.
pub fn write_default_config(
    fs: &dyn FileSystem,
    schema: &Schema,
    format: ConfigFileFormat,
    output: Option<&Path>,
    force: bool,
) -> Result<PathBuf> {
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(format.default_file_name()));

    if fs.exists(&path) && !force {
        return Err(PipeconfError::WouldOverwrite(path).into());
    }

    let text = match format {
        ConfigFileFormat::Ini => render::render_ini(schema)?,
        ConfigFileFormat::Yml => render::render_yaml(schema)?,
    };
    fs.write(&path, text.as_bytes())?;
    info!(path = ?path, "wrote default configuration");
    Ok(path)
}

/// Parse `NAME=VALUE` pairs given with `--var`.
pub fn parse_vars(vars: &[String]) -> Result<BTreeMap<String, ParamValue>> {
    let mut locals = BTreeMap::new();
    for var in vars {
        let (name, value) = var
            .split_once('=')
            .with_context(|| format!("invalid --var '{var}' (expected NAME=VALUE)"))?;
        debug!(name = %name.trim(), "statement variable");
        locals.insert(name.trim().to_lowercase(), ParamValue::from_raw(value));
    }
    Ok(locals)
}
