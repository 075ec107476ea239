// src/schema/render.rs

//! Writers for default configurations and for resolved parameter sets.

use std::fmt::Write as _;

use crate::errors::Result;
use crate::params::{GENERAL_SECTION, ParamValue, ParameterSet};
use crate::schema::{ParamSpec, Schema};

const BANNER: &str = "generated by pipeconf; edit the values for your project";
const RULE: &str = "################################################################";

/// Default configuration in INI format, one commented entry per parameter.
pub fn render_ini(schema: &Schema) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "# pipeline.ini {BANNER}")?;

    for section in schema.sections() {
        writeln!(out)?;
        writeln!(out, "{RULE}")?;
        writeln!(out, "# {}", section.help)?;
        writeln!(out, "[{}]", section.name)?;
        for spec in section.params {
            writeln!(out, "# {} ({})", spec.help, spec.kind)?;
            writeln!(out, "{}={}", spec.key, spec.default)?;
        }
    }
    Ok(out)
}

/// Default configuration in YAML format.
///
/// `general` parameters are written at top level, everything else nested
/// under its section. A general key named like a section (`homer`,
/// `database`) cannot sit next to that section's mapping, so those go into
/// an explicit `general:` mapping instead.
pub fn render_yaml(schema: &Schema) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "# pipeline.yml {BANNER}")?;

    for section in schema.sections() {
        writeln!(out)?;
        writeln!(out, "# {}", section.help)?;

        if section.name == GENERAL_SECTION {
            let (shadowed, plain): (Vec<&ParamSpec>, Vec<&ParamSpec>) = section
                .params
                .iter()
                .partition(|spec| schema.section(spec.key).is_some());

            write_yaml_params(&mut out, "", plain)?;
            if !shadowed.is_empty() {
                writeln!(out, "{GENERAL_SECTION}:")?;
                write_yaml_params(&mut out, "    ", shadowed)?;
            }
            continue;
        }

        writeln!(out, "{}:", section.name)?;
        write_yaml_params(&mut out, "    ", section.params.iter().collect())?;
    }
    Ok(out)
}

fn write_yaml_params(out: &mut String, indent: &str, specs: Vec<&ParamSpec>) -> Result<()> {
    for spec in specs {
        writeln!(out, "{indent}# {} ({})", spec.help, spec.kind)?;
        let value = yaml_scalar(&spec.default_value())?;
        writeln!(out, "{indent}{}: {value}", spec.key)?;
    }
    Ok(())
}

/// Resolved parameters in INI format, `general` first.
pub fn write_ini(params: &ParameterSet) -> Result<String> {
    let mut out = String::new();
    let general = params.section(GENERAL_SECTION).map(|s| (GENERAL_SECTION, s));
    let others = params.sections().filter(|(name, _)| *name != GENERAL_SECTION);

    for (i, (name, entries)) in general.into_iter().chain(others).enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "[{name}]")?;
        for (key, entry) in entries {
            let text = entry.value.to_string().replace('\n', "\n    ");
            writeln!(out, "{key}={text}")?;
        }
    }
    Ok(out)
}

fn yaml_scalar(value: &ParamValue) -> Result<String> {
    let text = serde_yaml::to_string(value).map_err(anyhow::Error::from)?;
    Ok(text.trim_end().to_string())
}
