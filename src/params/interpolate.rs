// src/params/interpolate.rs

//! `%(name)s` placeholder substitution.
//!
//! Pipelines build tool command lines ("statements") from templates such
//! as:
//!
//! ```text
//! bwa aln -t %(bwa_threads)i %(bwa_index_dir)s/%(genome)s %(infile)s
//! ```
//!
//! Supported conversions:
//! - `s`: the value as text,
//! - `i` / `d`: integer (floats are truncated, booleans become 0/1),
//! - `f`: fixed-point with six decimals.
//!
//! `%%` produces a literal `%`. A `%` that does not start a placeholder is
//! copied through unchanged.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::errors::{PipeconfError, Result};
use crate::params::set::ParameterSet;
use crate::params::value::ParamValue;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%(?:(%)|\(([^)]*)\)([A-Za-z]?))").expect("placeholder regex is valid")
});

/// Names referenced by placeholders in `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.get(2).map(|m| m.as_str().trim().to_lowercase()))
        .collect()
}

/// Substitute every placeholder in `template` using `lookup`.
///
/// `context` names the template in error messages (a statement, or an INI
/// `[section] key`).
pub fn substitute<F>(template: &str, context: &str, mut lookup: F) -> Result<String>
where
    F: FnMut(&str) -> Option<ParamValue>,
{
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(template) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&template[last..whole.start()]);
        last = whole.end();

        if caps.get(1).is_some() {
            out.push('%');
            continue;
        }

        out.push_str(&expand(&caps, context, &mut lookup)?);
    }

    out.push_str(&template[last..]);
    Ok(out)
}

fn expand<F>(caps: &Captures<'_>, context: &str, lookup: &mut F) -> Result<String>
where
    F: FnMut(&str) -> Option<ParamValue>,
{
    let name = caps
        .get(2)
        .map(|m| m.as_str().trim().to_lowercase())
        .unwrap_or_default();
    let conversion = caps.get(3).map(|m| m.as_str()).unwrap_or("");

    if name.is_empty() {
        return Err(PipeconfError::BadPlaceholder {
            context: context.to_string(),
            message: "empty placeholder name".to_string(),
        });
    }

    let value = lookup(&name).ok_or_else(|| PipeconfError::MissingReference {
        name: name.clone(),
        context: context.to_string(),
    })?;

    let bad = |message: String| PipeconfError::BadPlaceholder {
        context: context.to_string(),
        message,
    };

    match conversion {
        "s" => Ok(value.to_string()),
        "i" | "d" => match value {
            ParamValue::Int(i) => Ok(i.to_string()),
            ParamValue::Float(f) => Ok((f.trunc() as i64).to_string()),
            ParamValue::Bool(b) => Ok(u8::from(b).to_string()),
            other => Err(bad(format!(
                "%({name}){conversion} needs a number, got {} '{other}'",
                other.type_name()
            ))),
        },
        "f" => match value.as_f64() {
            Some(f) => Ok(format!("{f:.6}")),
            None => Err(bad(format!(
                "%({name})f needs a number, got {} '{value}'",
                value.type_name()
            ))),
        },
        "" => Err(bad(format!("%({name}) is missing a conversion character"))),
        other => Err(bad(format!("unsupported conversion '{other}' in %({name}){other}"))),
    }
}

/// Render a pipeline statement.
///
/// Names are looked up in `locals` first (task-specific values such as
/// `infile` / `outfile`) and then in the flattened parameter set.
pub fn render_statement(
    template: &str,
    params: &ParameterSet,
    locals: &BTreeMap<String, ParamValue>,
) -> Result<String> {
    let flat = params.flatten();
    substitute(template, "statement", |name| {
        locals.get(name).or_else(|| flat.get(name)).cloned()
    })
}
