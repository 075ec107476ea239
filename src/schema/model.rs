// src/schema/model.rs

use std::fmt;

use regex::Regex;

use crate::params::ParamValue;

/// Expected type (and range) of a parameter.
///
/// Empty values are accepted for every kind: pipelines use an empty value
/// to mean "not set" and the consuming step decides what that implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Str,
    Path,
    Int,
    PositiveInt,
    NonNegativeInt,
    Float,
    /// Float in `[0, 1]`, e.g. an FDR threshold or a fraction.
    Probability,
    /// `0`/`1`, `true`/`false` or `yes`/`no`.
    Bool,
    /// Comma-separated list (or a YAML sequence).
    List,
    /// Regular expression.
    Pattern,
    Choice(&'static [&'static str]),
}

impl ParamKind {
    /// Check `value` against this kind, returning a human readable reason on
    /// mismatch.
    pub fn check(&self, value: &ParamValue) -> Result<(), String> {
        if value.is_empty() {
            return Ok(());
        }

        let scalar = || -> Result<(), String> {
            if matches!(value, ParamValue::List(_)) {
                Err(format!("expected {self}, got a list"))
            } else {
                Ok(())
            }
        };
        let mismatch = || -> Result<(), String> {
            Err(format!("expected {self}, got {} '{value}'", value.type_name()))
        };

        match self {
            ParamKind::Str | ParamKind::Path => scalar(),
            ParamKind::List => Ok(()),
            ParamKind::Int => match value.as_i64() {
                Some(_) => Ok(()),
                None => mismatch(),
            },
            ParamKind::PositiveInt => match value.as_i64() {
                Some(i) if i > 0 => Ok(()),
                _ => mismatch(),
            },
            ParamKind::NonNegativeInt => match value.as_i64() {
                Some(i) if i >= 0 => Ok(()),
                _ => mismatch(),
            },
            ParamKind::Float => match value.as_f64() {
                Some(f) if f.is_finite() => Ok(()),
                _ => mismatch(),
            },
            ParamKind::Probability => match value.as_f64() {
                Some(p) if (0.0..=1.0).contains(&p) => Ok(()),
                _ => mismatch(),
            },
            ParamKind::Bool => match value.as_bool() {
                Some(_) => Ok(()),
                None => mismatch(),
            },
            ParamKind::Pattern => {
                scalar()?;
                Regex::new(&value.to_string())
                    .map(|_| ())
                    .map_err(|e| format!("invalid pattern '{value}': {e}"))
            }
            ParamKind::Choice(options) => {
                scalar()?;
                let text = value.to_string();
                if options.contains(&text.as_str()) {
                    Ok(())
                } else {
                    Err(format!("expected one of {options:?}, got '{text}'"))
                }
            }
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Str => f.write_str("a string"),
            ParamKind::Path => f.write_str("a path"),
            ParamKind::Int => f.write_str("an integer"),
            ParamKind::PositiveInt => f.write_str("a positive integer"),
            ParamKind::NonNegativeInt => f.write_str("a non-negative integer"),
            ParamKind::Float => f.write_str("a number"),
            ParamKind::Probability => f.write_str("a number in [0, 1]"),
            ParamKind::Bool => f.write_str("a boolean"),
            ParamKind::List => f.write_str("a comma-separated list"),
            ParamKind::Pattern => f.write_str("a regular expression"),
            ParamKind::Choice(options) => write!(f, "one of {options:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub key: &'static str,
    pub kind: ParamKind,
    /// Default as it would be written in `pipeline.ini`.
    pub default: &'static str,
    pub help: &'static str,
}

impl ParamSpec {
    pub fn default_value(&self) -> ParamValue {
        ParamValue::from_raw(self.default)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SectionSpec {
    pub name: &'static str,
    pub help: &'static str,
    pub params: &'static [ParamSpec],
}

impl SectionSpec {
    pub fn param(&self, key: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.key == key)
    }
}

/// Relationships between sections that are kept by convention only.
#[derive(Debug, Clone, Copy)]
pub enum CrossCheck {
    /// `follower` is expected to repeat the value of `leader`.
    Echo {
        leader: (&'static str, &'static str),
        follower: (&'static str, &'static str),
    },
    /// The two parameters must not have the same value.
    Distinct {
        a: (&'static str, &'static str),
        b: (&'static str, &'static str),
    },
}
