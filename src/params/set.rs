// src/params/set.rs

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use blake3::Hasher;
use tracing::debug;

use crate::errors::{PipeconfError, Result};
use crate::params::value::ParamValue;

/// Name of the section whose keys are also exposed without a prefix.
pub const GENERAL_SECTION: &str = "general";

/// Where the effective value of a parameter came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// A configuration file; `line` is known for INI files only.
    File { path: PathBuf, line: Option<usize> },
    /// A `--set` override on the command line.
    Override,
    /// The built-in schema default.
    Default,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::File {
                path,
                line: Some(line),
            } => write!(f, "{}:{}", path.display(), line),
            Origin::File { path, line: None } => write!(f, "{}", path.display()),
            Origin::Override => f.write_str("command line"),
            Origin::Default => f.write_str("default"),
        }
    }
}

/// A parameter hidden behind another one with the same flattened name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatCollision {
    pub name: String,
    /// Section and key of the hidden parameter.
    pub section: String,
    pub key: String,
    /// Section whose value is used instead.
    pub winner: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub value: ParamValue,
    pub origin: Origin,
}

/// All parameters of a pipeline, grouped by section.
///
/// Sections and keys are stored lowercased. The flattened view used by
/// pipeline statements is produced by [`ParameterSet::flatten`]:
///
/// - `[general] genome=hg19` -> `genome` and `general_genome`
/// - `[bwa] threads=4` -> `bwa_threads`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    sections: BTreeMap<String, BTreeMap<String, Entry>>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a single value.
    pub fn insert(
        &mut self,
        section: &str,
        key: &str,
        value: impl Into<ParamValue>,
        origin: Origin,
    ) {
        self.sections
            .entry(section.to_lowercase())
            .or_default()
            .insert(
                key.to_lowercase(),
                Entry {
                    value: value.into(),
                    origin,
                },
            );
    }

    /// Make sure a section exists even if it has no keys yet.
    pub fn ensure_section(&mut self, section: &str) {
        self.sections.entry(section.to_lowercase()).or_default();
    }

    pub fn get_in(&self, section: &str, key: &str) -> Option<&Entry> {
        self.sections.get(section).and_then(|s| s.get(key))
    }

    pub fn section(&self, name: &str) -> Option<&BTreeMap<String, Entry>> {
        self.sections.get(name)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, Entry>)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Total number of `(section, key)` entries.
    pub fn len(&self) -> usize {
        self.sections.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lay `other` on top of `self`.
    ///
    /// Values are replaced key by key; sections and keys only present in
    /// `self` survive.
    pub fn merge_layer(&mut self, other: ParameterSet) {
        for (section, entries) in other.sections {
            let target = self.sections.entry(section.clone()).or_default();
            for (key, entry) in entries {
                if let Some(previous) = target.get(&key) {
                    debug!(
                        section = %section,
                        key = %key,
                        from = %previous.origin,
                        to = %entry.origin,
                        "parameter overridden by later layer"
                    );
                }
                target.insert(key, entry);
            }
        }
    }

    /// Apply a command-line override of the form `section.key=value`.
    ///
    /// A bare `key=value` targets the `general` section. Further dots are
    /// joined with `_` the way nested YAML mappings are, so
    /// `deep.bamcoverage.options=x` sets `[deep] bamcoverage_options`.
    pub fn apply_override(&mut self, spec: &str) -> Result<()> {
        let invalid = || PipeconfError::InvalidOverride(spec.to_string());

        let (name, raw) = spec.split_once('=').ok_or_else(invalid)?;
        let name = name.trim();
        let (section, rest) = match name.split_once('.') {
            Some((section, rest)) => (section.trim(), rest),
            None => (GENERAL_SECTION, name),
        };
        let parts: Vec<&str> = rest.split('.').map(str::trim).collect();
        if section.is_empty() || parts.iter().any(|p| p.is_empty()) {
            return Err(invalid());
        }
        let key = parts.join("_");
        debug!(%section, %key, value = %raw.trim(), "applying override");
        self.insert(section, &key, ParamValue::from_raw(raw), Origin::Override);
        Ok(())
    }

    /// Every `(section, key)` producing each flattened name, lowest
    /// precedence first.
    ///
    /// Unprefixed general keys rank lowest; section-qualified names rank by
    /// section name length, so `[a_b] c` beats `[a] b_c` for `a_b_c`. Two
    /// sections of equal length can never produce the same name.
    fn producers(&self) -> BTreeMap<String, Vec<(&str, &str, &Entry)>> {
        let mut producers: BTreeMap<String, Vec<(&str, &str, &Entry)>> = BTreeMap::new();

        if let Some((section, general)) = self.sections.get_key_value(GENERAL_SECTION) {
            for (key, entry) in general {
                producers
                    .entry(key.clone())
                    .or_default()
                    .push((section.as_str(), key.as_str(), entry));
            }
        }

        let mut sections: Vec<_> = self.sections.iter().collect();
        sections.sort_by_key(|(name, _)| name.len());
        for (section, entries) in sections {
            for (key, entry) in entries {
                producers
                    .entry(flat_name(section, key))
                    .or_default()
                    .push((section.as_str(), key.as_str(), entry));
            }
        }

        producers
    }

    /// The flat `name -> value` map pipeline statements are rendered from.
    ///
    /// When several parameters produce the same name (for example
    /// `[general] bwa_threads` and `[bwa] threads`), the longest section
    /// prefix wins. See [`ParameterSet::flat_collisions`].
    pub fn flatten(&self) -> BTreeMap<String, ParamValue> {
        self.producers()
            .into_iter()
            .filter_map(|(name, mut found)| found.pop().map(|(_, _, e)| (name, e.value.clone())))
            .collect()
    }

    /// Look up a flattened name.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.resolve(name).map(|(_, _, entry)| entry)
    }

    /// Look up a flattened name and report which section and key it maps to.
    ///
    /// Agrees with [`ParameterSet::flatten`] on which parameter wins.
    pub fn resolve(&self, name: &str) -> Option<(&str, &str, &Entry)> {
        let name = name.to_lowercase();

        let qualified = self
            .sections
            .iter()
            .filter_map(|(section, entries)| {
                let rest = name.strip_prefix(section.as_str())?.strip_prefix('_')?;
                let (key, entry) = entries.get_key_value(rest)?;
                Some((section.as_str(), key.as_str(), entry))
            })
            .max_by_key(|(section, _, _)| section.len());
        if qualified.is_some() {
            return qualified;
        }

        self.sections
            .get_key_value(GENERAL_SECTION)
            .and_then(|(section, entries)| {
                entries
                    .get_key_value(&name)
                    .map(|(key, entry)| (section.as_str(), key.as_str(), entry))
            })
    }

    /// Parameters whose flattened name is also produced by a parameter that
    /// takes precedence over them.
    pub fn flat_collisions(&self) -> Vec<FlatCollision> {
        let mut collisions = Vec::new();
        for (name, mut found) in self.producers() {
            let Some((winner, _, _)) = found.pop() else {
                continue;
            };
            for (section, key, _) in found {
                collisions.push(FlatCollision {
                    name: name.clone(),
                    section: section.to_string(),
                    key: key.to_string(),
                    winner: winner.to_string(),
                });
            }
        }
        collisions
    }

    /// Stable fingerprint of the effective parameters.
    ///
    /// Computed over the sorted flattened `name=value` lines, so two
    /// configurations that resolve to the same values share a digest no
    /// matter which files, formats or key order produced them.
    pub fn digest(&self) -> String {
        let mut hasher = Hasher::new();
        for (name, value) in self.flatten() {
            hasher.update(name.as_bytes());
            hasher.update(b"=");
            hasher.update(value.to_string().as_bytes());
            hasher.update(b"\n");
        }
        hasher.finalize().to_hex().to_string()
    }

    /// Sectioned `name -> value` view without origins, for serialisation.
    pub fn to_value_map(&self) -> BTreeMap<String, BTreeMap<String, ParamValue>> {
        self.sections
            .iter()
            .map(|(section, entries)| {
                let values = entries
                    .iter()
                    .map(|(k, e)| (k.clone(), e.value.clone()))
                    .collect();
                (section.clone(), values)
            })
            .collect()
    }
}

/// Flattened name of `key` in `section`.
pub fn flat_name(section: &str, key: &str) -> String {
    format!("{section}_{key}")
}
