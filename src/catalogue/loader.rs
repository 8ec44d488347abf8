//! Catalogue loading
//!
//! A catalogue file is a YAML sequence of `{name, method, url, body?}`
//! entries. A sequence rather than a mapping keeps repeated names visible
//! to the loader instead of losing them in the parser.

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use super::descriptor::{Method, RequestBody, RequestDescriptor};
use crate::errors::{ApiExamplesError, Result};
use crate::fs::sanitize_filename;

/// Catalogue compiled into the binary
const BUILTIN_CATALOGUE: &str = include_str!("../../catalogue/taiga.yaml");

#[derive(Debug, Deserialize)]
struct CatalogueEntry {
    name: String,
    method: Method,
    url: String,
    #[serde(default)]
    body: Option<RequestBody>,
}

/// A name defined more than once
#[derive(Debug, Clone, PartialEq)]
pub struct Duplicate {
    pub name: String,
    /// The definition that was replaced
    pub replaced: RequestDescriptor,
}

/// Two distinct names that share a fixture file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StemCollision {
    pub stem: String,
    /// Name that claimed the stem first
    pub existing: String,
    pub name: String,
}

/// Ordered set of named request descriptors
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    entries: IndexMap<String, RequestDescriptor>,
    duplicates: Vec<Duplicate>,
    /// fixture stem -> first name using it
    stems: HashMap<String, String>,
    stem_collisions: Vec<StemCollision>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalogue shipped with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_CATALOGUE)
    }

    /// Load a catalogue file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ApiExamplesError::Catalogue(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse a catalogue from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let mut catalogue = Self::new();

        let has_content = content
            .lines()
            .map(str::trim)
            .any(|line| !line.is_empty() && !line.starts_with('#'));
        if !has_content {
            return Ok(catalogue);
        }

        let raw: Option<Vec<CatalogueEntry>> = serde_yaml::from_str(content)?;

        for (idx, entry) in raw.unwrap_or_default().into_iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(ApiExamplesError::Catalogue(format!(
                    "Entry {} has an empty name",
                    idx + 1
                )));
            }

            let descriptor = RequestDescriptor {
                method: entry.method,
                url: entry.url,
                body: entry.body,
            };
            catalogue.insert(&entry.name, descriptor);
        }

        for name in catalogue.malformed() {
            if let Some(desc) = catalogue.get(name) {
                warn!(name = %name, method = %desc.method, "Catalogue entry has no valid HTTP method");
            }
        }

        debug!(
            entries = catalogue.len(),
            duplicates = catalogue.duplicates.len(),
            "Catalogue loaded"
        );

        Ok(catalogue)
    }

    /// Insert an entry.
    ///
    /// A repeated name replaces the earlier request but keeps its position.
    /// The replaced descriptor is returned and recorded in [`Catalogue::duplicates`].
    pub fn insert(&mut self, name: &str, descriptor: RequestDescriptor) -> Option<RequestDescriptor> {
        if !self.entries.contains_key(name) {
            self.claim_stem(name);
        }

        let replaced = self.entries.insert(name.to_string(), descriptor)?;

        warn!(name = %name, "Catalogue entry defined more than once, keeping the last definition");
        self.duplicates.push(Duplicate {
            name: name.to_string(),
            replaced: replaced.clone(),
        });

        Some(replaced)
    }

    /// Record the fixture stem of a new name, reporting clashes
    fn claim_stem(&mut self, name: &str) {
        let stem = sanitize_filename(name);
        match self.stems.get(&stem) {
            Some(existing) => {
                warn!(
                    name = %name,
                    existing = %existing,
                    stem = %stem,
                    "Catalogue entries share a fixture file name, the later one overwrites"
                );
                self.stem_collisions.push(StemCollision {
                    stem,
                    existing: existing.clone(),
                    name: name.to_string(),
                });
            }
            None => {
                self.stems.insert(stem, name.to_string());
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&RequestDescriptor> {
        self.entries.get(name)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RequestDescriptor)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names that were defined more than once, with the definitions they lost
    pub fn duplicates(&self) -> &[Duplicate] {
        &self.duplicates
    }

    /// Distinct names that map to the same fixture file stem
    pub fn stem_collisions(&self) -> &[StemCollision] {
        &self.stem_collisions
    }

    /// Names whose method is not an HTTP verb
    pub fn malformed(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, desc)| desc.method.is_malformed())
            .map(|(name, _)| name)
            .collect()
    }

    /// Keep only the entries whose name matches `filter`
    pub fn retain_matching(&mut self, filter: &Regex) {
        self.entries.retain(|name, _| filter.is_match(name));
        self.stems.retain(|_, name| filter.is_match(name));
    }
}

/// Format the catalogue as an aligned listing (`--list`)
pub fn format_catalogue_list(catalogue: &Catalogue) -> String {
    let width = catalogue.names().map(str::len).max().unwrap_or(0);
    let mut output = String::new();

    for (name, desc) in catalogue.iter() {
        let marker = if desc.has_body() { " +body" } else { "" };
        output.push_str(&format!(
            "{:<width$}  {:<14} {}{}\n",
            name,
            desc.method.as_str(),
            desc.url,
            marker,
            width = width
        ));
    }

    output
}
