//! Biblio: the anchor table of a compilation run
//!
//!     Maps anchor ids to URL fragments. Local anchors map to `#id`; entries seeded from external
//!     reference tables map to absolute URLs, so references to other specs resolve too.
//!
//!     A Biblio is created per run, seeded, filled by the anchor pass and then handed back
//!     read-only. Seeded entries are never overwritten, and the first local writer of an id
//!     wins.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// External reference tables: site URL, then local id to path suffix
///
/// ```json
/// { "https://spec.example.org/": { "sec-Types": "#sec-Types" } }
/// ```
pub type ExternalBiblio = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Biblio {
    entries: BTreeMap<String, String>,
}

impl Biblio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from external tables; each entry resolves to `site + suffix`
    pub fn seeded(external: &ExternalBiblio) -> Self {
        let entries = external
            .iter()
            .flat_map(|(site, refs)| {
                refs.iter()
                    .map(move |(id, suffix)| (id.clone(), format!("{}{}", site, suffix)))
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Whether the id points outside the document
    pub fn is_external(&self, id: &str) -> bool {
        self.get(id).is_some_and(|url| !url.starts_with('#'))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register `id -> #id` unless the id is already taken; returns whether it was inserted
    pub(crate) fn insert_local(&mut self, id: &str) -> bool {
        if self.entries.contains_key(id) {
            return false;
        }
        self.entries.insert(id.to_string(), format!("#{}", id));
        true
    }
}
