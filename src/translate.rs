//! Translation of source PoS tags into the LT composite taxonomy.
//!
//! The mapping table is external data: a YAML file keyed by source tag,
//! each entry listing the LT feature codes for that tag. A successful
//! translation joins the codes with the caller's separator and folds each
//! code into the run-wide distinct-tag set.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::error::{LexError, Result};

/// Marker the mapping table embeds in entries it flags as unsupported, as
/// opposed to entries it simply does not have.
pub const ERROR_SENTINEL: &str = "ERROR";

/// The external tag-mapping table.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct TagMap {
    map: HashMap<String, Vec<String>>,
}

impl TagMap {
    pub fn from_yaml(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| LexError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_yaml::from_reader(BufReader::new(file))?)
    }

    /// Looks up a source tag; `None` is the explicit not-found case every
    /// caller has to handle.
    pub fn lookup(&self, tag: &str, separator: char) -> Option<String> {
        self.map
            .get(tag)
            .map(|codes| codes.join(&separator.to_string()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranslateError {
    #[error("no LT tag mapping for PoS tag '{0}'")]
    MissingMapping(String),

    #[error("mapping table flags PoS tag '{tag}' as unsupported: {flagged}")]
    Unsupported { tag: String, flagged: String },

    #[error("mapping for PoS tag '{0}' is empty")]
    EmptyMapping(String),
}

/// Distinct LT feature codes seen over a run. Insertion is idempotent; the
/// final report is sorted.
#[derive(Debug, Default)]
pub struct DistinctTags {
    seen: std::collections::HashSet<String>,
}

impl DistinctTags {
    pub fn record(&mut self, composite: &str, separator: char) {
        for code in composite.split(separator) {
            if !code.is_empty() {
                self.seen.insert(code.to_string());
            }
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.seen.contains(code)
    }

    pub fn sorted(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.seen.iter().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Per-run translation state: the mapping table plus the accumulated
/// distinct-tag set.
pub struct Translator<'m> {
    map: &'m TagMap,
    distinct: DistinctTags,
}

impl<'m> Translator<'m> {
    pub fn new(map: &'m TagMap) -> Self {
        Translator {
            map,
            distinct: DistinctTags::default(),
        }
    }

    /// Translates one source tag. Missing, flagged and empty mappings each
    /// come back as their own error so the caller can log them apart; only
    /// successful translations feed the distinct-tag set.
    pub fn translate(
        &mut self,
        tag: &str,
        separator: char,
    ) -> std::result::Result<String, TranslateError> {
        let lt_tag = self
            .map
            .lookup(tag, separator)
            .ok_or_else(|| TranslateError::MissingMapping(tag.to_string()))?;
        if lt_tag.contains(ERROR_SENTINEL) {
            return Err(TranslateError::Unsupported {
                tag: tag.to_string(),
                flagged: lt_tag,
            });
        }
        if lt_tag.is_empty() {
            return Err(TranslateError::EmptyMapping(tag.to_string()));
        }
        self.distinct.record(&lt_tag, separator);
        Ok(lt_tag)
    }

    pub fn distinct(&self) -> &DistinctTags {
        &self.distinct
    }
}
