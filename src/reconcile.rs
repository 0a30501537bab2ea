//! Insert-or-skip decisions for corpus lines against the lexicon store.

use crate::corpus::CorpusLine;
use crate::error::Result;
use crate::store::LexiconStore;

/// "Line contains any letter of the exclusion alphabet", checked
/// case-insensitively. Lines carrying these marker letters (foreign
/// alphabet or placeholder tokens) are routed aside for manual review
/// instead of being reconciled.
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    letters: Vec<char>,
}

impl ExclusionFilter {
    pub fn new(alphabet: &str) -> Self {
        ExclusionFilter {
            letters: alphabet.chars().map(|c| c.to_ascii_lowercase()).collect(),
        }
    }

    pub fn matches(&self, line: &str) -> bool {
        line.chars()
            .any(|c| self.letters.contains(&c.to_ascii_lowercase()))
    }
}

impl Default for ExclusionFilter {
    fn default() -> Self {
        ExclusionFilter::new("wyx")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Field count is not exactly 4; dropped entirely.
    Malformed,
    /// The store already has the triple; nothing to do.
    AlreadyPresent,
}

/// What to do with one corpus line.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Skip(SkipReason),
    /// Write the raw line verbatim to the skipped-lines side channel.
    ForwardFiltered,
    /// The triple is absent: insert with all four original fields.
    Insert {
        wordform: String,
        lemma: String,
        tag: String,
        frequency: String,
    },
}

/// Per-run reconciliation state: the store handle and the filter.
pub struct Reconciler<S> {
    store: S,
    filter: ExclusionFilter,
}

impl<S: LexiconStore> Reconciler<S> {
    pub fn new(store: S, filter: ExclusionFilter) -> Self {
        Reconciler { store, filter }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decides the action for one raw line. Filtered lines are decided
    /// before any store lookup happens.
    pub async fn reconcile(&self, line: &str) -> Result<Action> {
        let parsed = CorpusLine::parse(line);
        let Some(CorpusLine {
            wordform,
            lemma,
            pos_tag,
            frequency: Some(frequency),
        }) = parsed
        else {
            return Ok(Action::Skip(SkipReason::Malformed));
        };
        if self.filter.matches(line) {
            return Ok(Action::ForwardFiltered);
        }
        if self.store.exists(wordform, lemma, pos_tag).await? {
            Ok(Action::Skip(SkipReason::AlreadyPresent))
        } else {
            Ok(Action::Insert {
                wordform: wordform.to_string(),
                lemma: lemma.to_string(),
                tag: pos_tag.to_string(),
                frequency: frequency.to_string(),
            })
        }
    }
}
