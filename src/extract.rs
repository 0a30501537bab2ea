//! PoS tag extraction from raw corpus lines.
//!
//! Two line shapes occur in the source material: three-field lemma lists
//! (`lex`) and the four-field web-corpus dump (`wac`). Both end in an
//! optional PoS tag; the tag is bound to the named capture group `pos` so
//! neither caller has to care how many fields precede it.

use std::collections::HashSet;

use clap::ValueEnum;
use lazy_static::lazy_static;
use regex::Regex;

// Serbian wordform alphabet as it appears in the dumps: both cases of the
// Latin diacritics plus the stray ligatures and circumflexed vowels the
// tokenizer lets through.
const WORD: &str = "[a-zčćžšđâîôﬂǌüA-ZČĆŽŠĐ0-9_-]+";
const PUNCT_OR_WORD: &str = r#"(?:[!"'(),.:;?-]|[a-zčćžšđâîôﬂǌüA-ZČĆŽŠĐ0-9_-]+)"#;
const POS: &str = r"(?P<pos>[a-zA-Z0-9-]+)?";

lazy_static! {
    static ref LEX_PATTERN: Regex =
        Regex::new(&format!(r"^{PUNCT_OR_WORD}\s+{PUNCT_OR_WORD}\s+{POS}")).unwrap();
    static ref WAC_PATTERN: Regex =
        Regex::new(&format!(r"^{WORD}\s+{PUNCT_OR_WORD}\s+{PUNCT_OR_WORD}\s+{POS}")).unwrap();
}

/// The fixed pattern registry, selectable from the command line. clap
/// rejects identifiers outside this set before any processing starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PatternKind {
    /// Three-field lemma list: token, token-or-punctuation, tag.
    Lex,
    /// Four-field web corpus dump: token, token, token-or-punctuation, tag.
    Wac,
}

impl PatternKind {
    fn regex(self) -> &'static Regex {
        match self {
            PatternKind::Lex => &LEX_PATTERN,
            PatternKind::Wac => &WAC_PATTERN,
        }
    }
}

/// Extracts the PoS token from a trimmed line, anchored at line start.
/// Returns `None` when the line does not match the selected pattern or the
/// trailing tag field is absent.
pub fn extract(line: &str, kind: PatternKind) -> Option<&str> {
    kind.regex()
        .captures(line)?
        .name("pos")
        .map(|m| m.as_str())
        .filter(|tag| !tag.is_empty())
}

/// Ordered-unique tag accumulator: first-occurrence order is preserved and
/// duplicates are dropped.
#[derive(Debug, Default)]
pub struct TagCollector {
    seen: HashSet<String>,
    order: Vec<String>,
}

impl TagCollector {
    /// Records a tag; returns true on first occurrence.
    pub fn insert(&mut self, tag: &str) -> bool {
        if self.seen.contains(tag) {
            return false;
        }
        self.seen.insert(tag.to_string());
        self.order.push(tag.to_string());
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_shape_yields_third_field() {
        assert_eq!(extract("kuća kuća Ncfsn", PatternKind::Lex), Some("Ncfsn"));
    }

    #[test]
    fn lex_shape_accepts_punctuation_token() {
        assert_eq!(extract(", , PUNCT", PatternKind::Lex), Some("PUNCT"));
    }

    #[test]
    fn wac_shape_yields_fourth_field() {
        assert_eq!(
            extract("pas pseto , Ncmsn", PatternKind::Wac),
            Some("Ncmsn")
        );
    }

    #[test]
    fn wac_shape_rejects_leading_punctuation() {
        // The wac shape requires a word in the first field.
        assert_eq!(extract(", pseto pas Ncmsn", PatternKind::Wac), None);
    }

    #[test]
    fn match_is_anchored_at_line_start() {
        assert_eq!(extract("%% kuća kuća Ncfsn", PatternKind::Lex), None);
    }

    #[test]
    fn missing_tag_field_is_no_match() {
        assert_eq!(extract("kuća kuća", PatternKind::Lex), None);
        assert_eq!(extract("kuća kuća ", PatternKind::Lex), None);
    }

    #[test]
    fn diacritics_in_wordforms_match() {
        assert_eq!(
            extract("čovek čovek Ncmsn", PatternKind::Lex),
            Some("Ncmsn")
        );
        assert_eq!(
            extract("džíp džíp Ncmsn", PatternKind::Lex),
            None,
            "í is outside the wordform alphabet"
        );
    }

    #[test]
    fn collector_preserves_first_occurrence_order() {
        let mut tags = TagCollector::default();
        assert!(tags.insert("Ncfsn"));
        assert!(tags.insert("Vmp"));
        assert!(!tags.insert("Ncfsn"));
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["Ncfsn", "Vmp"]);
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn collector_insert_is_idempotent() {
        let mut tags = TagCollector::default();
        tags.insert("Afp");
        tags.insert("Afp");
        tags.insert("Afp");
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["Afp"]);
    }
}
