//! Corpus line model and input plumbing shared by the tools.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use bzip2::read::BzDecoder;
use unicode_normalization::{is_nfc, UnicodeNormalization};

use crate::error::{LexError, Result};

/// One corpus record: 3 fields for lemma lists, 4 when the source carries
/// a frequency column. Fields stay untyped text; `pos_tag` may be empty.
#[derive(Debug, PartialEq, Eq)]
pub struct CorpusLine<'a> {
    pub wordform: &'a str,
    pub lemma: &'a str,
    pub pos_tag: &'a str,
    pub frequency: Option<&'a str>,
}

impl<'a> CorpusLine<'a> {
    /// Splits a trimmed line on single tabs. Returns `None` for any field
    /// count other than 3 or 4.
    pub fn parse(line: &'a str) -> Option<Self> {
        let fields: Vec<&str> = line.split('\t').collect();
        match fields.as_slice() {
            &[wordform, lemma, pos_tag] => Some(CorpusLine {
                wordform,
                lemma,
                pos_tag,
                frequency: None,
            }),
            &[wordform, lemma, pos_tag, frequency] => Some(CorpusLine {
                wordform,
                lemma,
                pos_tag,
                frequency: Some(frequency),
            }),
            _ => None,
        }
    }
}

/// Line counters reported at run end: every line read vs. lines that made
/// it through the stage.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunStats {
    pub total: u64,
    pub handled: u64,
}

impl RunStats {
    /// True once the optional first-N-lines cap has been consumed.
    pub fn reached(&self, limit: Option<u64>) -> bool {
        matches!(limit, Some(n) if self.total >= n)
    }
}

/// Opens a corpus file as a buffered reader, decompressing transparently
/// when the path ends in `.bz2`.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|source| LexError::InputOpen {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(if path.to_string_lossy().ends_with(".bz2") {
        Box::new(BufReader::with_capacity(256 * 1024, BzDecoder::new(file)))
    } else {
        Box::new(BufReader::with_capacity(256 * 1024, file))
    })
}

/// NFC-normalizes a line unless it already is normalized. The tag patterns
/// contain precomposed characters, so decomposed corpus dumps must be
/// folded before matching.
pub fn nfc_line(line: &str) -> Cow<'_, str> {
    if is_nfc(line) {
        Cow::Borrowed(line)
    } else {
        Cow::Owned(line.nfc().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_field_line() {
        let parsed = CorpusLine::parse("kuća\tkuća\tNcfsn").unwrap();
        assert_eq!(parsed.wordform, "kuća");
        assert_eq!(parsed.lemma, "kuća");
        assert_eq!(parsed.pos_tag, "Ncfsn");
        assert_eq!(parsed.frequency, None);
    }

    #[test]
    fn parses_four_field_line() {
        let parsed = CorpusLine::parse("kuće\tkuća\tNcfpn\t42").unwrap();
        assert_eq!(parsed.frequency, Some("42"));
    }

    #[test]
    fn rejects_other_field_counts() {
        assert_eq!(CorpusLine::parse("kuća\tkuća"), None);
        assert_eq!(CorpusLine::parse("a\tb\tc\td\te"), None);
    }

    #[test]
    fn empty_pos_tag_is_preserved() {
        let parsed = CorpusLine::parse("kuća\tkuća\t").unwrap();
        assert_eq!(parsed.pos_tag, "");
    }

    #[test]
    fn limit_is_unbounded_when_absent() {
        let stats = RunStats {
            total: 1_000_000,
            handled: 0,
        };
        assert!(!stats.reached(None));
        assert!(stats.reached(Some(10)));
    }

    #[test]
    fn nfc_line_folds_decomposed_input() {
        // "â" as 'a' + combining circumflex
        let decomposed = "a\u{0302}";
        assert_eq!(nfc_line(decomposed), "â");
        assert!(matches!(nfc_line("kuća"), Cow::Borrowed(_)));
    }
}
