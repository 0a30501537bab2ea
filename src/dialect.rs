//! Dialect label propagation over hand-annotated wordform/lemma lists.
//!
//! Input files group a dialect label with one exemplar pair, then list
//! further pairs that share the dialect until a blank line or a new label
//! appears. The scanner amortizes the label across such a run and emits
//! one update directive per labeled pair.

/// The two dialect classes of Serbian being labeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Ekavian,
    Jekavian,
}

impl Dialect {
    /// Recognizes a label token, case- and script-insensitively: both the
    /// Latin and Cyrillic single-letter markers are accepted.
    pub fn from_label(token: &str) -> Option<Dialect> {
        match token {
            "e" | "E" | "е" | "Е" => Some(Dialect::Ekavian),
            "i" | "I" | "и" | "И" => Some(Dialect::Jekavian),
            _ => None,
        }
    }

    /// Single-letter code stored in the lexicon database.
    pub fn code(self) -> &'static str {
        match self {
            Dialect::Ekavian => "e",
            Dialect::Jekavian => "i",
        }
    }
}

/// A `(dialect, wordform, lemma)` triple destined for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateDirective {
    pub dialect: Dialect,
    pub wordform: String,
    pub lemma: String,
}

impl UpdateDirective {
    /// Renders the directive as the store-mutation statement.
    pub fn to_sql(&self) -> String {
        format!(
            "UPDATE words SET dialect='{}' WHERE wordform='{}' AND lemma='{}';",
            self.dialect.code(),
            escape(&self.wordform),
            escape(&self.lemma)
        )
    }
}

fn escape(value: &str) -> String {
    value.replace('\'', "''")
}

/// Result of pushing one line through the scanner.
#[derive(Debug, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A labeled pair: write the directive.
    Directive(UpdateDirective),
    /// Nothing to emit for this line.
    Ignored,
    /// Unrecognized line shape; the caller logs and moves on.
    Malformed,
}

/// The dialect state machine. State is the last-seen label, cleared by a
/// blank line or by a 3-token line without a recognized label.
#[derive(Debug, Default)]
pub struct DialectScanner {
    current: Option<Dialect>,
}

impl DialectScanner {
    pub fn new() -> Self {
        DialectScanner::default()
    }

    pub fn current(&self) -> Option<Dialect> {
        self.current
    }

    /// Consumes one input line and advances the state machine.
    pub fn scan(&mut self, line: &str) -> ScanOutcome {
        let line = line.trim();
        if line.is_empty() {
            self.current = None;
            return ScanOutcome::Ignored;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            &[label, wordform, lemma] => match Dialect::from_label(label) {
                Some(dialect) => {
                    self.current = Some(dialect);
                    ScanOutcome::Directive(UpdateDirective {
                        dialect,
                        wordform: wordform.to_string(),
                        lemma: lemma.to_string(),
                    })
                }
                None => {
                    // This shape carries no usable pair without a label.
                    self.current = None;
                    ScanOutcome::Ignored
                }
            },
            &[wordform, lemma] => match self.current {
                Some(dialect) => ScanOutcome::Directive(UpdateDirective {
                    dialect,
                    wordform: wordform.to_string(),
                    lemma: lemma.to_string(),
                }),
                None => ScanOutcome::Ignored,
            },
            _ => ScanOutcome::Malformed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directive(dialect: Dialect, wordform: &str, lemma: &str) -> ScanOutcome {
        ScanOutcome::Directive(UpdateDirective {
            dialect,
            wordform: wordform.to_string(),
            lemma: lemma.to_string(),
        })
    }

    #[test]
    fn label_propagates_until_blank_line() {
        let mut scanner = DialectScanner::new();
        assert_eq!(
            scanner.scan("e tok1 tok2"),
            directive(Dialect::Ekavian, "tok1", "tok2")
        );
        assert_eq!(
            scanner.scan("tok3 tok4"),
            directive(Dialect::Ekavian, "tok3", "tok4")
        );
        assert_eq!(scanner.scan(""), ScanOutcome::Ignored);
        // Blank line reset: the pair after it has no dialect to inherit.
        assert_eq!(scanner.scan("tok5 tok6"), ScanOutcome::Ignored);
    }

    #[test]
    fn all_eight_labels_are_recognized() {
        for label in ["e", "E", "е", "Е"] {
            assert_eq!(Dialect::from_label(label), Some(Dialect::Ekavian));
        }
        for label in ["i", "I", "и", "И"] {
            assert_eq!(Dialect::from_label(label), Some(Dialect::Jekavian));
        }
        assert_eq!(Dialect::from_label("j"), None);
    }

    #[test]
    fn unrecognized_label_resets_state_without_emitting() {
        let mut scanner = DialectScanner::new();
        scanner.scan("и млијеко млеко");
        assert_eq!(scanner.current(), Some(Dialect::Jekavian));
        assert_eq!(scanner.scan("x tok1 tok2"), ScanOutcome::Ignored);
        assert_eq!(scanner.current(), None);
        assert_eq!(scanner.scan("tok3 tok4"), ScanOutcome::Ignored);
    }

    #[test]
    fn label_change_switches_dialect_mid_file() {
        let mut scanner = DialectScanner::new();
        scanner.scan("e lepo lep");
        assert_eq!(
            scanner.scan("i лијепо лијеп"),
            directive(Dialect::Jekavian, "лијепо", "лијеп")
        );
        assert_eq!(
            scanner.scan("лијепа лијеп"),
            directive(Dialect::Jekavian, "лијепа", "лијеп")
        );
    }

    #[test]
    fn odd_token_counts_are_malformed_and_keep_state() {
        let mut scanner = DialectScanner::new();
        scanner.scan("e tok1 tok2");
        assert_eq!(scanner.scan("one two three four"), ScanOutcome::Malformed);
        assert_eq!(scanner.current(), Some(Dialect::Ekavian));
        assert_eq!(
            scanner.scan("tok3 tok4"),
            directive(Dialect::Ekavian, "tok3", "tok4")
        );
    }

    #[test]
    fn directive_renders_update_statement() {
        let d = UpdateDirective {
            dialect: Dialect::Ekavian,
            wordform: "mleko".to_string(),
            lemma: "mleko".to_string(),
        };
        assert_eq!(
            d.to_sql(),
            "UPDATE words SET dialect='e' WHERE wordform='mleko' AND lemma='mleko';"
        );
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let d = UpdateDirective {
            dialect: Dialect::Jekavian,
            wordform: "d'jete".to_string(),
            lemma: "dijete".to_string(),
        };
        assert!(d.to_sql().contains("wordform='d''jete'"));
    }

    #[test]
    fn single_token_line_is_malformed() {
        let mut scanner = DialectScanner::new();
        assert_eq!(scanner.scan("solo"), ScanOutcome::Malformed);
    }
}
