//! Run configuration for the reconciliation tool.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::{LexError, Result};

/// Configuration for a reconciliation run, read from a YAML file. The SQL
/// statements live here because the store's schema is deployment-specific;
/// `word_exists` must return a boolean first column and both statements
/// take their parameters positionally.
#[derive(Debug, Deserialize)]
pub struct ReconcileConfig {
    pub database: DbConfig,
    /// Letters whose presence anywhere on a line excludes it from
    /// reconciliation, case-insensitively.
    #[serde(default = "default_exclusion_letters")]
    pub exclusion_letters: String,
}

#[derive(Debug, Deserialize)]
pub struct DbConfig {
    pub url: String,
    pub word_exists: String,
    pub word_insert: String,
}

fn default_exclusion_letters() -> String {
    "wyx".to_string()
}

impl ReconcileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| LexError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_yaml::from_reader(BufReader::new(file))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
database:
  url: postgres://corpus@localhost/words
  word_exists: SELECT EXISTS(SELECT 1 FROM words WHERE wordform = $1 AND lemma = $2 AND tag LIKE $3)
  word_insert: INSERT INTO words (wordform, lemma, tag, frequency) VALUES ($1, $2, $3, $4)
";

    #[test]
    fn exclusion_letters_default_when_absent() {
        let config: ReconcileConfig = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(config.exclusion_letters, "wyx");
        assert!(config.database.url.starts_with("postgres://"));
    }

    #[test]
    fn exclusion_letters_can_be_overridden() {
        let yaml = format!("{SAMPLE}exclusion_letters: qz\n");
        let config: ReconcileConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.exclusion_letters, "qz");
    }

    #[test]
    fn load_reports_missing_file_as_config_error() {
        let err = ReconcileConfig::load(Path::new("/nonexistent/csv2pg.yaml")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn load_reads_a_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{SAMPLE}").unwrap();
        let config = ReconcileConfig::load(file.path()).unwrap();
        assert!(config.database.word_exists.contains("LIKE"));
    }
}
