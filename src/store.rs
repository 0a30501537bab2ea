//! The lexicon store capability: existence checks and inserts.
//!
//! The store's schema is not this crate's business; the SQL text for both
//! operations comes from the run configuration and only its bind-parameter
//! shape is fixed here. `exists` passes the tag as `<tag>%` so a coarse
//! query tag matches finer-grained stored entries.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::debug;

use crate::config::DbConfig;
use crate::error::Result;

#[async_trait]
pub trait LexiconStore {
    /// Does `(wordform, lemma, tag-prefix)` already exist in the store?
    async fn exists(&self, wordform: &str, lemma: &str, tag_prefix: &str) -> Result<bool>;

    /// Persists a new entry with its corpus frequency.
    async fn insert(&self, wordform: &str, lemma: &str, tag: &str, frequency: &str) -> Result<()>;
}

/// PostgreSQL-backed store. One connection per run, opened once.
pub struct PgStore {
    pool: PgPool,
    word_exists: String,
    word_insert: String,
}

impl PgStore {
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(&config.url)
            .await?;
        Ok(PgStore {
            pool,
            word_exists: config.word_exists.clone(),
            word_insert: config.word_insert.clone(),
        })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl LexiconStore for PgStore {
    async fn exists(&self, wordform: &str, lemma: &str, tag_prefix: &str) -> Result<bool> {
        let pattern = format!("{tag_prefix}%");
        let row = sqlx::query(&self.word_exists)
            .bind(wordform)
            .bind(lemma)
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await?;
        let found: bool = row.try_get(0)?;
        debug!(wordform, lemma, tag_prefix, found, "existence check");
        Ok(found)
    }

    async fn insert(&self, wordform: &str, lemma: &str, tag: &str, frequency: &str) -> Result<()> {
        sqlx::query(&self.word_insert)
            .bind(wordform)
            .bind(lemma)
            .bind(tag)
            .bind(frequency)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(Debug)]
struct StoredEntry {
    wordform: String,
    lemma: String,
    tag: String,
}

/// In-memory store used by tests and offline runs. Counts lookups so the
/// no-lookup-for-filtered-lines property can be asserted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<StoredEntry>>,
    lookups: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Seeds the store with `(wordform, lemma, tag)` triples.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str, &'a str)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(wordform, lemma, tag)| StoredEntry {
                wordform: wordform.to_string(),
                lemma: lemma.to_string(),
                tag: tag.to_string(),
            })
            .collect();
        MemoryStore {
            entries: Mutex::new(entries),
            lookups: AtomicU64::new(0),
        }
    }

    pub fn lookup_count(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("entries lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LexiconStore for MemoryStore {
    async fn exists(&self, wordform: &str, lemma: &str, tag_prefix: &str) -> Result<bool> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        let entries = self.entries.lock().expect("entries lock poisoned");
        Ok(entries.iter().any(|entry| {
            entry.wordform == wordform && entry.lemma == lemma && entry.tag.starts_with(tag_prefix)
        }))
    }

    async fn insert(&self, wordform: &str, lemma: &str, tag: &str, _frequency: &str) -> Result<()> {
        let mut entries = self.entries.lock().expect("entries lock poisoned");
        entries.push(StoredEntry {
            wordform: wordform.to_string(),
            lemma: lemma.to_string(),
            tag: tag.to_string(),
        });
        Ok(())
    }
}
