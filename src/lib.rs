//! Corpus-annotation tools for the Serbian word-form lexicon.
//!
//! The library holds the decision logic shared by the four command-line
//! tools: regex-based PoS tag extraction (`extract`), translation of PoS
//! tags into the LT taxonomy (`translate`), dialect label propagation
//! (`dialect`) and reconciliation of corpus lines against the lexicon
//! database (`reconcile` / `store`). Each stage owns its state explicitly
//! so a single line can be pushed through it in isolation.

pub mod config;
pub mod corpus;
pub mod dialect;
pub mod error;
pub mod extract;
pub mod reconcile;
pub mod store;
pub mod translate;

pub use error::{LexError, Result};
