//! # Kousei Store
//!
//! SQLite-backed storage for the spell checker: known misspellings,
//! homophone groups, context rules, the imported word list, and check
//! history. The store is the single source the engine is hydrated from
//! at startup.
//!
//! ## Quick Start
//!
//! ```rust
//! use kousei_store::LexiconStore;
//!
//! let store = LexiconStore::open_in_memory().unwrap();
//! store.init_schema().unwrap();
//! store.seed_defaults().unwrap();
//!
//! let data = store.lexicon_data().unwrap();
//! assert_eq!(data.misspellings.len(), 5);
//! ```
pub mod error;
pub mod models;
pub mod store;

// Re-export primary API
pub use error::{Result, StoreError};
pub use models::{CheckRecord, NewCheck, StoreStats};
pub use store::LexiconStore;
