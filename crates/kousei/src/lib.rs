//! # Kousei
//!
//! Context-aware spell checking for English text: a lexicon with
//! edit-distance suggestions, homophone resolution via stored context
//! rules, and masked-LM candidate ranking, served over a web API with a
//! dashboard and a CLI.
//!
//! This crate re-exports the public API of the workspace:
//! - [`kousei_core`]: the checking engine
//! - [`kousei_store`]: the SQLite lexicon store
//! - [`kousei_server`]: the web service
//!
//! ## Quick Start
//!
//! ```rust
//! use kousei::{rules_only, LexiconStore};
//!
//! let store = LexiconStore::open_in_memory().unwrap();
//! store.init_schema().unwrap();
//! store.seed_defaults().unwrap();
//!
//! let checker = rules_only(store.lexicon_data().unwrap()).unwrap();
//! let report = checker.check("Their going to the store.").unwrap();
//! assert_eq!(report.corrected, "They're going to the store.");
//! ```

pub use kousei_core::checker::rules_only;
pub use kousei_core::{
    CheckError, CheckMode, CheckReport, Checker, CheckerConfig, Correction, CorrectionKind,
    DetectedIssue, LexiconData, TextStats,
};
pub use kousei_server::AppConfig;
pub use kousei_store::{LexiconStore, NewCheck, StoreStats};
