//! # Kousei Core
//!
//! The heart of the Kousei spell-checking engine. Provides lexicon-based
//! and masked-LM-assisted error detection, homophone resolution, text
//! statistics, and structured report types.
//!
//! ## Quick Start
//!
//! ```rust
//! use kousei_core::checker::{rules_only, LexiconData};
//!
//! let checker = rules_only(LexiconData::default()).unwrap();
//! let report = checker.check("She went to teh store.").unwrap();
//!
//! assert_eq!(report.corrected, "She went to the store.");
//! assert_eq!(report.corrections.len(), 1);
//! ```
pub mod checker;
pub mod error;
pub mod scoring;
pub mod stats;
pub mod types;

// Re-export primary API
pub use checker::{
    Checker, CheckerConfig, ContextRule, HomophoneAnalyzer, HomophoneGroup, Lexicon, LexiconData,
    MaskedLmRanker, Misspelling, WordTokenizer,
};
pub use error::{CheckError, Result};
pub use scoring::ConfidenceProfile;
pub use stats::TextStats;
pub use types::{Candidate, CheckMode, CheckReport, Correction, CorrectionKind, DetectedIssue};
