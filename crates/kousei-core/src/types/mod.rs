//! Structured output types of the checking engine.

mod correction;
mod report;

pub use correction::{Candidate, Correction, CorrectionKind, DetectedIssue};
pub use report::CheckReport;

use serde::{Deserialize, Serialize};

/// Which engine produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckMode {
    /// Masked-LM ranking with rule fallback.
    Auto,
    /// Masked-LM ranking only.
    Neural,
    /// Lexicon + homophone rules only.
    Rules,
}

impl std::fmt::Display for CheckMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckMode::Auto => write!(f, "auto"),
            CheckMode::Neural => write!(f, "neural"),
            CheckMode::Rules => write!(f, "rules"),
        }
    }
}
