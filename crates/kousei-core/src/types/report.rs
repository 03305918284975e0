use serde::{Deserialize, Serialize};

use super::{CheckMode, Correction, DetectedIssue};

/// The primary output of the Kousei checking engine.
///
/// Contains the corrected text, every issue the detector flagged, the
/// corrections that were actually applied, and an overall confidence score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckReport {
    /// Original input text.
    pub input: String,

    /// Input with all accepted corrections applied.
    pub corrected: String,

    /// Everything the detector flagged, corrected or not.
    pub issues: Vec<DetectedIssue>,

    /// Corrections that were applied to `corrected`.
    pub corrections: Vec<Correction>,

    /// Overall confidence in `[0.0, 1.0]`; 1.0 when nothing was corrected.
    pub confidence: f32,

    /// Which engine produced this report.
    pub mode: CheckMode,
}

impl CheckReport {
    /// Creates an empty report for the given input.
    #[must_use]
    pub fn new(input: impl Into<String>, mode: CheckMode) -> Self {
        let input = input.into();
        Self {
            corrected: input.clone(),
            input,
            issues: Vec::new(),
            corrections: Vec::new(),
            confidence: 1.0,
            mode,
        }
    }

    /// Returns `true` if any correction was applied.
    #[must_use]
    pub fn has_corrections(&self) -> bool {
        !self.corrections.is_empty()
    }

    /// Returns `true` if the corrected text differs from the input.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.input != self.corrected
    }
}

impl std::fmt::Display for CheckReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CheckReport({} correction(s), conf={:.2}, mode={})",
            self.corrections.len(),
            self.confidence,
            self.mode
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CorrectionKind;

    #[test]
    fn new_report_is_clean() {
        let report = CheckReport::new("some text", CheckMode::Rules);
        assert!(!report.has_corrections());
        assert!(!report.is_changed());
        assert_eq!(report.confidence, 1.0);
        assert_eq!(report.corrected, "some text");
    }

    #[test]
    fn report_display() {
        let mut report = CheckReport::new("teh", CheckMode::Auto);
        report.corrections.push(Correction {
            original: "teh".into(),
            corrected: "the".into(),
            kind: CorrectionKind::Spelling,
            position: 0,
            confidence: 0.9,
        });
        report.confidence = 0.9;
        let display = report.to_string();
        assert!(display.contains("1 correction(s)"));
        assert!(display.contains("0.90"));
        assert!(display.contains("auto"));
    }

    #[test]
    fn report_serialization_roundtrip() {
        let mut report = CheckReport::new("Their going home.", CheckMode::Auto);
        report.corrected = "They're going home.".into();
        report.corrections.push(Correction {
            original: "Their".into(),
            corrected: "They're".into(),
            kind: CorrectionKind::Homophone,
            position: 0,
            confidence: 0.8,
        });
        report.confidence = 0.8;

        let json = serde_json::to_string_pretty(&report).unwrap();
        let back: CheckReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }
}
