use serde::{Deserialize, Serialize};

/// What kind of problem a correction addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionKind {
    /// A word absent from the lexicon.
    Spelling,
    /// A valid word used in place of another member of its homophone group.
    Homophone,
}

impl std::fmt::Display for CorrectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrectionKind::Spelling => write!(f, "spelling"),
            CorrectionKind::Homophone => write!(f, "homophone"),
        }
    }
}

/// A replacement candidate for a flagged word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// The suggested word.
    pub word: String,
    /// Confidence score in `[0.0, 1.0]` (higher is better).
    pub score: f32,
    /// Edit distance from the flagged word. Masked-LM candidates report 0.
    pub distance: usize,
    /// Frequency of the candidate in the lexicon, if known.
    pub frequency: u32,
}

impl Candidate {
    pub fn new(word: impl Into<String>, score: f32, distance: usize, frequency: u32) -> Self {
        Self {
            word: word.into(),
            score,
            distance,
            frequency,
        }
    }
}

/// A word the detector flagged, together with its replacement candidates.
///
/// Issues are reported even when no correction is applied (for instance when
/// every candidate falls below the configured confidence floor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedIssue {
    /// The flagged word as it appears in the input.
    pub word: String,
    /// Byte offset of the word in the input.
    pub position: usize,
    /// Issue classification.
    pub kind: CorrectionKind,
    /// Ranked replacement candidates, best first.
    pub candidates: Vec<Candidate>,
}

/// A replacement that was applied to the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    /// The original word.
    pub original: String,
    /// The replacement word (leading case matches the original).
    pub corrected: String,
    /// Correction classification.
    pub kind: CorrectionKind,
    /// Byte offset of the original word in the input.
    pub position: usize,
    /// Confidence in `[0.0, 1.0]` for this individual correction.
    pub confidence: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correction_kind_display() {
        assert_eq!(CorrectionKind::Spelling.to_string(), "spelling");
        assert_eq!(CorrectionKind::Homophone.to_string(), "homophone");
    }

    #[test]
    fn correction_serialization_roundtrip() {
        let correction = Correction {
            original: "recieve".into(),
            corrected: "receive".into(),
            kind: CorrectionKind::Spelling,
            position: 7,
            confidence: 0.9,
        };
        let json = serde_json::to_string(&correction).unwrap();
        assert!(json.contains("\"spelling\""));
        let back: Correction = serde_json::from_str(&json).unwrap();
        assert_eq!(correction, back);
    }

    #[test]
    fn issue_carries_candidates() {
        let issue = DetectedIssue {
            word: "teh".into(),
            position: 0,
            kind: CorrectionKind::Spelling,
            candidates: vec![Candidate::new("the", 0.92, 1, 1_000_000)],
        };
        assert_eq!(issue.candidates[0].word, "the");
        assert_eq!(issue.candidates[0].distance, 1);
    }
}
