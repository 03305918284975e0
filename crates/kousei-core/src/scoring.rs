//! Confidence scoring for applied corrections.

use serde::{Deserialize, Serialize};

use crate::types::{Correction, CorrectionKind};

/// Default per-kind confidence weights.
pub const WEIGHT_SPELLING: f32 = 0.9;
pub const WEIGHT_HOMOPHONE: f32 = 0.8;
pub const WEIGHT_FALLBACK: f32 = 0.7;

/// Confidence profile assigning a base weight to each correction kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceProfile {
    pub spelling_weight: f32,
    pub homophone_weight: f32,
    /// Used when a correction carries no confidence of its own.
    pub fallback_weight: f32,
}

impl Default for ConfidenceProfile {
    fn default() -> Self {
        Self {
            spelling_weight: WEIGHT_SPELLING,
            homophone_weight: WEIGHT_HOMOPHONE,
            fallback_weight: WEIGHT_FALLBACK,
        }
    }
}

impl ConfidenceProfile {
    /// Validates that every weight lies in `[0.0, 1.0]`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [
            self.spelling_weight,
            self.homophone_weight,
            self.fallback_weight,
        ]
        .iter()
        .all(|w| (0.0..=1.0).contains(w))
    }

    /// Base confidence for a correction of the given kind.
    #[must_use]
    pub fn weight_for(&self, kind: CorrectionKind) -> f32 {
        match kind {
            CorrectionKind::Spelling => self.spelling_weight,
            CorrectionKind::Homophone => self.homophone_weight,
        }
    }

    /// Overall report confidence: the mean of per-correction confidences,
    /// 1.0 when nothing was corrected.
    #[must_use]
    pub fn report_confidence(&self, corrections: &[Correction]) -> f32 {
        if corrections.is_empty() {
            return 1.0;
        }
        let sum: f32 = corrections
            .iter()
            .map(|c| {
                if c.confidence > 0.0 {
                    c.confidence
                } else {
                    self.fallback_weight
                }
            })
            .sum();
        sum / corrections.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn correction(kind: CorrectionKind, confidence: f32) -> Correction {
        Correction {
            original: "a".into(),
            corrected: "b".into(),
            kind,
            position: 0,
            confidence,
        }
    }

    #[test]
    fn default_profile_is_valid() {
        assert!(ConfidenceProfile::default().is_valid());
    }

    #[test]
    fn invalid_profile_detected() {
        let profile = ConfidenceProfile {
            spelling_weight: 1.5,
            homophone_weight: 0.8,
            fallback_weight: 0.7,
        };
        assert!(!profile.is_valid());
    }

    #[test]
    fn empty_corrections_are_fully_confident() {
        let profile = ConfidenceProfile::default();
        assert_eq!(profile.report_confidence(&[]), 1.0);
    }

    #[test]
    fn mixed_corrections_average() {
        let profile = ConfidenceProfile::default();
        let corrections = vec![
            correction(CorrectionKind::Spelling, 0.9),
            correction(CorrectionKind::Homophone, 0.8),
        ];
        let confidence = profile.report_confidence(&corrections);
        assert!((confidence - 0.85).abs() < 1e-6);
    }

    #[test]
    fn zero_confidence_uses_fallback_weight() {
        let profile = ConfidenceProfile::default();
        let corrections = vec![correction(CorrectionKind::Spelling, 0.0)];
        let confidence = profile.report_confidence(&corrections);
        assert!((confidence - WEIGHT_FALLBACK).abs() < 1e-6);
    }

    #[test]
    fn weight_for_kind() {
        let profile = ConfidenceProfile::default();
        assert_eq!(profile.weight_for(CorrectionKind::Spelling), 0.9);
        assert_eq!(profile.weight_for(CorrectionKind::Homophone), 0.8);
    }
}
