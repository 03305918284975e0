//! # Unified checking engine
//!
//! Combines the lexicon, known-misspelling table, homophone rules and the
//! optional masked-LM ranker behind one `Checker` with automatic fallback
//! when the model is unavailable.

pub mod homophone;
pub mod lexicon;
pub mod masked_lm;
pub mod tokenizer;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CheckError, Result};
use crate::scoring::ConfidenceProfile;
use crate::types::{Candidate, CheckMode, CheckReport, Correction, CorrectionKind, DetectedIssue};

pub use homophone::{ContextRule, HomophoneAnalyzer, HomophoneGroup};
pub use lexicon::Lexicon;
pub use masked_lm::{BertMaskedLm, MaskedLmRanker};
pub use tokenizer::{Token, WordTokenizer};

/// Default model directory, relative to the working directory.
pub const DEFAULT_MODEL_DIR: &str = "models/bert-base-uncased";

/// A known misspelling with its canonical correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Misspelling {
    /// The misspelled form, lowercase.
    pub incorrect: String,
    /// The canonical correction.
    pub correct: String,
    /// How often this confusion has been observed.
    pub frequency: u32,
    /// Example sentence containing the misspelling.
    pub example: String,
}

/// Rows the checker consumes from the store at construction time.
#[derive(Debug, Clone, Default)]
pub struct LexiconData {
    /// `(word, frequency)` rows merged into the baseline lexicon.
    pub words: Vec<(String, u32)>,
    /// Known misspellings for the exact-lookup fast path.
    pub misspellings: Vec<Misspelling>,
    /// Homophone groups.
    pub groups: Vec<HomophoneGroup>,
    /// Context rules resolving homophone groups.
    pub rules: Vec<ContextRule>,
}

/// Configuration for the checker.
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Which engine to prefer.
    pub mode: CheckMode,
    /// Minimum masked-LM probability for a homophone swap.
    pub confidence_threshold: f32,
    /// Tokens of context either side of a homophone candidate.
    pub context_window: usize,
    /// Maximum replacement candidates per issue.
    pub max_suggestions: usize,
    /// Corrections below this confidence are reported but not applied.
    pub min_confidence: f32,
    /// Whether to attempt loading the masked-LM at all.
    pub enable_neural: bool,
    /// Model directory; `DEFAULT_MODEL_DIR` when unset.
    pub model_dir: Option<PathBuf>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            mode: CheckMode::Auto,
            confidence_threshold: 0.7,
            context_window: 3,
            max_suggestions: 5,
            min_confidence: 0.5,
            enable_neural: true,
            model_dir: None,
        }
    }
}

impl CheckerConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the check mode.
    pub fn with_mode(mut self, mode: CheckMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the masked-LM acceptance threshold.
    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Set the context window size (at least 1).
    pub fn with_context_window(mut self, size: usize) -> Self {
        self.context_window = size.max(1);
        self
    }

    /// Set the maximum number of suggestions per issue (at least 1).
    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max.max(1);
        self
    }

    /// Set the minimum confidence for applying a correction.
    pub fn with_min_confidence(mut self, min: f32) -> Self {
        self.min_confidence = min.clamp(0.0, 1.0);
        self
    }

    /// Enable or disable the masked-LM ranker.
    pub fn with_neural(mut self, enabled: bool) -> Self {
        self.enable_neural = enabled;
        self
    }

    /// Set the model directory.
    pub fn with_model_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.model_dir = Some(dir.into());
        self
    }
}

/// Context-aware spell checker with automatic neural/rules fallback.
pub struct Checker {
    config: CheckerConfig,
    tokenizer: WordTokenizer,
    lexicon: Lexicon,
    misspellings: HashMap<String, Misspelling>,
    analyzer: HomophoneAnalyzer,
    neural: Option<MaskedLmRanker>,
    profile: ConfidenceProfile,
}

impl Checker {
    /// Build a checker from configuration and store rows.
    ///
    /// When `enable_neural` is set, model loading is attempted; failure is
    /// logged and the checker degrades to rules-only operation, matching
    /// the service's degraded startup path.
    pub fn new(config: CheckerConfig, data: LexiconData) -> Result<Self> {
        let mut lexicon = Lexicon::builtin();
        lexicon.merge_rows(data.words);

        // Correction targets and group members must never be flagged.
        for m in &data.misspellings {
            if !lexicon.contains(&m.correct) {
                lexicon.add_word(&m.correct, 1);
            }
        }
        for group in &data.groups {
            for word in &group.words {
                if !lexicon.contains(word) {
                    lexicon.add_word(word, 1);
                }
            }
        }

        let misspellings = data
            .misspellings
            .into_iter()
            .map(|m| (m.incorrect.to_lowercase(), m))
            .collect();

        let analyzer = HomophoneAnalyzer::new(data.groups, data.rules)?;

        let neural = if config.enable_neural && config.mode != CheckMode::Rules {
            let dir = config
                .model_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_DIR));
            let mut ranker = MaskedLmRanker::new();
            match ranker.init_model(&dir) {
                Ok(()) => Some(ranker),
                Err(e) => {
                    tracing::warn!(
                        model_dir = %dir.display(),
                        "masked-LM unavailable, falling back to rules: {e}"
                    );
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            config,
            tokenizer: WordTokenizer::new(),
            lexicon,
            misspellings,
            analyzer,
            neural,
            profile: ConfidenceProfile::default(),
        })
    }

    /// Check if the masked-LM ranker is loaded.
    pub fn has_neural(&self) -> bool {
        self.neural.is_some()
    }

    /// Get the checker configuration.
    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// The configured homophone groups (dashboard data).
    pub fn homophone_groups(&self) -> &[HomophoneGroup] {
        self.analyzer.groups()
    }

    /// Number of known misspellings.
    pub fn misspelling_count(&self) -> usize {
        self.misspellings.len()
    }

    /// Run a full check over the input text.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::EmptyInput` for empty or whitespace-only input.
    pub fn check(&self, text: &str) -> Result<CheckReport> {
        if text.trim().is_empty() {
            return Err(CheckError::EmptyInput);
        }

        let mode = match (&self.neural, self.config.mode) {
            (Some(_), CheckMode::Neural) => CheckMode::Neural,
            (Some(_), _) => CheckMode::Auto,
            (None, _) => CheckMode::Rules,
        };

        let tokens = self.tokenizer.tokenize(text);
        let mut issues = Vec::new();
        let mut corrections = Vec::new();

        for token in tokens.iter().filter(|t| t.is_word()) {
            let original = &text[token.start..token.end];

            if let Some(known) = self.misspellings.get(&token.text) {
                let candidate = Candidate::new(
                    known.correct.clone(),
                    self.profile.weight_for(CorrectionKind::Spelling),
                    0,
                    self.lexicon.frequency(&known.correct),
                );
                issues.push(DetectedIssue {
                    word: original.to_string(),
                    position: token.start,
                    kind: CorrectionKind::Spelling,
                    candidates: vec![candidate],
                });
                self.push_correction(
                    &mut corrections,
                    original,
                    &known.correct,
                    CorrectionKind::Spelling,
                    token.start,
                    self.profile.weight_for(CorrectionKind::Spelling),
                );
                continue;
            }

            if !self.lexicon.contains(&token.text) {
                self.check_spelling(text, token, original, &mut issues, &mut corrections);
                continue;
            }

            if self.analyzer.is_member(&token.text) {
                self.check_homophone(text, &tokens, token, original, &mut issues, &mut corrections);
            }
        }

        let corrected = apply_corrections(text, &corrections);
        let confidence = self.profile.report_confidence(&corrections);

        Ok(CheckReport {
            input: text.to_string(),
            corrected,
            issues,
            corrections,
            confidence,
            mode,
        })
    }

    /// Flag an out-of-lexicon word and pick its replacement.
    fn check_spelling(
        &self,
        text: &str,
        token: &Token,
        original: &str,
        issues: &mut Vec<DetectedIssue>,
        corrections: &mut Vec<Correction>,
    ) {
        let candidates = self.lexicon.suggest(&token.text, self.config.max_suggestions);

        // The masked-LM picks the replacement when available; the ranked
        // edit-distance candidates are reported either way.
        let (replacement, confidence) = match self.neural_replacement(text, token) {
            Some(word) => (
                Some(word),
                self.profile.weight_for(CorrectionKind::Spelling),
            ),
            None => match candidates.first() {
                Some(best) => (
                    Some(best.word.clone()),
                    self.profile.weight_for(CorrectionKind::Spelling) * best.score,
                ),
                None => (None, 0.0),
            },
        };

        issues.push(DetectedIssue {
            word: original.to_string(),
            position: token.start,
            kind: CorrectionKind::Spelling,
            candidates,
        });

        if let Some(replacement) = replacement {
            if confidence >= self.config.min_confidence {
                self.push_correction(
                    corrections,
                    original,
                    &replacement,
                    CorrectionKind::Spelling,
                    token.start,
                    confidence,
                );
            }
        }
    }

    /// Ask the masked-LM for a context-ranked replacement.
    fn neural_replacement(&self, text: &str, token: &Token) -> Option<String> {
        let ranker = self.neural.as_ref()?;
        match ranker.rank_replacements(
            text,
            token.start,
            token.end,
            &token.text,
            self.config.max_suggestions,
        ) {
            Ok(ranked) => ranked.into_iter().next().map(|c| c.word),
            Err(e) => {
                tracing::debug!("masked-LM ranking failed for {:?}: {e}", token.text);
                None
            }
        }
    }

    /// Resolve a homophone-group member against its context.
    fn check_homophone(
        &self,
        text: &str,
        tokens: &[Token],
        token: &Token,
        original: &str,
        issues: &mut Vec<DetectedIssue>,
        corrections: &mut Vec<Correction>,
    ) {
        let window =
            HomophoneAnalyzer::context_window(tokens, token.index, self.config.context_window);

        if let Some((replacement, confidence)) = self.analyzer.resolve(&token.text, &window) {
            let frequency = self.lexicon.frequency(&replacement);
            issues.push(DetectedIssue {
                word: original.to_string(),
                position: token.start,
                kind: CorrectionKind::Homophone,
                candidates: vec![Candidate::new(replacement.clone(), confidence, 0, frequency)],
            });
            if confidence >= self.config.min_confidence {
                self.push_correction(
                    corrections,
                    original,
                    &replacement,
                    CorrectionKind::Homophone,
                    token.start,
                    confidence,
                );
            }
            return;
        }

        // No rule fired: let the masked-LM arbitrate between the members.
        let Some(ranker) = self.neural.as_ref() else {
            return;
        };
        let Some(group) = self.analyzer.group_of(&token.text) else {
            return;
        };
        let scored = match ranker.score_members(text, token.start, token.end, &group.words) {
            Ok(scored) => scored,
            Err(e) => {
                tracing::debug!("masked-LM member scoring failed for {:?}: {e}", token.text);
                return;
            }
        };
        if let Some((best, probability)) = scored.into_iter().next() {
            if best != token.text && probability >= self.config.confidence_threshold {
                issues.push(DetectedIssue {
                    word: original.to_string(),
                    position: token.start,
                    kind: CorrectionKind::Homophone,
                    candidates: vec![Candidate::new(
                        best.clone(),
                        probability,
                        0,
                        self.lexicon.frequency(&best),
                    )],
                });
                self.push_correction(
                    corrections,
                    original,
                    &best,
                    CorrectionKind::Homophone,
                    token.start,
                    self.profile.weight_for(CorrectionKind::Homophone),
                );
            }
        }
    }

    fn push_correction(
        &self,
        corrections: &mut Vec<Correction>,
        original: &str,
        replacement: &str,
        kind: CorrectionKind,
        position: usize,
        confidence: f32,
    ) {
        corrections.push(Correction {
            original: original.to_string(),
            corrected: match_case(replacement, original),
            kind,
            position,
            confidence,
        });
    }
}

/// Build a checker that never touches the model directory.
pub fn rules_only(data: LexiconData) -> Result<Checker> {
    Checker::new(
        CheckerConfig::new()
            .with_mode(CheckMode::Rules)
            .with_neural(false),
        data,
    )
}

/// Apply corrections by byte span, right-to-left so earlier offsets stay
/// valid.
fn apply_corrections(text: &str, corrections: &[Correction]) -> String {
    let mut corrected = text.to_string();
    let mut ordered: Vec<&Correction> = corrections.iter().collect();
    ordered.sort_by(|a, b| b.position.cmp(&a.position));
    for correction in ordered {
        let end = correction.position + correction.original.len();
        corrected.replace_range(correction.position..end, &correction.corrected);
    }
    corrected
}

/// Copy the leading capitalization of `original` onto `replacement`.
fn match_case(replacement: &str, original: &str) -> String {
    let starts_upper = original.chars().next().is_some_and(char::is_uppercase);
    if !starts_upper {
        return replacement.to_string();
    }
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> LexiconData {
        LexiconData {
            words: vec![],
            misspellings: vec![
                Misspelling {
                    incorrect: "recieve".into(),
                    correct: "receive".into(),
                    frequency: 5,
                    example: "I will recieve the package tomorrow.".into(),
                },
                Misspelling {
                    incorrect: "definately".into(),
                    correct: "definitely".into(),
                    frequency: 4,
                    example: "I will definately be there.".into(),
                },
            ],
            groups: vec![HomophoneGroup {
                label: "there/their/they're".into(),
                words: vec!["there".into(), "their".into(), "they're".into()],
                hints: vec!["location".into(), "possession".into(), "contraction".into()],
                example: "There is a book.".into(),
            }],
            rules: vec![
                ContextRule {
                    word: "there".into(),
                    pattern: r"\b(is|are|was|were)\b".into(),
                    confidence: 0.8,
                    description: "existential there".into(),
                },
                ContextRule {
                    word: "their".into(),
                    pattern: r"\b(book|car|house|groceries)\b".into(),
                    confidence: 0.75,
                    description: "possession".into(),
                },
                ContextRule {
                    word: "they're".into(),
                    pattern: r"\b(coming|going|here)\b".into(),
                    confidence: 0.8,
                    description: "contraction".into(),
                },
            ],
        }
    }

    fn checker() -> Checker {
        rules_only(sample_data()).unwrap()
    }

    #[test]
    fn test_empty_input_rejected() {
        let checker = checker();
        assert!(matches!(checker.check(""), Err(CheckError::EmptyInput)));
        assert!(matches!(checker.check("   "), Err(CheckError::EmptyInput)));
    }

    #[test]
    fn test_clean_text_passes() {
        let checker = checker();
        let report = checker.check("The sun is shining bright.").unwrap();
        assert!(!report.has_corrections());
        assert_eq!(report.confidence, 1.0);
        assert_eq!(report.corrected, "The sun is shining bright.");
        assert_eq!(report.mode, CheckMode::Rules);
    }

    #[test]
    fn test_known_misspelling_corrected() {
        let checker = checker();
        let report = checker
            .check("I recieve the package yesterday and it was definately worth it.")
            .unwrap();

        assert_eq!(
            report.corrected,
            "I receive the package yesterday and it was definitely worth it."
        );
        assert_eq!(report.corrections.len(), 2);
        assert!(report
            .corrections
            .iter()
            .all(|c| c.kind == CorrectionKind::Spelling));
        assert!((report.confidence - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_homophone_corrected() {
        let checker = checker();
        let report = checker
            .check("Their going to the store to buy there groceries.")
            .unwrap();

        assert_eq!(
            report.corrected,
            "They're going to the store to buy their groceries."
        );
        let kinds: Vec<_> = report.corrections.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![CorrectionKind::Homophone, CorrectionKind::Homophone]);
    }

    #[test]
    fn test_correct_homophone_untouched() {
        let checker = checker();
        let report = checker.check("There is a book on the table.").unwrap();
        assert!(!report.has_corrections());
    }

    #[test]
    fn test_unknown_word_suggested() {
        let checker = checker();
        let report = checker.check("She went to teh store.").unwrap();

        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].word, "teh");
        assert_eq!(report.issues[0].kind, CorrectionKind::Spelling);
        assert_eq!(report.corrected, "She went to the store.");
    }

    #[test]
    fn test_case_preserved() {
        let checker = checker();
        let report = checker.check("Their going home now, really.").unwrap();
        assert!(report.corrected.starts_with("They're "));
    }

    #[test]
    fn test_min_confidence_blocks_weak_corrections() {
        let data = sample_data();
        let config = CheckerConfig::new()
            .with_mode(CheckMode::Rules)
            .with_neural(false)
            .with_min_confidence(0.99);
        let checker = Checker::new(config, data).unwrap();

        let report = checker.check("She went to teh store.").unwrap();
        // The issue is still reported, but nothing is applied.
        assert_eq!(report.issues.len(), 1);
        assert!(!report.has_corrections());
        assert_eq!(report.corrected, "She went to teh store.");
    }

    #[test]
    fn test_config_builder() {
        let config = CheckerConfig::new()
            .with_mode(CheckMode::Rules)
            .with_confidence_threshold(1.5)
            .with_context_window(0)
            .with_max_suggestions(0)
            .with_min_confidence(-0.5);

        assert_eq!(config.mode, CheckMode::Rules);
        assert_eq!(config.confidence_threshold, 1.0);
        assert_eq!(config.context_window, 1);
        assert_eq!(config.max_suggestions, 1);
        assert_eq!(config.min_confidence, 0.0);
    }

    #[test]
    fn test_neural_disabled_never_loads_model() {
        let checker = rules_only(LexiconData::default()).unwrap();
        assert!(!checker.has_neural());
    }

    #[test]
    fn test_apply_corrections_multiple_spans() {
        let corrections = vec![
            Correction {
                original: "teh".into(),
                corrected: "the".into(),
                kind: CorrectionKind::Spelling,
                position: 0,
                confidence: 0.9,
            },
            Correction {
                original: "teh".into(),
                corrected: "the".into(),
                kind: CorrectionKind::Spelling,
                position: 8,
                confidence: 0.9,
            },
        ];
        assert_eq!(apply_corrections("teh and teh", &corrections), "the and the");
    }

    #[test]
    fn test_match_case() {
        assert_eq!(match_case("they're", "Their"), "They're");
        assert_eq!(match_case("receive", "recieve"), "receive");
        assert_eq!(match_case("too", "To"), "Too");
    }
}
