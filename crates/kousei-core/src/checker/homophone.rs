//! # Homophone analysis
//!
//! Detects confusable-word errors (`there`/`their`/`they're`, …) by
//! matching stored context rules against a window of words around the
//! target. Rules are regex patterns that vote for one member of a group;
//! the highest-confidence vote for a *different* member wins.

use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::checker::tokenizer::Token;
use crate::error::Result;

/// A group of words that sound alike and are commonly confused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomophoneGroup {
    /// Display label, e.g. `there/their/they're`.
    pub label: String,
    /// Member words, lowercase.
    pub words: Vec<String>,
    /// One usage hint per member, e.g. `location`, `possession`.
    pub hints: Vec<String>,
    /// Example sentence(s) showing correct usage.
    pub example: String,
}

/// A context rule voting for one member of a homophone group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextRule {
    /// The member this rule votes for.
    pub word: String,
    /// Regex matched against the lowercased context window.
    pub pattern: String,
    /// Vote confidence in `[0.0, 1.0]`.
    pub confidence: f32,
    /// Human-readable description of the cue.
    pub description: String,
}

struct CompiledRule {
    word: String,
    regex: Regex,
    confidence: f32,
}

/// Evaluates homophone groups and context rules against text.
pub struct HomophoneAnalyzer {
    groups: Vec<HomophoneGroup>,
    rules: Vec<CompiledRule>,
    membership: HashMap<String, usize>,
}

impl HomophoneAnalyzer {
    /// Compile the given groups and rules.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::RegexError` if a rule pattern does not compile
    /// (rules come from the store and may be user-edited).
    pub fn new(groups: Vec<HomophoneGroup>, rules: Vec<ContextRule>) -> Result<Self> {
        let mut membership = HashMap::new();
        for (i, group) in groups.iter().enumerate() {
            for word in &group.words {
                membership.insert(word.to_lowercase(), i);
            }
        }

        let rules = rules
            .into_iter()
            .map(|rule| {
                Ok(CompiledRule {
                    word: rule.word.to_lowercase(),
                    regex: Regex::new(&rule.pattern)?,
                    confidence: rule.confidence.clamp(0.0, 1.0),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            groups,
            rules,
            membership,
        })
    }

    /// Returns `true` if the word belongs to any group.
    pub fn is_member(&self, word: &str) -> bool {
        self.membership.contains_key(&word.to_lowercase())
    }

    /// The group the word belongs to, if any.
    pub fn group_of(&self, word: &str) -> Option<&HomophoneGroup> {
        self.membership
            .get(&word.to_lowercase())
            .map(|&i| &self.groups[i])
    }

    /// All configured groups.
    pub fn groups(&self) -> &[HomophoneGroup] {
        &self.groups
    }

    /// Resolve which member the context calls for.
    ///
    /// Returns `Some((replacement, confidence))` only when a rule for a
    /// different member out-votes every rule backing the current word;
    /// ties keep the text as written.
    pub fn resolve(&self, word: &str, context: &str) -> Option<(String, f32)> {
        let word_lower = word.to_lowercase();
        let group = self.group_of(&word_lower)?;
        let context_lower = context.to_lowercase();

        let mut self_confidence: f32 = 0.0;
        let mut best: Option<(&str, f32)> = None;

        for rule in &self.rules {
            if !group.words.iter().any(|w| w == &rule.word) {
                continue;
            }
            if !rule.regex.is_match(&context_lower) {
                continue;
            }
            if rule.word == word_lower {
                self_confidence = self_confidence.max(rule.confidence);
            } else if best.is_none_or(|(_, c)| rule.confidence > c) {
                best = Some((&rule.word, rule.confidence));
            }
        }

        match best {
            Some((replacement, confidence)) if confidence > self_confidence => {
                Some((replacement.to_string(), confidence))
            }
            _ => None,
        }
    }

    /// Join the normalized token texts in a window of `size` tokens either
    /// side of `index`.
    pub fn context_window(tokens: &[Token], index: usize, size: usize) -> String {
        let start = index.saturating_sub(size);
        let end = (index + size + 1).min(tokens.len());
        tokens[start..end]
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
