//! Text statistics and readability metrics.
//!
//! Implements the three classic readability formulas (Flesch Reading Ease,
//! Flesch-Kincaid Grade, Automated Readability Index) over simple counts
//! plus a vowel-group syllable estimator.

use serde::{Deserialize, Serialize};

use crate::checker::tokenizer::count_sentences;

/// Statistics for a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStats {
    pub word_count: usize,
    pub character_count: usize,
    pub sentence_count: usize,
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub automated_readability_index: f64,
}

impl TextStats {
    /// Compute statistics for the given text.
    ///
    /// Word and sentence denominators are clamped to 1 so the formulas
    /// never divide by zero on degenerate input.
    #[must_use]
    pub fn analyze(text: &str) -> Self {
        let word_count = text.split_whitespace().count();
        let character_count = text.chars().count();
        let sentence_count = count_sentences(text);

        let syllables: usize = text.split_whitespace().map(estimate_syllables).sum();
        // Letters-and-digits count, the ARI character definition.
        let ari_chars = text.chars().filter(|c| c.is_alphanumeric()).count();

        let words = word_count.max(1) as f64;
        let sentences = sentence_count.max(1) as f64;
        let syllables = syllables.max(1) as f64;

        let words_per_sentence = words / sentences;
        let syllables_per_word = syllables / words;

        let flesch_reading_ease =
            206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;
        let flesch_kincaid_grade = 0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59;
        let automated_readability_index =
            4.71 * (ari_chars as f64 / words) + 0.5 * words_per_sentence - 21.43;

        Self {
            word_count,
            character_count,
            sentence_count,
            flesch_reading_ease,
            flesch_kincaid_grade,
            automated_readability_index,
        }
    }
}

/// Estimate syllables by counting vowel groups, with a silent-e adjustment.
fn estimate_syllables(word: &str) -> usize {
    let word: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if word.is_empty() {
        return 0;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut groups = 0;
    let mut prev_vowel = false;
    for &c in &word {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            groups += 1;
        }
        prev_vowel = vowel;
    }

    // Silent trailing e: "make" is one syllable, not two.
    if word.len() > 2 && word[word.len() - 1] == 'e' && !is_vowel(word[word.len() - 2]) && groups > 1
    {
        groups -= 1;
    }

    groups.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_counts() {
        let stats = TextStats::analyze("This is a test sentence. It has multiple sentences!");
        assert_eq!(stats.word_count, 9);
        assert_eq!(stats.sentence_count, 2);
        assert_eq!(
            stats.character_count,
            "This is a test sentence. It has multiple sentences!".chars().count()
        );
    }

    #[test]
    fn test_syllable_estimation() {
        assert_eq!(estimate_syllables("cat"), 1);
        assert_eq!(estimate_syllables("make"), 1);
        assert_eq!(estimate_syllables("sentence"), 2);
        assert_eq!(estimate_syllables("beautiful"), 3);
        assert_eq!(estimate_syllables("a"), 1);
        assert_eq!(estimate_syllables("123"), 0);
    }

    #[test]
    fn test_readability_ordering() {
        let simple = TextStats::analyze("The cat sat. The dog ran. It was fun.");
        let complex = TextStats::analyze(
            "Sophisticated algorithms process voluminous information repositories, \
             extracting meaningful patterns that facilitate organizational innovation.",
        );
        // Simpler text reads easier and maps to a lower grade level.
        assert!(simple.flesch_reading_ease > complex.flesch_reading_ease);
        assert!(simple.flesch_kincaid_grade < complex.flesch_kincaid_grade);
        assert!(simple.automated_readability_index < complex.automated_readability_index);
    }

    #[test]
    fn test_empty_text_does_not_panic() {
        let stats = TextStats::analyze("");
        assert_eq!(stats.word_count, 0);
        assert_eq!(stats.sentence_count, 0);
        assert_eq!(stats.character_count, 0);
    }

    #[test]
    fn test_serialization() {
        let stats = TextStats::analyze("One sentence here.");
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("word_count"));
        let back: TextStats = serde_json::from_str(&json).unwrap();
        assert_eq!(stats, back);
    }
}
