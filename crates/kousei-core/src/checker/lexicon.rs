//! # Lexicon
//!
//! Word-frequency dictionary used for spelling detection and edit-distance
//! candidate generation. The embedded baseline list keeps the engine usable
//! with no external data; production deployments import a full frequency
//! list into the store and merge it in at startup.

use std::collections::{HashMap, HashSet};
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::types::Candidate;

/// Words bundled with the crate, ordered most common first.
const BUILTIN_WORDS: &str = include_str!("../../assets/english.txt");

/// Weight of edit-distance closeness in candidate scoring.
const DISTANCE_WEIGHT: f32 = 0.6;
/// Weight of word frequency in candidate scoring.
const FREQUENCY_WEIGHT: f32 = 0.4;

/// A dictionary of words and their frequencies.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    words: HashMap<String, u32>,
    total_count: u64,
    max_frequency: u32,
}

impl Lexicon {
    /// Create an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a lexicon from the embedded baseline word list.
    ///
    /// The list is rank-ordered, so frequency is assigned by position.
    pub fn builtin() -> Self {
        let mut lexicon = Self::new();
        let words: Vec<&str> = BUILTIN_WORDS
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty() && !w.starts_with('#'))
            .collect();
        let n = words.len() as u32;
        for (i, word) in words.iter().enumerate() {
            // First occurrence wins: the list is rank-ordered.
            if !lexicon.contains(word) {
                lexicon.add_word(word, n.saturating_sub(i as u32).max(1));
            }
        }
        lexicon
    }

    /// Add a word with the given frequency, replacing any existing entry.
    pub fn add_word(&mut self, word: &str, frequency: u32) {
        let normalized = word.to_lowercase();
        let old = self.words.insert(normalized, frequency).unwrap_or(0);
        self.total_count = self.total_count - u64::from(old) + u64::from(frequency);
        self.max_frequency = self.max_frequency.max(frequency);
    }

    /// Merge `(word, frequency)` rows, keeping the higher frequency on
    /// collision.
    pub fn merge_rows<I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = (String, u32)>,
    {
        for (word, frequency) in rows {
            let current = self.frequency(&word);
            if frequency > current || current == 0 {
                self.add_word(&word, frequency.max(1));
            }
        }
    }

    /// Load words from a file: one word per line, optionally followed by a
    /// frequency. Returns the number of rows loaded.
    pub fn load_wordlist_file<P: AsRef<Path>>(&mut self, path: P) -> std::io::Result<usize> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let mut loaded = 0;

        for line in reader.lines() {
            let line = line?;
            let mut parts = line.split_whitespace();
            let Some(word) = parts.next() else { continue };
            if !word.chars().all(|c| c.is_alphabetic() || c == '\'') {
                continue;
            }
            let frequency = parts
                .next()
                .and_then(|f| f.parse::<u64>().ok())
                .map(|f| f.min(u64::from(u32::MAX)) as u32)
                .unwrap_or(1);
            self.add_word(word, frequency);
            loaded += 1;
        }

        Ok(loaded)
    }

    /// Check if a word exists in the lexicon (case-insensitive).
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(&word.to_lowercase())
    }

    /// Get the frequency of a word, 0 if absent.
    pub fn frequency(&self, word: &str) -> u32 {
        self.words.get(&word.to_lowercase()).copied().unwrap_or(0)
    }

    /// Get the relative probability of a word.
    pub fn probability(&self, word: &str) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        f64::from(self.frequency(word)) / self.total_count as f64
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the lexicon holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Ranked replacement candidates for a (presumably misspelled) word.
    ///
    /// Candidates are generated from single and double edits, filtered to
    /// dictionary words, and scored by a blend of edit-distance closeness
    /// and log-scaled frequency.
    pub fn suggest(&self, word: &str, max_suggestions: usize) -> Vec<Candidate> {
        let word = word.to_lowercase();
        if word.is_empty() || max_suggestions == 0 {
            return Vec::new();
        }
        if self.contains(&word) {
            let frequency = self.frequency(&word);
            return vec![Candidate::new(word, 1.0, 0, frequency)];
        }

        let mut seen: HashSet<String> = HashSet::new();
        for edit in single_edits(&word) {
            if self.contains(&edit) {
                seen.insert(edit.clone());
            }
            for second in single_edits(&edit) {
                if self.contains(&second) {
                    seen.insert(second);
                }
            }
        }

        let mut candidates: Vec<Candidate> = seen
            .into_iter()
            .map(|candidate| {
                let distance = levenshtein(&word, &candidate);
                let frequency = self.frequency(&candidate);
                let score = self.score(distance, frequency);
                Candidate::new(candidate, score, distance, frequency)
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.word.cmp(&b.word))
        });
        candidates.truncate(max_suggestions);
        candidates
    }

    fn score(&self, distance: usize, frequency: u32) -> f32 {
        let distance_score = 1.0 / (1.0 + distance as f32);
        let frequency_score = if self.max_frequency == 0 || frequency == 0 {
            0.0
        } else {
            (1.0 + f64::from(frequency)).ln() as f32 / (1.0 + f64::from(self.max_frequency)).ln() as f32
        };
        DISTANCE_WEIGHT * distance_score + FREQUENCY_WEIGHT * frequency_score
    }
}

/// All words one edit away: deletions, transpositions, replacements and
/// insertions over `a..=z` plus the apostrophe.
fn single_edits(word: &str) -> Vec<String> {
    const ALPHABET: &[char] = &[
        'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
        's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '\'',
    ];

    let chars: Vec<char> = word.chars().collect();
    let len = chars.len();
    let mut edits = Vec::with_capacity(len * (2 * ALPHABET.len() + 2));

    // Deletions
    for i in 0..len {
        let mut edit = chars.clone();
        edit.remove(i);
        edits.push(edit.into_iter().collect());
    }

    // Transpositions
    for i in 0..len.saturating_sub(1) {
        let mut edit = chars.clone();
        edit.swap(i, i + 1);
        edits.push(edit.into_iter().collect());
    }

    // Replacements
    for i in 0..len {
        for &c in ALPHABET {
            if c != chars[i] {
                let mut edit = chars.clone();
                edit[i] = c;
                edits.push(edit.into_iter().collect());
            }
        }
    }

    // Insertions
    for i in 0..=len {
        for &c in ALPHABET {
            let mut edit = chars.clone();
            edit.insert(i, c);
            edits.push(edit.into_iter().collect());
        }
    }

    edits
}

/// Plain Levenshtein distance over chars.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (prev[j + 1] + 1).min(current[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut current);
    }

    prev[b.len()]
}
