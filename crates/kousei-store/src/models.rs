use serde::Serialize;

/// A completed check to be recorded in history.
#[derive(Debug, Clone)]
pub struct NewCheck {
    pub input: String,
    pub corrected: String,
    pub corrections: u32,
    pub confidence: f32,
}

/// A row from the check-history table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckRecord {
    pub id: i64,
    pub input: String,
    pub corrected: String,
    pub corrections: u32,
    pub confidence: f32,
    pub created_at: String,
}

/// Row counts per table, for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub misspellings: usize,
    pub homophone_groups: usize,
    pub context_patterns: usize,
    pub wordlist_words: usize,
    pub checks: usize,
}
