//! SQLite-backed storage for the checker's rule data and check history.

use std::path::Path;

use rusqlite::{params, Connection};
use tracing::debug;

use kousei_core::checker::{ContextRule, HomophoneGroup, LexiconData, Misspelling};

use crate::error::Result;
use crate::models::{CheckRecord, NewCheck, StoreStats};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS misspellings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    incorrect_word TEXT NOT NULL UNIQUE,
    correct_word TEXT NOT NULL,
    frequency INTEGER NOT NULL DEFAULT 1,
    context_example TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS homophones (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    word_group TEXT NOT NULL UNIQUE,
    words TEXT NOT NULL,
    context_rules TEXT NOT NULL DEFAULT '',
    examples TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS context_patterns (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pattern TEXT NOT NULL,
    word TEXT NOT NULL,
    confidence REAL NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    UNIQUE(pattern, word)
);

CREATE TABLE IF NOT EXISTS wordlist (
    word TEXT PRIMARY KEY,
    frequency INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS checks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    input TEXT NOT NULL,
    corrected TEXT NOT NULL,
    corrections INTEGER NOT NULL,
    confidence REAL NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);
";

/// Sample misspellings: (incorrect, correct, frequency, example).
const SEED_MISSPELLINGS: &[(&str, &str, u32, &str)] = &[
    ("recieve", "receive", 5, "I will recieve the package tomorrow."),
    ("seperate", "separate", 3, "Please seperate the items."),
    ("definately", "definitely", 4, "I will definately be there."),
    ("occured", "occurred", 2, "The event occured yesterday."),
    ("accomodate", "accommodate", 3, "We can accomodate your request."),
];

/// Sample homophone groups: (label, members, hints, examples).
const SEED_HOMOPHONES: &[(&str, &str, &str, &str)] = &[
    (
        "there/their/they're",
        "there,their,they're",
        "location,possession,contraction",
        "There is a book. Their book is red. They're coming.",
    ),
    (
        "to/too/two",
        "to,too,two",
        "preposition,adverb,number",
        "Go to the store. It's too hot. Two people came.",
    ),
    (
        "your/you're",
        "your,you're",
        "possession,contraction",
        "Your car is nice. You're welcome.",
    ),
    (
        "its/it's",
        "its,it's",
        "possession,contraction",
        "The dog wagged its tail. It's raining.",
    ),
];

/// Context rules: (pattern, member, confidence, description).
const SEED_CONTEXT_PATTERNS: &[(&str, &str, f64, &str)] = &[
    (r"\b(is|are|was|were)\b", "there", 0.8, "existential there"),
    (
        r"\b(book|books|car|cars|house|home|name|names|groceries|friend|friends)\b",
        "their",
        0.75,
        "possessive before a noun",
    ),
    (
        r"\b(coming|going|here|leaving|arriving)\b",
        "they're",
        0.8,
        "contraction of they are",
    ),
    (
        r"\bto\s+(hot|cold|late|early|big|small|much|many|long|far)\b",
        "too",
        0.85,
        "degree adverb before an adjective",
    ),
    (
        r"\b(went|go|going|come|coming)\s+to\b",
        "to",
        0.6,
        "direction preposition",
    ),
    (
        r"\b(one|three|four|five)\b",
        "two",
        0.6,
        "numeric context",
    ),
    (
        r"\b(welcome|right|wrong|sure|kidding|going)\b",
        "you're",
        0.8,
        "contraction of you are",
    ),
    (
        r"\b(car|cars|house|name|book|turn|order)\b",
        "your",
        0.7,
        "possessive determiner",
    ),
    (
        r"\b(tail|paw|paws|fur|color|colour|way|own)\b",
        "its",
        0.75,
        "possessive before a noun",
    ),
    (
        r"\b(a|an|the)\s+\w+",
        "it's",
        0.7,
        "contraction of it is",
    ),
];

/// Handle to the SQLite lexicon database.
pub struct LexiconStore {
    conn: Connection,
}

impl LexiconStore {
    /// Open (or create) the database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (tests, ephemeral runs).
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Open, create the schema, and seed the sample data in one step.
    pub fn bootstrap<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Self::open(path)?;
        store.init_schema()?;
        store.seed_defaults()?;
        Ok(store)
    }

    /// Create all tables if they do not exist.
    pub fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Populate the sample rows. Idempotent: rows are keyed and inserted
    /// with `INSERT OR IGNORE`, so repeated seeding is a no-op.
    pub fn seed_defaults(&self) -> Result<()> {
        for (incorrect, correct, frequency, example) in SEED_MISSPELLINGS {
            self.conn.execute(
                "INSERT OR IGNORE INTO misspellings (incorrect_word, correct_word, frequency, context_example)
                 VALUES (?1, ?2, ?3, ?4)",
                params![incorrect, correct, frequency, example],
            )?;
        }
        for (label, words, hints, examples) in SEED_HOMOPHONES {
            self.conn.execute(
                "INSERT OR IGNORE INTO homophones (word_group, words, context_rules, examples)
                 VALUES (?1, ?2, ?3, ?4)",
                params![label, words, hints, examples],
            )?;
        }
        for (pattern, word, confidence, description) in SEED_CONTEXT_PATTERNS {
            self.conn.execute(
                "INSERT OR IGNORE INTO context_patterns (pattern, word, confidence, description)
                 VALUES (?1, ?2, ?3, ?4)",
                params![pattern, word, confidence, description],
            )?;
        }
        debug!("seeded sample lexicon data");
        Ok(())
    }

    /// All known misspellings.
    pub fn misspellings(&self) -> Result<Vec<Misspelling>> {
        let mut stmt = self.conn.prepare(
            "SELECT incorrect_word, correct_word, frequency, context_example
             FROM misspellings ORDER BY incorrect_word",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Misspelling {
                incorrect: row.get(0)?,
                correct: row.get(1)?,
                frequency: row.get(2)?,
                example: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<_, _>>()?)
    }

    /// All homophone groups, with member and hint lists split out.
    pub fn homophone_groups(&self) -> Result<Vec<HomophoneGroup>> {
        let mut stmt = self.conn.prepare(
            "SELECT word_group, words, context_rules, examples FROM homophones ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            let label: String = row.get(0)?;
            let words: String = row.get(1)?;
            let hints: String = row.get(2)?;
            let example: String = row.get(3)?;
            Ok(HomophoneGroup {
                label,
                words: split_csv(&words),
                hints: split_csv(&hints),
                example,
            })
        })?;
        Ok(rows.collect::<std::result::Result<_, _>>()?)
    }

    /// All context rules.
    pub fn context_rules(&self) -> Result<Vec<ContextRule>> {
        let mut stmt = self.conn.prepare(
            "SELECT pattern, word, confidence, description FROM context_patterns ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ContextRule {
                pattern: row.get(0)?,
                word: row.get(1)?,
                confidence: row.get::<_, f64>(2)? as f32,
                description: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<_, _>>()?)
    }

    /// The imported word list.
    pub fn wordlist(&self) -> Result<Vec<(String, u32)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT word, frequency FROM wordlist")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        Ok(rows.collect::<std::result::Result<_, _>>()?)
    }

    /// Everything the checker needs, in one call.
    pub fn lexicon_data(&self) -> Result<LexiconData> {
        Ok(LexiconData {
            words: self.wordlist()?,
            misspellings: self.misspellings()?,
            groups: self.homophone_groups()?,
            rules: self.context_rules()?,
        })
    }

    /// Bulk-import `(word, frequency)` rows, replacing existing entries.
    /// Returns the number of rows written.
    pub fn import_wordlist<I>(&mut self, rows: I) -> Result<usize>
    where
        I: IntoIterator<Item = (String, u32)>,
    {
        let tx = self.conn.transaction()?;
        let mut written = 0;
        {
            let mut stmt =
                tx.prepare("INSERT OR REPLACE INTO wordlist (word, frequency) VALUES (?1, ?2)")?;
            for (word, frequency) in rows {
                stmt.execute(params![word.to_lowercase(), frequency])?;
                written += 1;
            }
        }
        tx.commit()?;
        debug!(rows = written, "imported word list");
        Ok(written)
    }

    /// Record a completed check in the history table.
    pub fn record_check(&self, check: &NewCheck) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO checks (input, corrected, corrections, confidence)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                check.input,
                check.corrected,
                check.corrections,
                f64::from(check.confidence)
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// The most recent checks, newest first.
    pub fn recent_checks(&self, limit: usize) -> Result<Vec<CheckRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, input, corrected, corrections, confidence, created_at
             FROM checks ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(CheckRecord {
                id: row.get(0)?,
                input: row.get(1)?,
                corrected: row.get(2)?,
                corrections: row.get(3)?,
                confidence: row.get::<_, f64>(4)? as f32,
                created_at: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<_, _>>()?)
    }

    /// Row counts per table.
    pub fn stats(&self) -> Result<StoreStats> {
        Ok(StoreStats {
            misspellings: self.count("misspellings")?,
            homophone_groups: self.count("homophones")?,
            context_patterns: self.count("context_patterns")?,
            wordlist_words: self.count("wordlist")?,
            checks: self.count("checks")?,
        })
    }

    fn count(&self, table: &str) -> Result<usize> {
        // Table names are fixed by the schema above, never user input.
        let sql = format!("SELECT COUNT(*) FROM {table}");
        let n: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
