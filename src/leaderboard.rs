//! High score leaderboard
//!
//! Persisted to LocalStorage, tracks the top 10 runs, remembers the player's
//! name, and round-trips through a `{ "board": [...], "name": "..." }`
//! JSON document for export/import.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::game::ScoreSink;
use crate::platform::Storage;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;
/// Names are cut to this many characters
pub const MAX_NAME_LEN: usize = 24;
/// Name used when none is remembered
pub const DEFAULT_NAME: &str = "YOU";
/// Name used for runs saved on page unload without a remembered name
pub const AUTO_NAME: &str = "AUTO";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(default)]
    pub name: String,
    /// Whole points (scores are floored when recorded)
    #[serde(deserialize_with = "whole_points")]
    pub score: u64,
    /// Unix timestamp (ms) when achieved
    #[serde(default)]
    pub at: f64,
}

/// Accept any JSON number, floored and clamped at zero
fn whole_points<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = f64::deserialize(deserializer)?;
    Ok(floor_score(value))
}

fn floor_score(score: f64) -> u64 {
    if score.is_finite() {
        score.max(0.0).floor() as u64
    } else {
        0
    }
}

fn clean_name(name: &str) -> String {
    name.trim().chars().take(MAX_NAME_LEN).collect()
}

/// Export/import document
#[derive(Debug, Serialize)]
struct ExportDocument<'a> {
    board: &'a [LeaderboardEntry],
    name: &'a str,
}

/// What an import changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub board_replaced: bool,
    pub name_replaced: bool,
}

#[derive(Debug)]
pub enum LeaderboardError {
    /// Not valid JSON
    Parse(serde_json::Error),
    /// Valid JSON, but not an object
    NotAnObject,
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaderboardError::Parse(e) => write!(f, "invalid leaderboard file: {e}"),
            LeaderboardError::NotAnObject => write!(f, "leaderboard file must be a JSON object"),
        }
    }
}

impl std::error::Error for LeaderboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LeaderboardError::Parse(e) => Some(e),
            LeaderboardError::NotAnObject => None,
        }
    }
}

impl From<serde_json::Error> for LeaderboardError {
    fn from(e: serde_json::Error) -> Self {
        LeaderboardError::Parse(e)
    }
}

/// High score leaderboard plus remembered player name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    name: String,
}

impl Leaderboard {
    /// LocalStorage key for the board
    pub const STORAGE_KEY: &'static str = "hazard_runner_leaderboard_v1";
    /// LocalStorage key for the remembered name
    pub const NAME_KEY: &'static str = "hazard_runner_player_name_v1";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Add a score. Ties rank below existing entries.
    /// Returns the rank achieved (1-indexed) or None if it fell off the board.
    pub fn add_score(&mut self, name: &str, score: f64, at: f64) -> Option<usize> {
        let name = match clean_name(name) {
            n if n.is_empty() => DEFAULT_NAME.to_string(),
            n => n,
        };
        let entry = LeaderboardEntry {
            name,
            score: floor_score(score),
            at,
        };

        // Find insertion point (sorted descending by score)
        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The remembered name (may be empty)
    pub fn remembered_name(&self) -> &str {
        &self.name
    }

    /// Remember a name; blank input remembers the default name
    pub fn remember_name(&mut self, name: &str) {
        self.name = match clean_name(name) {
            n if n.is_empty() => DEFAULT_NAME.to_string(),
            n => n,
        };
    }

    /// Name to record a run under, falling back to `fallback`
    pub fn name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.name.is_empty() { fallback } else { &self.name }
    }

    /// Parse a stored board; anything malformed yields an empty board
    pub fn board_from_json(json: &str) -> Vec<LeaderboardEntry> {
        match serde_json::from_str::<Value>(json) {
            Ok(value) => entries_from_value(value),
            Err(e) => {
                log::warn!("Stored leaderboard unreadable, starting fresh: {}", e);
                Vec::new()
            }
        }
    }

    /// Export as a pretty-printed `{ board, name }` document
    pub fn export_json(&self) -> String {
        let doc = ExportDocument {
            board: &self.entries,
            name: &self.name,
        };
        serde_json::to_string_pretty(&doc).unwrap_or_else(|_| "{}".to_string())
    }

    /// Import a `{ board, name }` document.
    ///
    /// The board is replaced only when `board` is an array and the name only
    /// when `name` is a string; other fields are ignored.
    pub fn import_json(&mut self, json: &str) -> Result<ImportSummary, LeaderboardError> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(mut doc) = value else {
            return Err(LeaderboardError::NotAnObject);
        };

        let mut summary = ImportSummary::default();
        if let Some(board @ Value::Array(_)) = doc.remove("board") {
            self.entries = entries_from_value(board);
            summary.board_replaced = true;
        }
        if let Some(Value::String(name)) = doc.get("name") {
            self.name = clean_name(name);
            summary.name_replaced = true;
        }
        log::info!(
            "Imported leaderboard ({} entries, name {:?})",
            self.entries.len(),
            self.name
        );
        Ok(summary)
    }

    /// Load from storage (malformed data degrades to an empty board)
    pub fn load(storage: &dyn Storage) -> Self {
        let entries = storage
            .get(Self::STORAGE_KEY)
            .map(|json| Self::board_from_json(&json))
            .unwrap_or_default();
        let name = storage
            .get(Self::NAME_KEY)
            .map(|n| clean_name(&n))
            .unwrap_or_default();
        log::info!("Loaded {} high scores", entries.len());
        Self { entries, name }
    }

    /// Save to storage (best-effort)
    pub fn save(&self, storage: &mut dyn Storage) {
        match serde_json::to_string(&self.entries) {
            Ok(json) => {
                if storage.set(Self::STORAGE_KEY, &json) {
                    log::debug!("High scores saved ({} entries)", self.entries.len());
                }
            }
            Err(e) => log::warn!("Failed to serialize high scores: {}", e),
        }
        storage.set(Self::NAME_KEY, &self.name);
    }
}

/// Keep the well-formed entries of a JSON array, sorted and capped
fn entries_from_value(value: Value) -> Vec<LeaderboardEntry> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    let mut entries: Vec<LeaderboardEntry> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .map(|mut e: LeaderboardEntry| {
            e.name = clean_name(&e.name);
            e
        })
        .collect();
    // Stable: equal scores keep their stored order
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(MAX_HIGH_SCORES);
    entries
}

/// A leaderboard bound to its storage; every change is written through
pub struct PersistentLeaderboard<S: Storage> {
    board: Leaderboard,
    storage: S,
}

impl<S: Storage> PersistentLeaderboard<S> {
    pub fn open(storage: S) -> Self {
        let board = Leaderboard::load(&storage);
        Self { board, storage }
    }

    pub fn board(&self) -> &Leaderboard {
        &self.board
    }

    fn persist(&mut self) {
        self.board.save(&mut self.storage);
    }

    pub fn remember_name(&mut self, name: &str) {
        self.board.remember_name(name);
        self.persist();
    }

    /// Save a score right now under the remembered (or default) name
    pub fn save_now(&mut self, score: f32, at: f64) -> Option<usize> {
        let name = self.board.name_or(DEFAULT_NAME).to_string();
        self.board.remember_name(&name);
        let rank = self.board.add_score(&name, score as f64, at);
        self.persist();
        rank
    }

    /// Record an unfinished run when the page is closing
    pub fn save_on_unload(&mut self, score: f32, at: f64) {
        if score > 0.0 {
            let name = self.board.name_or(AUTO_NAME).to_string();
            self.board.add_score(&name, score as f64, at);
            self.persist();
        }
    }

    pub fn clear(&mut self) {
        self.board.clear();
        self.persist();
    }

    pub fn export_json(&self) -> String {
        self.board.export_json()
    }

    pub fn import_json(&mut self, json: &str) -> Result<ImportSummary, LeaderboardError> {
        let summary = self.board.import_json(json)?;
        self.persist();
        Ok(summary)
    }
}

impl<S: Storage> ScoreSink for PersistentLeaderboard<S> {
    fn record_run(&mut self, final_score: f32, at: f64) {
        if final_score <= 0.0 {
            return;
        }
        let name = self.board.name_or(DEFAULT_NAME).to_string();
        if let Some(rank) = self.board.add_score(&name, final_score as f64, at) {
            log::info!("{} placed #{} with {:.0}", name, rank, final_score);
        }
        self.persist();
    }
}
