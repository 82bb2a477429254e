use crate::consts;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::path::{Path, PathBuf};
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

/// One leaderboard row.  Immutable once recorded; the date is display-only.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct ScoreEntry {
    pub(crate) score: u32,
    pub(crate) name: String,
    pub(crate) date: String,
}

/// The ranked, size-capped leaderboard.
///
/// Invariant: `entries` is sorted descending by score and holds at most
/// [`SCOREBOARD_CAPACITY`][consts::SCOREBOARD_CAPACITY] rows.  A board with
/// no backing path lives only in memory (saving is disabled or no data
/// directory could be determined); [`ScoreBoard::save()`] is then a no-op.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct ScoreBoard {
    entries: Vec<ScoreEntry>,
    path: Option<PathBuf>,
}

impl ScoreBoard {
    /// Read the leaderboard at `path`.  A missing file, an unreadable file,
    /// and a file that does not parse all yield an empty board; corruption is
    /// not worth interrupting the player over.  Well-formed input is
    /// re-sorted and re-capped rather than trusted.
    pub(crate) fn load(path: Option<PathBuf>) -> ScoreBoard {
        let entries = path
            .as_deref()
            .and_then(read_entries)
            .unwrap_or_default();
        let mut board = ScoreBoard { entries, path };
        board.normalize();
        board
    }

    pub(crate) fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// The highest-scoring entry, if any
    pub(crate) fn best(&self) -> Option<&ScoreEntry> {
        self.entries.first()
    }

    /// Would `score` earn a spot on the board right now?  Ties with the
    /// current minimum do not qualify.
    pub(crate) fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < consts::SCOREBOARD_CAPACITY {
            return true;
        }
        self.entries.last().is_some_and(|e| score > e.score)
    }

    /// Add a row for `score`, stamped with the current local time.  The name
    /// is trimmed, capped at [`NAME_LIMIT`][consts::NAME_LIMIT] graphemes,
    /// and replaced with [`FALLBACK_NAME`][consts::FALLBACK_NAME] when blank.
    /// Returns `false` (without mutating) when the score does not qualify.
    pub(crate) fn record(&mut self, score: u32, name: &str) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.entries.push(ScoreEntry {
            score,
            name: clean_name(name),
            date: Local::now().format("%Y-%m-%d %H:%M").to_string(),
        });
        self.normalize();
        true
    }

    /// Write the full list to the backing path, creating parent directories
    /// as needed.  A board without a backing path saves nowhere, successfully.
    pub(crate) fn save(&self) -> Result<(), SaveError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(&self.entries).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }

    fn normalize(&mut self) {
        self.entries.sort_by_key(|e| Reverse(e.score));
        self.entries.truncate(consts::SCOREBOARD_CAPACITY);
    }
}

fn read_entries(path: &Path) -> Option<Vec<ScoreEntry>> {
    let src = fs_err::read(path).ok()?;
    serde_json::from_slice(&src).ok()
}

fn clean_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        String::from(consts::FALLBACK_NAME)
    } else {
        trimmed.graphemes(true).take(consts::NAME_LIMIT).collect()
    }
}

#[derive(Debug, Error)]
#[error("Failed to save the leaderboard to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize the leaderboard")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write the leaderboard to disk")]
    Write(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn board_with_scores(scores: &[u32]) -> ScoreBoard {
        let mut board = ScoreBoard::default();
        for &score in scores {
            assert!(board.record(score, "tester"), "seed score should qualify");
        }
        board
    }

    #[rstest]
    #[case(90, true)]
    #[case(21, true)]
    #[case(20, false)]
    #[case(15, false)]
    #[case(0, false)]
    fn qualification_is_strict_at_the_minimum(#[case] score: u32, #[case] qualifies: bool) {
        let board = board_with_scores(&[100, 80, 60, 40, 20]);
        assert_eq!(board.qualifies(score), qualifies);
    }

    #[test]
    fn anything_qualifies_below_capacity() {
        let board = board_with_scores(&[100, 80]);
        assert!(board.qualifies(0));
    }

    #[test]
    fn capacity_keeps_the_top_five() {
        let board = board_with_scores(&[30, 100, 10, 50, 70, 20, 90]);
        let scores = board.entries().iter().map(|e| e.score).collect::<Vec<_>>();
        assert_eq!(scores, [100, 90, 70, 50, 30]);
        assert_eq!(board.best().map(|e| e.score), Some(100));
    }

    #[test]
    fn non_qualifying_record_leaves_the_board_alone() {
        let mut board = board_with_scores(&[100, 80, 60, 40, 20]);
        let before = board.clone();
        assert!(!board.record(20, "latecomer"));
        assert_eq!(board, before);
    }

    #[rstest]
    #[case("", "Anonymous")]
    #[case("   ", "Anonymous")]
    #[case("  Alice  ", "Alice")]
    #[case("Bartholomew Kuma", "Bartholomew ")]
    #[case("日本語テスト一二三四五六七八", "日本語テスト一二三四五六")]
    fn test_clean_name(#[case] raw: &str, #[case] cleaned: &str) {
        assert_eq!(clean_name(raw), cleaned);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir should be creatable");
        let path = dir.path().join("scores.json");
        let mut board = ScoreBoard::load(Some(path.clone()));
        for (score, name) in [(120, "Alice"), (90, "Bob"), (150, "Carol")] {
            assert!(board.record(score, name), "score should qualify");
        }
        board.save().expect("save should succeed");
        let reloaded = ScoreBoard::load(Some(path));
        assert_eq!(reloaded, board);
        let names = reloaded
            .entries()
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["Carol", "Alice", "Bob"]);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir should be creatable");
        let path = dir.path().join("deeply").join("nested").join("scores.json");
        let mut board = ScoreBoard::load(Some(path.clone()));
        assert!(board.record(10, "Dana"));
        board.save().expect("save should create parents");
        assert!(path.exists(), "score file should exist after save");
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir should be creatable");
        let board = ScoreBoard::load(Some(dir.path().join("absent.json")));
        assert!(board.entries().is_empty());
    }

    #[test]
    fn malformed_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir should be creatable");
        let path = dir.path().join("scores.json");
        fs_err::write(&path, "not json at all").expect("test write should succeed");
        let board = ScoreBoard::load(Some(path));
        assert!(board.entries().is_empty());
    }

    #[test]
    fn oversized_unsorted_file_is_normalized_on_load() {
        let dir = tempfile::tempdir().expect("tempdir should be creatable");
        let path = dir.path().join("scores.json");
        let rows = (1..=7)
            .map(|i| ScoreEntry {
                score: i * 10,
                name: format!("p{i}"),
                date: String::from("2026-08-08 12:00"),
            })
            .collect::<Vec<_>>();
        let src = serde_json::to_string(&rows).expect("rows should serialize");
        fs_err::write(&path, src).expect("test write should succeed");
        let board = ScoreBoard::load(Some(path));
        let scores = board.entries().iter().map(|e| e.score).collect::<Vec<_>>();
        assert_eq!(scores, [70, 60, 50, 40, 30]);
    }

    #[test]
    fn memory_only_board_saves_nowhere() {
        let mut board = ScoreBoard::load(None);
        assert!(board.record(42, "Eve"));
        board.save().expect("in-memory save should be a no-op");
    }
}
