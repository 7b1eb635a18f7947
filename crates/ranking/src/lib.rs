//! Per-mode score rankings and their JSON persistence
//!
//! Each mode keeps its best five scores, highest first; the high score shown
//! during play is just the head of that list.
//!
//! ```
//! use blockfall_ranking::Ranking;
//! use blockfall_types::GameMode;
//!
//! let mut ranking = Ranking::default();
//! ranking.record(GameMode::Normal, 1200);
//! ranking.record(GameMode::Normal, 300);
//! assert_eq!(ranking.high_score(GameMode::Normal), 1200);
//! assert_eq!(ranking.high_score(GameMode::TimeAttack), 0);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use blockfall_types::{GameMode, RANKING_SIZE};

/// Environment variable overriding the ranking file location
pub const SCORE_PATH_ENV: &str = "BLOCKFALL_SCORE_PATH";

/// Default ranking file, relative to the working directory
pub const DEFAULT_SCORE_FILE: &str = "score.json";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ranking {
    normal: Vec<u32>,
    time_attack: Vec<u32>,
}

impl Ranking {
    fn list(&self, mode: GameMode) -> &Vec<u32> {
        match mode {
            GameMode::Normal => &self.normal,
            GameMode::TimeAttack => &self.time_attack,
        }
    }

    fn list_mut(&mut self, mode: GameMode) -> &mut Vec<u32> {
        match mode {
            GameMode::Normal => &mut self.normal,
            GameMode::TimeAttack => &mut self.time_attack,
        }
    }

    /// Scores for `mode`, highest first
    pub fn scores(&self, mode: GameMode) -> &[u32] {
        self.list(mode)
    }

    /// Best score for `mode`, 0 when nothing is recorded
    pub fn high_score(&self, mode: GameMode) -> u32 {
        self.list(mode).first().copied().unwrap_or(0)
    }

    /// Insert a finished game's score.
    ///
    /// Returns the 0-based rank it landed at, or `None` if it did not make
    /// the list.
    pub fn record(&mut self, mode: GameMode, score: u32) -> Option<usize> {
        let list = self.list_mut(mode);
        // Ties go after existing entries.
        let rank = list.iter().position(|&s| score > s).unwrap_or(list.len());
        if rank >= RANKING_SIZE {
            return None;
        }
        list.insert(rank, score);
        list.truncate(RANKING_SIZE);
        Some(rank)
    }

    fn normalized(mut self) -> Self {
        for list in [&mut self.normal, &mut self.time_attack] {
            list.sort_unstable_by(|a, b| b.cmp(a));
            list.truncate(RANKING_SIZE);
        }
        self
    }
}

/// On-disk layout of the ranking file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
struct RankingFile {
    #[serde(default)]
    normal_high_score: u32,
    #[serde(default)]
    normal_ranking: Vec<u32>,
    #[serde(default)]
    time_attack_high_score: u32,
    #[serde(default)]
    time_attack_ranking: Vec<u32>,
}

impl From<&Ranking> for RankingFile {
    fn from(ranking: &Ranking) -> Self {
        Self {
            normal_high_score: ranking.high_score(GameMode::Normal),
            normal_ranking: ranking.normal.clone(),
            time_attack_high_score: ranking.high_score(GameMode::TimeAttack),
            time_attack_ranking: ranking.time_attack.clone(),
        }
    }
}

impl From<RankingFile> for Ranking {
    fn from(file: RankingFile) -> Self {
        Ranking {
            normal: file.normal_ranking,
            time_attack: file.time_attack_ranking,
        }
        .normalized()
    }
}

/// JSON file holding the rankings of both modes
#[derive(Debug, Clone)]
pub struct RankingStore {
    path: PathBuf,
}

impl RankingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location from `BLOCKFALL_SCORE_PATH`, or `score.json` in the working
    /// directory
    pub fn from_env() -> Self {
        let path = std::env::var_os(SCORE_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCORE_FILE));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the ranking; a missing or unreadable file yields an empty one
    pub fn load(&self) -> Ranking {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ranking::default(),
            Err(e) => {
                eprintln!("[Ranking] Failed to read {}: {}", self.path.display(), e);
                return Ranking::default();
            }
        };

        match serde_json::from_slice::<RankingFile>(&bytes) {
            Ok(file) => file.into(),
            Err(e) => {
                eprintln!(
                    "[Ranking] Ignoring corrupt ranking file {}: {}",
                    self.path.display(),
                    e
                );
                Ranking::default()
            }
        }
    }

    pub fn save(&self, ranking: &Ranking) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        let text = serde_json::to_string_pretty(&RankingFile::from(ranking))
            .context("serializing ranking")?;
        fs::write(&self.path, text)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("blockfall-ranking-{}-{}", std::process::id(), name));
        path
    }

    #[test]
    fn record_keeps_top_five_descending() {
        let mut ranking = Ranking::default();
        for score in [300, 900, 100, 500, 700, 200] {
            ranking.record(GameMode::Normal, score);
        }
        assert_eq!(ranking.scores(GameMode::Normal), &[900, 700, 500, 300, 200]);
        assert_eq!(ranking.high_score(GameMode::Normal), 900);
        assert!(ranking.scores(GameMode::TimeAttack).is_empty());
    }

    #[test]
    fn record_reports_rank() {
        let mut ranking = Ranking::default();
        assert_eq!(ranking.record(GameMode::TimeAttack, 50), Some(0));
        assert_eq!(ranking.record(GameMode::TimeAttack, 80), Some(0));
        assert_eq!(ranking.record(GameMode::TimeAttack, 50), Some(2));
        for _ in 0..2 {
            ranking.record(GameMode::TimeAttack, 60);
        }
        assert_eq!(ranking.record(GameMode::TimeAttack, 10), None);
        assert_eq!(ranking.scores(GameMode::TimeAttack).len(), RANKING_SIZE);
    }

    #[test]
    fn file_format_field_names() {
        let mut ranking = Ranking::default();
        ranking.record(GameMode::Normal, 420);
        let value = serde_json::to_value(RankingFile::from(&ranking)).expect("serializes");
        assert_eq!(value["normal_high_score"], 420);
        assert_eq!(value["normal_ranking"][0], 420);
        assert_eq!(value["time_attack_high_score"], 0);
        assert!(value["time_attack_ranking"].as_array().expect("array").is_empty());
    }

    #[test]
    fn serde_defaults_fill_missing_fields() {
        let parsed: RankingFile =
            serde_json::from_str(r#"{"normal_ranking":[10,300,20]}"#).expect("parses");
        let ranking = Ranking::from(parsed);
        assert_eq!(ranking.scores(GameMode::Normal), &[300, 20, 10]);
        assert_eq!(ranking.high_score(GameMode::TimeAttack), 0);
    }

    #[test]
    fn store_save_then_load() {
        let path = temp_path("nested").join("score.json");
        let store = RankingStore::new(&path);
        let mut ranking = Ranking::default();
        ranking.record(GameMode::Normal, 1500);
        ranking.record(GameMode::TimeAttack, 700);

        store.save(&ranking).expect("save succeeds");
        assert_eq!(store.load(), ranking);

        let _ = fs::remove_dir_all(path.parent().expect("has parent"));
    }

    #[test]
    fn store_missing_or_corrupt_file_is_empty() {
        let missing = RankingStore::new(temp_path("missing.json"));
        assert_eq!(missing.load(), Ranking::default());

        let path = temp_path("corrupt.json");
        fs::write(&path, "not json").expect("write fixture");
        assert_eq!(RankingStore::new(&path).load(), Ranking::default());
        let _ = fs::remove_file(&path);
    }
}
