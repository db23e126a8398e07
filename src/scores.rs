use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ArcadeError;
use crate::games::GameKind;

const SCORES_FILE: &str = "minicade.scores.json";
pub const SCORES_PER_GAME: usize = 3;
const NAME_LEN: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct GameRecord {
    best: Vec<ScoreEntry>,
    games_played: u32,
    play_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct ScoreTable {
    games: BTreeMap<String, GameRecord>,
}

pub struct HighScores {
    table: ScoreTable,
    path: Option<PathBuf>,
}

impl HighScores {
    pub fn load() -> Self {
        let path = Self::scores_path();
        let table = if path.exists() {
            match Self::read(&path) {
                Ok(table) => table,
                Err(e) => {
                    log::warn!("ignoring {}: {}", path.display(), e);
                    ScoreTable::default()
                }
            }
        } else {
            ScoreTable::default()
        };
        Self {
            table,
            path: Some(path),
        }
    }

    /// A table that is never written anywhere.
    pub fn in_memory() -> Self {
        Self {
            table: ScoreTable::default(),
            path: None,
        }
    }

    fn scores_path() -> PathBuf {
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join(SCORES_FILE);
            }
        }
        PathBuf::from(SCORES_FILE)
    }

    fn read(path: &Path) -> Result<ScoreTable, ArcadeError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn write(&self) -> Result<(), ArcadeError> {
        if let Some(path) = &self.path {
            let text = serde_json::to_string_pretty(&self.table)?;
            fs::write(path, text)?;
        }
        Ok(())
    }

    pub fn save(&self) {
        if let Err(e) = self.write() {
            log::warn!("could not save scores: {}", e);
        }
    }

    fn record_mut(&mut self, kind: GameKind) -> &mut GameRecord {
        self.table.games.entry(kind.id().to_string()).or_default()
    }

    /// Would `score` make the top three?
    pub fn qualifies(&self, kind: GameKind, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        let best = self.top_scores(kind);
        best.len() < SCORES_PER_GAME || best.iter().any(|e| score > e.score)
    }

    /// Record a finished game. Returns true if it entered the top three.
    pub fn submit(&mut self, kind: GameKind, name: &str, score: u32) -> bool {
        let qualifies = self.qualifies(kind, score);
        let record = self.record_mut(kind);
        record.games_played += 1;
        if qualifies {
            let name: String = name.chars().take(NAME_LEN).collect();
            let at = record
                .best
                .iter()
                .position(|e| score > e.score)
                .unwrap_or(record.best.len());
            record.best.insert(at, ScoreEntry { name, score });
            record.best.truncate(SCORES_PER_GAME);
            log::info!("new best for {}: {}", kind.id(), score);
        }
        self.save();
        qualifies
    }

    pub fn add_play_time(&mut self, kind: GameKind, played: Duration) {
        self.record_mut(kind).play_secs += played.as_secs();
    }

    pub fn top_scores(&self, kind: GameKind) -> &[ScoreEntry] {
        self.table
            .games
            .get(kind.id())
            .map(|r| r.best.as_slice())
            .unwrap_or(&[])
    }

    pub fn games_played(&self, kind: GameKind) -> u32 {
        self.table.games.get(kind.id()).map_or(0, |r| r.games_played)
    }

    pub fn total_play_time(&self) -> Duration {
        Duration::from_secs(self.table.games.values().map(|r| r.play_secs).sum())
    }
}
