use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ArcadeError;

const SETTINGS_FILE: &str = "minicade.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed seed for every session; `None` draws one from entropy.
    pub seed: Option<u64>,
    pub frame_ms: u64,
    pub player_name: String,
    pub flyer: FlyerRules,
    pub snake: SnakeRules,
    pub memory: MemoryRules,
    pub puzzle: PuzzleRules,
    pub quiz: QuizRules,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            frame_ms: 16,
            player_name: "PLAYER".to_string(),
            flyer: FlyerRules::default(),
            snake: SnakeRules::default(),
            memory: MemoryRules::default(),
            puzzle: PuzzleRules::default(),
            quiz: QuizRules::default(),
        }
    }
}

impl Settings {
    /// Load from the default location, falling back to defaults on any problem.
    pub fn load() -> Self {
        let path = Self::settings_path();
        if !path.exists() {
            log::info!("no {} found, using default settings", SETTINGS_FILE);
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ArcadeError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ArcadeError> {
        let mut settings: Settings = serde_json::from_str(text)?;
        settings.sanitize();
        Ok(settings)
    }

    fn settings_path() -> PathBuf {
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join(SETTINGS_FILE);
            }
        }
        PathBuf::from(SETTINGS_FILE)
    }

    fn sanitize(&mut self) {
        self.frame_ms = self.frame_ms.max(1);
        self.snake.grid_size = self.snake.grid_size.clamp(4, 64);
        self.puzzle.size = self.puzzle.size.clamp(2, 6);
        self.memory.symbols = self.memory.symbols.clamp(1, MAX_SYMBOLS);
        self.memory.columns = self.memory.columns.max(1);
        if self.quiz.questions.is_empty() {
            log::warn!("quiz has no questions, restoring the built-in set");
            self.quiz.questions = default_questions();
        }
        self.quiz.questions.retain(|q| q.correct < q.options.len());
        if self.quiz.questions.is_empty() {
            self.quiz.questions = default_questions();
        }
        let f = &mut self.flyer;
        let min_height = f.gap + 2.0 * f.clearance;
        if f.field_height < min_height {
            f.field_height = min_height;
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyerRules {
    pub field_width: f32,
    pub field_height: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
    pub speed: f32,
    pub obstacle_width: f32,
    pub gap: f32,
    /// Minimum distance of a gap from either playfield edge.
    pub clearance: f32,
    /// A new obstacle spawns once the last one is this far from the right edge.
    pub spawn_spacing: f32,
    pub actor_x: f32,
    pub actor_size: f32,
    pub start_y: f32,
}

impl Default for FlyerRules {
    fn default() -> Self {
        Self {
            field_width: 400.0,
            field_height: 400.0,
            gravity: 0.5,
            jump_velocity: -8.0,
            speed: 3.0,
            obstacle_width: 60.0,
            gap: 150.0,
            clearance: 50.0,
            spawn_spacing: 250.0,
            actor_x: 60.0,
            actor_size: 30.0,
            start_y: 200.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeRules {
    pub grid_size: i32,
    pub interval_ms: u64,
}

impl Default for SnakeRules {
    fn default() -> Self {
        Self {
            grid_size: 20,
            interval_ms: 150,
        }
    }
}

impl SnakeRules {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Two cards per symbol must fit the cell letters.
pub const MAX_SYMBOLS: usize = 11;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryRules {
    pub symbols: usize,
    pub columns: usize,
    pub lockout_ms: u64,
    pub base: u32,
    pub penalty: u32,
    pub interval_ms: u64,
}

impl Default for MemoryRules {
    fn default() -> Self {
        Self {
            symbols: 8,
            columns: 4,
            lockout_ms: 800,
            base: 100,
            penalty: 1,
            interval_ms: 50,
        }
    }
}

impl MemoryRules {
    pub fn lockout(&self) -> Duration {
        Duration::from_millis(self.lockout_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleRules {
    pub size: usize,
    pub shuffle_moves: u32,
    pub base: u32,
    pub penalty: u32,
    pub interval_ms: u64,
}

impl Default for PuzzleRules {
    fn default() -> Self {
        Self {
            size: 3,
            shuffle_moves: 100,
            base: 200,
            penalty: 2,
            interval_ms: 50,
        }
    }
}

impl PuzzleRules {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: usize,
}

impl Question {
    pub fn new(prompt: &str, options: &[&str], correct: usize) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizRules {
    pub points_per_correct: u32,
    pub advance_ms: u64,
    pub interval_ms: u64,
    pub questions: Vec<Question>,
}

impl Default for QuizRules {
    fn default() -> Self {
        Self {
            points_per_correct: 20,
            advance_ms: 1500,
            interval_ms: 50,
            questions: default_questions(),
        }
    }
}

impl QuizRules {
    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

fn default_questions() -> Vec<Question> {
    vec![
        Question::new(
            "What is the capital of Brazil?",
            &["Sao Paulo", "Rio de Janeiro", "Brasilia", "Salvador"],
            2,
        ),
        Question::new("How many continents are there?", &["5", "6", "7", "8"], 2),
        Question::new(
            "Which is the largest planet in the solar system?",
            &["Earth", "Mars", "Jupiter", "Saturn"],
            2,
        ),
        Question::new(
            "Who painted the Mona Lisa?",
            &["Michelangelo", "Leonardo da Vinci", "Raphael", "Donatello"],
            1,
        ),
        Question::new(
            "Which is the deepest ocean?",
            &["Atlantic", "Pacific", "Indian", "Arctic"],
            1,
        ),
    ]
}
