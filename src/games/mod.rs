pub mod flyer;
pub mod memory;
pub mod puzzle;
pub mod quiz;
pub mod snake;

use std::time::Duration;

use crate::config::Settings;
use crate::error::ArcadeError;
use crate::input::Command;
use crate::random::RandomSource;
use crate::scheduler::Cadence;
use crate::scoring::Assessment;

/// The shape every game engine shares. All mutation happens inside `apply`
/// and `step`, both called from the session's scheduler step.
pub trait Engine {
    fn reset(&mut self, rng: &mut dyn RandomSource);

    fn apply(&mut self, command: Command, now: Duration);

    /// Advance one tick. `now` is session play time.
    fn step(&mut self, now: Duration, rng: &mut dyn RandomSource);

    fn assess(&self) -> Assessment;

    /// Drop any pending timed transition. Must be safe to call repeatedly.
    fn cancel_timers(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    Snake,
    Flyer,
    Memory,
    Puzzle,
    Quiz,
}

impl GameKind {
    pub fn all() -> &'static [GameKind] {
        &[
            GameKind::Snake,
            GameKind::Flyer,
            GameKind::Memory,
            GameKind::Puzzle,
            GameKind::Quiz,
        ]
    }

    pub fn from_id(id: &str) -> Result<GameKind, ArcadeError> {
        match id.trim().to_ascii_lowercase().as_str() {
            "snake" => Ok(GameKind::Snake),
            "flappy" | "flyer" => Ok(GameKind::Flyer),
            "memory" => Ok(GameKind::Memory),
            "puzzle" => Ok(GameKind::Puzzle),
            "quiz" => Ok(GameKind::Quiz),
            _ => Err(ArcadeError::UnknownGame(id.to_string())),
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            GameKind::Snake => "snake",
            GameKind::Flyer => "flappy",
            GameKind::Memory => "memory",
            GameKind::Puzzle => "puzzle",
            GameKind::Quiz => "quiz",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameKind::Snake => "Snake",
            GameKind::Flyer => "Flyer",
            GameKind::Memory => "Memory",
            GameKind::Puzzle => "Puzzle",
            GameKind::Quiz => "Quiz",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            GameKind::Snake => "🐍",
            GameKind::Flyer => "🐦",
            GameKind::Memory => "🧠",
            GameKind::Puzzle => "🧩",
            GameKind::Quiz => "❓",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            GameKind::Snake => 0,
            GameKind::Flyer => 1,
            GameKind::Memory => 2,
            GameKind::Puzzle => 3,
            GameKind::Quiz => 4,
        }
    }

    pub fn cadence(&self, settings: &Settings) -> Cadence {
        match self {
            GameKind::Flyer => Cadence::Variable,
            GameKind::Snake => Cadence::Fixed(settings.snake.interval()),
            GameKind::Memory => Cadence::Fixed(settings.memory.interval()),
            GameKind::Puzzle => Cadence::Fixed(settings.puzzle.interval()),
            GameKind::Quiz => Cadence::Fixed(settings.quiz.interval()),
        }
    }
}

/// One concrete engine. Kept as an enum so the renderer can reach the
/// concrete state while the session drives it through `Engine`.
pub enum Machine {
    Snake(snake::Snake),
    Flyer(flyer::Flyer),
    Memory(memory::Memory),
    Puzzle(puzzle::Puzzle),
    Quiz(quiz::Quiz),
}

impl Machine {
    pub fn new(kind: GameKind, settings: &Settings, rng: &mut dyn RandomSource) -> Self {
        match kind {
            GameKind::Snake => Machine::Snake(snake::Snake::new(settings.snake.clone(), rng)),
            GameKind::Flyer => Machine::Flyer(flyer::Flyer::new(settings.flyer.clone(), rng)),
            GameKind::Memory => Machine::Memory(memory::Memory::new(settings.memory.clone(), rng)),
            GameKind::Puzzle => Machine::Puzzle(puzzle::Puzzle::new(settings.puzzle.clone(), rng)),
            GameKind::Quiz => Machine::Quiz(quiz::Quiz::new(settings.quiz.clone())),
        }
    }

    pub fn kind(&self) -> GameKind {
        match self {
            Machine::Snake(_) => GameKind::Snake,
            Machine::Flyer(_) => GameKind::Flyer,
            Machine::Memory(_) => GameKind::Memory,
            Machine::Puzzle(_) => GameKind::Puzzle,
            Machine::Quiz(_) => GameKind::Quiz,
        }
    }

    pub fn engine_mut(&mut self) -> &mut dyn Engine {
        match self {
            Machine::Snake(g) => g,
            Machine::Flyer(g) => g,
            Machine::Memory(g) => g,
            Machine::Puzzle(g) => g,
            Machine::Quiz(g) => g,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for kind in GameKind::all() {
            assert_eq!(GameKind::from_id(kind.id()).unwrap(), *kind);
        }
        assert_eq!(GameKind::from_id("Flyer").unwrap(), GameKind::Flyer);
    }

    #[test]
    fn unknown_id_is_named() {
        match GameKind::from_id("tetris") {
            Err(ArcadeError::UnknownGame(id)) => assert_eq!(id, "tetris"),
            other => panic!("expected UnknownGame, got {:?}", other.map(|k| k.id())),
        }
    }

    #[test]
    fn continuous_flyer_uses_variable_rate() {
        let settings = Settings::default();
        assert_eq!(GameKind::Flyer.cadence(&settings), Cadence::Variable);
        assert_eq!(
            GameKind::Snake.cadence(&settings),
            Cadence::Fixed(Duration::from_millis(150))
        );
    }
}
