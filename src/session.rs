//! The one surface a game exposes to the arcade around it.
//!
//! A `Session` owns an engine, its scheduler and its random source. The host
//! flips the playing flag, feeds commands and pumps it with clock readings;
//! the session answers through two callbacks, one for live score changes and
//! one for the end of the game.
//!
//! Engines see *play time*: the clock only advances while the session is
//! running, so a paused game keeps its pending lockouts exactly where they
//! were.

use std::collections::VecDeque;
use std::ops::ControlFlow;
use std::time::Duration;

use crate::config::Settings;
use crate::error::ArcadeError;
use crate::games::{GameKind, Machine};
use crate::input::Command;
use crate::random::RandomSource;
use crate::scheduler::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    Paused,
    Ended,
}

pub struct Callbacks {
    pub on_score_change: Box<dyn FnMut(u32)>,
    pub on_game_end: Box<dyn FnMut(u32)>,
}

/// Everything a scheduler step touches, split from the scheduler so the
/// step closure can borrow it while the scheduler drives.
struct Core {
    machine: Machine,
    rng: Box<dyn RandomSource>,
    pending: VecDeque<Command>,
    callbacks: Callbacks,
    reported: u32,
    ended: bool,
    elapsed_ticks: u64,
    play_time: Duration,
}

impl Core {
    fn step(&mut self) -> ControlFlow<()> {
        if self.ended {
            return ControlFlow::Break(());
        }
        let now = self.play_time;
        let engine = self.machine.engine_mut();
        while let Some(command) = self.pending.pop_front() {
            engine.apply(command, now);
        }
        engine.step(now, self.rng.as_mut());
        self.elapsed_ticks += 1;

        let assessment = engine.assess();
        if assessment.score != self.reported {
            self.reported = assessment.score;
            (self.callbacks.on_score_change)(assessment.score);
        }
        if assessment.ended {
            self.finish();
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }

    /// Latch the end of the game and report the final score, once.
    fn finish(&mut self) {
        self.machine.engine_mut().cancel_timers();
        if self.ended {
            return;
        }
        self.ended = true;
        log::info!(
            "{} ended with {} after {} ticks",
            self.machine.kind().id(),
            self.reported,
            self.elapsed_ticks
        );
        (self.callbacks.on_game_end)(self.reported);
    }
}

pub struct Session {
    scheduler: Scheduler,
    core: Core,
    status: Status,
    playing: bool,
    /// Wall reading at the last play clock update while running.
    wall: Option<Duration>,
    started_at: Option<Duration>,
}

impl Session {
    pub fn open(
        id: &str,
        settings: &Settings,
        mut rng: Box<dyn RandomSource>,
        callbacks: Callbacks,
    ) -> Result<Session, ArcadeError> {
        let kind = GameKind::from_id(id)?;
        let machine = Machine::new(kind, settings, rng.as_mut());
        log::info!("opened {}", kind.id());
        Ok(Session {
            scheduler: Scheduler::new(kind.cadence(settings)),
            core: Core {
                machine,
                rng,
                pending: VecDeque::new(),
                callbacks,
                reported: 0,
                ended: false,
                elapsed_ticks: 0,
                play_time: Duration::ZERO,
            },
            status: Status::Idle,
            playing: false,
            wall: None,
            started_at: None,
        })
    }

    /// Start or stop the game loop. Repeating the current value does nothing.
    pub fn set_playing(&mut self, playing: bool, now: Duration) {
        if playing == self.playing {
            return;
        }
        self.playing = playing;
        if playing {
            if self.status == Status::Ended {
                return;
            }
            self.started_at.get_or_insert(now);
            self.resume(now);
        } else {
            self.advance_clock(now);
            self.scheduler.stop();
            self.wall = None;
            self.core.pending.clear();
            if self.status == Status::Running {
                self.status = Status::Paused;
            }
        }
    }

    /// Queue a command for the next step. Only a running game takes input.
    pub fn submit(&mut self, command: Command) {
        if self.status == Status::Running {
            self.core.pending.push_back(command);
        }
    }

    /// Run the steps due at wall time `now`. Returns how many ran.
    pub fn pump(&mut self, now: Duration) -> u32 {
        if self.status != Status::Running {
            return 0;
        }
        self.advance_clock(now);
        let core = &mut self.core;
        let ran = self.scheduler.pump(core.play_time, || core.step());
        if self.core.ended {
            self.status = Status::Ended;
            self.wall = None;
            self.core.pending.clear();
        }
        ran
    }

    /// Deal a fresh game. No callbacks fire; the host reads `score()`.
    pub fn reset(&mut self, now: Duration) {
        self.scheduler.stop();
        let core = &mut self.core;
        let engine = core.machine.engine_mut();
        engine.cancel_timers();
        engine.reset(core.rng.as_mut());
        core.pending.clear();
        core.reported = 0;
        core.ended = false;
        core.elapsed_ticks = 0;
        log::info!("reset {}", core.machine.kind().id());

        if self.playing {
            self.started_at.get_or_insert(now);
            self.resume(now);
        } else {
            self.status = Status::Idle;
        }
    }

    /// The player walked away. Reports the current score as final unless
    /// the game already ended on its own.
    pub fn abandon(&mut self) {
        self.scheduler.stop();
        self.wall = None;
        self.core.pending.clear();
        self.core.finish();
        self.status = Status::Ended;
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.core.reported
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.core.elapsed_ticks
    }

    /// Time spent running, excluding pauses.
    pub fn play_time(&self) -> Duration {
        self.core.play_time
    }

    /// Wall reading of the first start, if any.
    pub fn started_at(&self) -> Option<Duration> {
        self.started_at
    }

    pub fn kind(&self) -> GameKind {
        self.core.machine.kind()
    }

    pub fn machine(&self) -> &Machine {
        &self.core.machine
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    fn resume(&mut self, now: Duration) {
        self.wall = Some(now);
        self.scheduler.start(self.core.play_time);
        self.status = Status::Running;
        log::debug!(
            "{} running, run {}",
            self.core.machine.kind().id(),
            self.scheduler.generation()
        );
    }

    fn advance_clock(&mut self, now: Duration) {
        if let Some(prev) = self.wall {
            self.core.play_time += now.saturating_sub(prev);
            self.wall = Some(now);
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.scheduler.stop();
        self.core.machine.engine_mut().cancel_timers();
    }
}
