pub mod render;

use std::time::Duration;

use crate::config::FlyerRules;
use crate::games::Engine;
use crate::input::Command;
use crate::random::RandomSource;
use crate::scoring::Assessment;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Leading (left) edge.
    pub x: f32,
    /// Top of the passable opening.
    pub gap_top: f32,
    /// Set once the obstacle has fully passed the actor.
    pub cleared: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Running,
    Terminal,
}

pub struct Flyer {
    rules: FlyerRules,
    y: f32,
    velocity: f32,
    obstacles: Vec<Obstacle>,
    cleared: u32,
    phase: Phase,
}

impl Flyer {
    pub fn new(rules: FlyerRules, rng: &mut dyn RandomSource) -> Self {
        let mut flyer = Self {
            rules,
            y: 0.0,
            velocity: 0.0,
            obstacles: Vec::new(),
            cleared: 0,
            phase: Phase::Ready,
        };
        flyer.reset(rng);
        flyer
    }

    pub fn rules(&self) -> &FlyerRules {
        &self.rules
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn spawn(&mut self, rng: &mut dyn RandomSource) {
        let r = &self.rules;
        let span = (r.field_height - r.gap - 2.0 * r.clearance).max(0.0);
        let gap_top = r.clearance + rng.unit() * span;
        self.obstacles.push(Obstacle {
            x: r.field_width,
            gap_top,
            cleared: false,
        });
    }

    fn overlaps_actor(&self, o: &Obstacle) -> bool {
        let r = &self.rules;
        o.x < r.actor_x + r.actor_size && o.x + r.obstacle_width > r.actor_x
    }

    fn inside_gap(&self, o: &Obstacle) -> bool {
        self.y >= o.gap_top && self.y + self.rules.actor_size <= o.gap_top + self.rules.gap
    }

    fn terminate(&mut self, why: &str) {
        log::debug!("flyer down ({}) with {} cleared", why, self.cleared);
        self.phase = Phase::Terminal;
    }
}

impl Engine for Flyer {
    fn reset(&mut self, rng: &mut dyn RandomSource) {
        self.y = self.rules.start_y;
        self.velocity = 0.0;
        self.obstacles.clear();
        self.cleared = 0;
        self.phase = Phase::Ready;
        self.spawn(rng);
    }

    fn apply(&mut self, command: Command, _now: Duration) {
        if self.phase == Phase::Terminal {
            return;
        }
        if command == Command::Jump {
            self.velocity = self.rules.jump_velocity;
        }
    }

    fn step(&mut self, _now: Duration, rng: &mut dyn RandomSource) {
        if self.phase == Phase::Terminal {
            return;
        }
        self.phase = Phase::Running;

        // Semi-implicit Euler.
        self.velocity += self.rules.gravity;
        self.y += self.velocity;
        if self.y < 0.0 || self.y + self.rules.actor_size > self.rules.field_height {
            self.terminate("left the playfield");
            return;
        }

        let speed = self.rules.speed;
        let width = self.rules.obstacle_width;
        for o in &mut self.obstacles {
            o.x -= speed;
        }
        self.obstacles.retain(|o| o.x + width > 0.0);
        let spawn_line = self.rules.field_width - self.rules.spawn_spacing;
        match self.obstacles.last() {
            Some(last) if last.x >= spawn_line => {}
            _ => self.spawn(rng),
        }

        if self
            .obstacles
            .iter()
            .any(|o| self.overlaps_actor(o) && !self.inside_gap(o))
        {
            self.terminate("hit an obstacle");
            return;
        }

        let actor_x = self.rules.actor_x;
        for o in &mut self.obstacles {
            if !o.cleared && o.x + width <= actor_x {
                o.cleared = true;
                self.cleared += 1;
            }
        }
    }

    fn assess(&self) -> Assessment {
        Assessment {
            score: self.cleared,
            ended: self.phase == Phase::Terminal,
        }
    }
}
