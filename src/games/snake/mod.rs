pub mod render;

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use crate::config::SnakeRules;
use crate::games::Engine;
use crate::input::{Command, Direction};
use crate::random::RandomSource;
use crate::scoring::{snake_score, Assessment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbour in `dir`, wrapped onto a `size`×`size` board.
    pub fn step(self, dir: Direction, size: i32) -> Cell {
        let (dx, dy) = dir.offset();
        Cell {
            x: (self.x + dx).rem_euclid(size),
            y: (self.y + dy).rem_euclid(size),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Running,
    Over,
}

pub struct Snake {
    rules: SnakeRules,
    /// Head first.
    body: VecDeque<Cell>,
    /// Heading used by the last tick; turns are validated against it.
    heading: Direction,
    next_heading: Direction,
    food: Option<Cell>,
    phase: Phase,
}

impl Snake {
    pub fn new(rules: SnakeRules, rng: &mut dyn RandomSource) -> Self {
        let mut snake = Self {
            rules,
            body: VecDeque::new(),
            heading: Direction::Right,
            next_heading: Direction::Right,
            food: None,
            phase: Phase::Ready,
        };
        snake.reset(rng);
        snake
    }

    pub fn grid_size(&self) -> i32 {
        self.rules.grid_size
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Uniform pick among cells the body does not cover, row-major order.
    fn place_food(&mut self, rng: &mut dyn RandomSource) {
        let size = self.rules.grid_size;
        let occupied: HashSet<Cell> = self.body.iter().copied().collect();
        let free: Vec<Cell> = (0..size)
            .flat_map(|y| (0..size).map(move |x| Cell::new(x, y)))
            .filter(|c| !occupied.contains(c))
            .collect();
        self.food = if free.is_empty() {
            None
        } else {
            Some(free[rng.below(free.len())])
        };
    }
}

impl Engine for Snake {
    fn reset(&mut self, rng: &mut dyn RandomSource) {
        let mid = self.rules.grid_size / 2;
        self.body.clear();
        self.body.push_back(Cell::new(mid, mid));
        self.heading = Direction::Right;
        self.next_heading = Direction::Right;
        self.phase = Phase::Ready;
        self.place_food(rng);
    }

    fn apply(&mut self, command: Command, _now: Duration) {
        if self.phase == Phase::Over {
            return;
        }
        if let Command::Move(dir) = command {
            // Only turns onto the other axis; reversing or repeating is ignored.
            if dir.is_horizontal() != self.heading.is_horizontal() {
                self.next_heading = dir;
            }
        }
    }

    fn step(&mut self, _now: Duration, rng: &mut dyn RandomSource) {
        if self.phase == Phase::Over {
            return;
        }
        self.phase = Phase::Running;
        self.heading = self.next_heading;

        let head = self.head().step(self.heading, self.rules.grid_size);
        if self.body.contains(&head) {
            log::debug!("snake bit itself at ({}, {})", head.x, head.y);
            self.phase = Phase::Over;
            return;
        }

        self.body.push_front(head);
        if self.food == Some(head) {
            self.place_food(rng);
            if self.food.is_none() {
                log::debug!("snake filled the board");
                self.phase = Phase::Over;
            }
        } else {
            self.body.pop_back();
        }
    }

    fn assess(&self) -> Assessment {
        Assessment {
            score: snake_score(self.body.len()),
            ended: self.phase == Phase::Over,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{SeededRng, SequenceRng};
    use proptest::prelude::*;

    const T: Duration = Duration::ZERO;

    fn snake_with(body: &[(i32, i32)], food: (i32, i32), heading: Direction) -> Snake {
        let mut rng = SequenceRng::new(vec![0]);
        let mut s = Snake::new(SnakeRules::default(), &mut rng);
        s.body = body.iter().map(|&(x, y)| Cell::new(x, y)).collect();
        s.food = Some(Cell::new(food.0, food.1));
        s.heading = heading;
        s.next_heading = heading;
        s
    }

    #[test]
    fn eats_food_directly_ahead() {
        let mut s = snake_with(&[(10, 10)], (11, 10), Direction::Right);
        let mut rng = SequenceRng::new(vec![123]);
        s.step(T, &mut rng);

        assert_eq!(s.body().len(), 2);
        assert_eq!(s.head(), Cell::new(11, 10));
        let food = s.food().unwrap();
        assert!(!s.body().contains(&food));
        assert_eq!(s.assess(), Assessment::running(1));
    }

    #[test]
    fn moves_without_growing_when_not_eating() {
        let mut s = snake_with(&[(3, 3), (2, 3)], (15, 15), Direction::Right);
        s.step(T, &mut SequenceRng::new(vec![0]));
        assert_eq!(s.body().iter().copied().collect::<Vec<_>>(), vec![Cell::new(4, 3), Cell::new(3, 3)]);
    }

    #[test]
    fn wraps_around_every_edge() {
        let size = SnakeRules::default().grid_size;
        let mut s = snake_with(&[(size - 1, 5)], (0, 0), Direction::Right);
        s.step(T, &mut SequenceRng::new(vec![0]));
        assert_eq!(s.head(), Cell::new(0, 5));

        let mut s = snake_with(&[(4, 0)], (9, 9), Direction::Up);
        s.step(T, &mut SequenceRng::new(vec![0]));
        assert_eq!(s.head(), Cell::new(4, size - 1));
    }

    #[test]
    fn reversal_is_rejected() {
        let mut s = snake_with(&[(5, 5), (4, 5)], (15, 15), Direction::Right);
        s.apply(Command::Move(Direction::Left), T);
        s.step(T, &mut SequenceRng::new(vec![0]));
        assert_eq!(s.head(), Cell::new(6, 5));
        assert_eq!(s.phase(), Phase::Running);
    }

    #[test]
    fn two_turns_in_one_tick_cannot_reverse() {
        let mut s = snake_with(&[(5, 5), (4, 5)], (15, 15), Direction::Right);
        s.apply(Command::Move(Direction::Up), T);
        s.apply(Command::Move(Direction::Left), T);
        s.step(T, &mut SequenceRng::new(vec![0]));
        assert_eq!(s.head(), Cell::new(5, 4));
    }

    #[test]
    fn running_into_body_ends_the_game() {
        let mut s = snake_with(
            &[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)],
            (15, 15),
            Direction::Left,
        );
        s.apply(Command::Move(Direction::Down), T);
        s.step(T, &mut SequenceRng::new(vec![0]));
        assert_eq!(s.phase(), Phase::Over);
        assert_eq!(s.assess(), Assessment::ended(4));

        // Terminal: further ticks and input change nothing.
        s.apply(Command::Move(Direction::Up), T);
        s.step(T, &mut SequenceRng::new(vec![0]));
        assert_eq!(s.body().len(), 5);
    }

    #[test]
    fn filling_the_board_ends_the_game() {
        let rules = SnakeRules {
            grid_size: 4,
            ..SnakeRules::default()
        };
        let mut rng = SequenceRng::new(vec![0]);
        let mut s = Snake::new(rules, &mut rng);
        // Serpentine over the board, leaving (0,3) for the head to eat.
        let mut body = Vec::new();
        for (row, y) in (0..4).rev().enumerate() {
            let xs: Vec<i32> = if row % 2 == 0 { (0..4).collect() } else { (0..4).rev().collect() };
            for x in xs {
                body.push(Cell::new(x, y));
            }
        }
        body.remove(0);
        s.body = body.into_iter().collect();
        s.food = Some(Cell::new(0, 3));
        s.heading = Direction::Left;
        s.next_heading = Direction::Left;
        assert_eq!(s.head(), Cell::new(1, 3));

        s.step(T, &mut rng);
        assert_eq!(s.food(), None);
        assert_eq!(s.assess(), Assessment::ended(15));
    }

    #[test]
    fn reset_is_reproducible_with_fixed_source() {
        let mut a = Snake::new(SnakeRules::default(), &mut SequenceRng::new(vec![77]));
        let b = Snake::new(SnakeRules::default(), &mut SequenceRng::new(vec![77]));
        assert_eq!(a.food(), b.food());
        a.step(T, &mut SequenceRng::new(vec![0]));
        a.reset(&mut SequenceRng::new(vec![77]));
        assert_eq!(a.body().len(), 1);
        assert_eq!(a.food(), b.food());
        assert_eq!(a.phase(), Phase::Ready);
    }

    fn arb_dir() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn prop_head_stays_on_board(seed in any::<u64>(), turns in prop::collection::vec(prop::option::of(arb_dir()), 1..300)) {
            let mut rng = SeededRng::new(seed);
            let mut s = Snake::new(SnakeRules::default(), &mut rng);
            let size = s.grid_size();
            for turn in turns {
                if let Some(d) = turn {
                    s.apply(Command::Move(d), T);
                }
                s.step(T, &mut rng);
                let head = s.head();
                prop_assert!(head.x >= 0 && head.x < size, "x out of bounds: {}", head.x);
                prop_assert!(head.y >= 0 && head.y < size, "y out of bounds: {}", head.y);
                if let Some(food) = s.food() {
                    prop_assert!(!s.body().contains(&food) || s.phase() == Phase::Over);
                }
            }
        }
    }
}
