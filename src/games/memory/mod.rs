pub mod render;

use std::time::Duration;

use crate::config::MemoryRules;
use crate::games::Engine;
use crate::input::Command;
use crate::random::RandomSource;
use crate::scheduler::Timer;
use crate::scoring::{penalized_score, Assessment};

pub const SYMBOLS: [&str; 11] = [
    "🍎", "🍌", "🍒", "🍇", "🍉", "🍓", "🍍", "🥝", "🍑", "🍋", "🥥",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Hidden,
    Revealed,
    Matched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub symbol: usize,
    pub face: Face,
}

pub struct Memory {
    rules: MemoryRules,
    cards: Vec<Card>,
    revealed: Vec<usize>,
    lockout: Timer,
    moves: u32,
}

impl Memory {
    pub fn new(rules: MemoryRules, rng: &mut dyn RandomSource) -> Self {
        let mut memory = Self {
            rules,
            cards: Vec::new(),
            revealed: Vec::with_capacity(2),
            lockout: Timer::default(),
            moves: 0,
        };
        memory.reset(rng);
        memory
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn columns(&self) -> usize {
        self.rules.columns
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_locked(&self) -> bool {
        self.lockout.is_armed()
    }

    pub fn is_complete(&self) -> bool {
        self.cards.iter().all(|c| c.face == Face::Matched)
    }

    pub fn matched_pairs(&self) -> usize {
        self.cards.iter().filter(|c| c.face == Face::Matched).count() / 2
    }

    /// What completing the table right now would score.
    pub fn potential_score(&self) -> u32 {
        penalized_score(self.rules.base, self.rules.penalty, self.moves)
    }

    fn resolve(&mut self) {
        if let [a, b] = self.revealed[..] {
            let face = if self.cards[a].symbol == self.cards[b].symbol {
                log::debug!("memory pair matched at {} and {}", a, b);
                Face::Matched
            } else {
                Face::Hidden
            };
            self.cards[a].face = face;
            self.cards[b].face = face;
        }
        self.revealed.clear();
    }
}

impl Engine for Memory {
    fn reset(&mut self, rng: &mut dyn RandomSource) {
        self.cards = (0..self.rules.symbols)
            .flat_map(|symbol| [symbol, symbol])
            .map(|symbol| Card {
                symbol,
                face: Face::Hidden,
            })
            .collect();
        // Fisher-Yates.
        for i in (1..self.cards.len()).rev() {
            let j = rng.below(i + 1);
            self.cards.swap(i, j);
        }
        self.revealed.clear();
        self.lockout.cancel();
        self.moves = 0;
    }

    fn apply(&mut self, command: Command, now: Duration) {
        let Command::SelectCell(i) = command else {
            return;
        };
        if self.lockout.is_armed() || self.revealed.len() >= 2 {
            return;
        }
        match self.cards.get(i) {
            Some(card) if card.face == Face::Hidden => {}
            _ => return,
        }
        self.cards[i].face = Face::Revealed;
        self.revealed.push(i);
        if self.revealed.len() == 2 {
            self.moves += 1;
            self.lockout.arm(now, self.rules.lockout());
        }
    }

    fn step(&mut self, now: Duration, _rng: &mut dyn RandomSource) {
        if self.lockout.fire(now) {
            self.resolve();
        }
    }

    fn assess(&self) -> Assessment {
        if self.is_complete() {
            Assessment::ended(self.potential_score())
        } else {
            Assessment::running(0)
        }
    }

    fn cancel_timers(&mut self) {
        self.lockout.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{SeededRng, SequenceRng};
    use proptest::prelude::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Table dealt in symbol order, each pair side by side.
    fn ordered(symbols: usize) -> Memory {
        let rules = MemoryRules {
            symbols,
            ..MemoryRules::default()
        };
        let mut m = Memory::new(rules, &mut SequenceRng::new(vec![0]));
        m.cards = (0..symbols)
            .flat_map(|s| [s, s])
            .map(|symbol| Card { symbol, face: Face::Hidden })
            .collect();
        m
    }

    fn faces(m: &Memory) -> Vec<Face> {
        m.cards().iter().map(|c| c.face).collect()
    }

    #[test]
    fn mismatch_hides_only_after_lockout() {
        let mut m = ordered(2);
        let mut rng = SequenceRng::new(vec![0]);
        m.apply(Command::SelectCell(0), ms(0));
        m.apply(Command::SelectCell(2), ms(0));
        assert_eq!(m.moves(), 1);
        assert!(m.is_locked());

        let snapshot = m.cards().to_vec();
        m.apply(Command::SelectCell(1), ms(100));
        m.step(ms(799), &mut rng);
        assert_eq!(m.cards(), &snapshot[..]);

        m.step(ms(800), &mut rng);
        assert_eq!(faces(&m), vec![Face::Hidden; 4]);
        assert!(!m.is_locked());
    }

    #[test]
    fn matching_pair_is_kept() {
        let mut m = ordered(2);
        let mut rng = SequenceRng::new(vec![0]);
        m.apply(Command::SelectCell(0), ms(0));
        m.apply(Command::SelectCell(1), ms(0));
        m.step(ms(799), &mut rng);
        assert_eq!(
            faces(&m),
            vec![Face::Revealed, Face::Revealed, Face::Hidden, Face::Hidden]
        );
        assert_eq!(m.matched_pairs(), 0);
        assert!(m.is_locked());

        m.step(ms(800), &mut rng);
        assert_eq!(
            faces(&m),
            vec![Face::Matched, Face::Matched, Face::Hidden, Face::Hidden]
        );
        assert_eq!(m.matched_pairs(), 1);
        assert_eq!(m.assess(), Assessment::running(0));
    }

    #[test]
    fn clearing_the_table_scores_base_minus_moves() {
        let mut m = ordered(2);
        let mut rng = SequenceRng::new(vec![0]);
        // One wasted move, then both pairs.
        for (a, b, t) in [(0, 2, 0), (0, 1, 1000), (2, 3, 2000)] {
            m.apply(Command::SelectCell(a), ms(t));
            m.apply(Command::SelectCell(b), ms(t));
            m.step(ms(t + 800), &mut rng);
        }
        assert!(m.is_complete());
        assert_eq!(m.assess(), Assessment::ended(97));
    }

    #[test]
    fn selecting_a_revealed_or_missing_card_does_nothing() {
        let mut m = ordered(2);
        m.apply(Command::SelectCell(0), ms(0));
        m.apply(Command::SelectCell(0), ms(0));
        m.apply(Command::SelectCell(42), ms(0));
        m.apply(Command::Jump, ms(0));
        assert_eq!(m.moves(), 0);
        assert!(!m.is_locked());
    }

    #[test]
    fn cancelled_lockout_never_resolves() {
        let mut m = ordered(2);
        let mut rng = SequenceRng::new(vec![0]);
        m.apply(Command::SelectCell(0), ms(0));
        m.apply(Command::SelectCell(1), ms(0));
        m.cancel_timers();
        m.cancel_timers();
        m.step(ms(5000), &mut rng);
        assert_eq!(m.matched_pairs(), 0);
    }

    #[test]
    fn deal_is_reproducible_and_holds_pairs() {
        let a = Memory::new(MemoryRules::default(), &mut SequenceRng::new(vec![3, 9, 1, 4]));
        let mut b = Memory::new(MemoryRules::default(), &mut SeededRng::new(1));
        b.reset(&mut SequenceRng::new(vec![3, 9, 1, 4]));
        assert_eq!(a.cards(), b.cards());

        let mut counts = [0; SYMBOLS.len()];
        for c in a.cards() {
            counts[c.symbol] += 1;
        }
        assert!(counts[..8].iter().all(|&n| n == 2));
    }

    proptest! {
        #[test]
        fn prop_never_three_revealed(seed in any::<u64>(), picks in prop::collection::vec((0usize..16, 0u64..400), 1..200)) {
            let mut rng = SeededRng::new(seed);
            let mut m = Memory::new(MemoryRules::default(), &mut rng);
            let mut now = Duration::ZERO;
            for (cell, wait) in picks {
                m.apply(Command::SelectCell(cell), now);
                now += Duration::from_millis(wait);
                m.step(now, &mut rng);
                let revealed = m.cards().iter().filter(|c| c.face == Face::Revealed).count();
                prop_assert!(revealed <= 2);
            }
        }
    }
}
