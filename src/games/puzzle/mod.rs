pub mod render;

use std::time::Duration;

use crate::config::PuzzleRules;
use crate::games::Engine;
use crate::input::{Command, Direction};
use crate::random::RandomSource;
use crate::scoring::{penalized_score, Assessment};

pub const BLANK: u8 = 0;

pub struct Puzzle {
    rules: PuzzleRules,
    tiles: Vec<u8>,
    moves: u32,
}

impl Puzzle {
    pub fn new(rules: PuzzleRules, rng: &mut dyn RandomSource) -> Self {
        let mut puzzle = Self {
            rules,
            tiles: Vec::new(),
            moves: 0,
        };
        puzzle.reset(rng);
        puzzle
    }

    pub fn size(&self) -> usize {
        self.rules.size
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn blank(&self) -> usize {
        self.tiles.iter().position(|&t| t == BLANK).unwrap_or(0)
    }

    /// `[1, 2, ..., n*n - 1, 0]`.
    pub fn is_solved(&self) -> bool {
        let last = self.tiles.len() - 1;
        self.tiles[last] == BLANK
            && self.tiles[..last]
                .iter()
                .enumerate()
                .all(|(i, &t)| t as usize == i + 1)
    }

    pub fn potential_score(&self) -> u32 {
        penalized_score(self.rules.base, self.rules.penalty, self.moves)
    }

    fn solved_board(size: usize) -> Vec<u8> {
        let n = size * size;
        (1..n).map(|t| t as u8).chain(std::iter::once(BLANK)).collect()
    }

    /// Positions orthogonally adjacent to `index`.
    fn neighbours(&self, index: usize) -> Vec<usize> {
        let n = self.rules.size;
        let (row, col) = (index / n, index % n);
        let mut out = Vec::with_capacity(4);
        if row > 0 {
            out.push(index - n);
        }
        if row + 1 < n {
            out.push(index + n);
        }
        if col > 0 {
            out.push(index - 1);
        }
        if col + 1 < n {
            out.push(index + 1);
        }
        out
    }

    /// Slide the tile at `index` into the blank if they touch.
    fn slide(&mut self, index: usize) -> bool {
        let blank = self.blank();
        if !self.neighbours(blank).contains(&index) {
            return false;
        }
        self.tiles.swap(blank, index);
        true
    }

    fn random_swap(&mut self, rng: &mut dyn RandomSource) {
        let blank = self.blank();
        let options = self.neighbours(blank);
        let pick = options[rng.below(options.len())];
        self.tiles.swap(blank, pick);
    }

    /// Tile that moves into the blank when the player pushes towards `dir`.
    fn tile_towards(&self, dir: Direction) -> Option<usize> {
        let n = self.rules.size as i32;
        let blank = self.blank() as i32;
        let (dx, dy) = dir.opposite().offset();
        let (x, y) = (blank % n + dx, blank / n + dy);
        if (0..n).contains(&x) && (0..n).contains(&y) {
            Some((y * n + x) as usize)
        } else {
            None
        }
    }
}

impl Engine for Puzzle {
    fn reset(&mut self, rng: &mut dyn RandomSource) {
        self.tiles = Self::solved_board(self.rules.size);
        for _ in 0..self.rules.shuffle_moves {
            self.random_swap(rng);
        }
        if self.is_solved() {
            self.random_swap(rng);
        }
        self.moves = 0;
        log::debug!("puzzle dealt {:?}", self.tiles);
    }

    fn apply(&mut self, command: Command, _now: Duration) {
        if self.is_solved() {
            return;
        }
        let target = match command {
            Command::SelectCell(i) => Some(i),
            Command::Move(dir) => self.tile_towards(dir),
            _ => None,
        };
        if let Some(i) = target {
            if self.slide(i) {
                self.moves += 1;
            }
        }
    }

    fn step(&mut self, _now: Duration, _rng: &mut dyn RandomSource) {}

    fn assess(&self) -> Assessment {
        if self.is_solved() {
            Assessment::ended(self.potential_score())
        } else {
            Assessment::running(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{SeededRng, SequenceRng};
    use proptest::prelude::*;

    const T: Duration = Duration::ZERO;

    fn with_board(tiles: &[u8]) -> Puzzle {
        let mut p = Puzzle::new(PuzzleRules::default(), &mut SequenceRng::new(vec![0]));
        p.tiles = tiles.to_vec();
        p.moves = 0;
        p
    }

    /// Solvable iff inversions plus the blank's row distance from the bottom
    /// is even (holds for any width).
    fn solvable(tiles: &[u8], size: usize) -> bool {
        let labels: Vec<u8> = tiles.iter().copied().filter(|&t| t != BLANK).collect();
        let mut inversions = 0;
        for i in 0..labels.len() {
            for j in i + 1..labels.len() {
                if labels[i] > labels[j] {
                    inversions += 1;
                }
            }
        }
        let blank_row = tiles.iter().position(|&t| t == BLANK).unwrap() / size;
        if size % 2 == 1 {
            inversions % 2 == 0
        } else {
            (inversions + (size - 1 - blank_row)) % 2 == 0
        }
    }

    #[test]
    fn solved_board_is_complete_with_max_score() {
        let p = with_board(&[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert!(p.is_solved());
        assert_eq!(p.assess(), Assessment::ended(200));
    }

    #[test]
    fn blank_first_is_not_solved() {
        let p = with_board(&[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert!(!p.is_solved());
    }

    #[test]
    fn finishing_move_completes_and_scores() {
        let mut p = with_board(&[1, 2, 3, 4, 5, 6, 7, 0, 8]);
        p.apply(Command::SelectCell(0), T);
        assert_eq!(p.moves(), 0, "non-neighbour is a no-op");
        p.apply(Command::Move(Direction::Left), T);
        assert!(p.is_solved());
        assert_eq!(p.moves(), 1);
        assert_eq!(p.assess(), Assessment::ended(198));

        // Complete boards ignore further input.
        p.apply(Command::Move(Direction::Right), T);
        assert!(p.is_solved());
    }

    #[test]
    fn arrows_push_the_tile_opposite_the_blank() {
        // Blank in the centre.
        let mut p = with_board(&[1, 2, 3, 4, 0, 5, 6, 7, 8]);
        p.apply(Command::Move(Direction::Up), T);
        assert_eq!(p.tiles(), &[1, 2, 3, 4, 7, 5, 6, 0, 8]);
        p.apply(Command::Move(Direction::Up), T);
        assert_eq!(p.moves(), 1, "nothing below the blank");
    }

    #[test]
    fn moves_saturate_the_score_at_zero() {
        let mut p = with_board(&[1, 2, 3, 4, 0, 5, 6, 7, 8]);
        p.moves = 150;
        assert_eq!(p.potential_score(), 0);
    }

    #[test]
    fn shuffle_is_reproducible_and_never_solved() {
        let a = Puzzle::new(PuzzleRules::default(), &mut SequenceRng::new(vec![5, 2, 7, 1]));
        let mut b = Puzzle::new(PuzzleRules::default(), &mut SeededRng::new(3));
        b.reset(&mut SequenceRng::new(vec![5, 2, 7, 1]));
        assert_eq!(a.tiles(), b.tiles());
        assert_eq!(b.moves(), 0);

        // Blank goes up and straight back down, landing on the solved board.
        let rules = PuzzleRules {
            shuffle_moves: 2,
            ..PuzzleRules::default()
        };
        let p = Puzzle::new(rules, &mut SequenceRng::new(vec![0, 1]));
        assert!(!p.is_solved());
        assert_eq!(p.blank(), 5);
    }

    proptest! {
        #[test]
        fn prop_shuffled_boards_are_solvable(seed in any::<u64>(), size in 2usize..=5) {
            let rules = PuzzleRules { size, ..PuzzleRules::default() };
            let mut rng = SeededRng::new(seed);
            let p = Puzzle::new(rules, &mut rng);
            let mut sorted = p.tiles().to_vec();
            sorted.sort_unstable();
            prop_assert_eq!(sorted, (0..(size * size) as u8).collect::<Vec<_>>());
            prop_assert!(solvable(p.tiles(), size));
            prop_assert!(!p.is_solved());
        }

        #[test]
        fn prop_legal_moves_keep_solvability(seed in any::<u64>(), dirs in prop::collection::vec(0usize..4, 0..100)) {
            let mut rng = SeededRng::new(seed);
            let mut p = Puzzle::new(PuzzleRules::default(), &mut rng);
            for d in dirs {
                let dir = [Direction::Up, Direction::Down, Direction::Left, Direction::Right][d];
                p.apply(Command::Move(dir), T);
                prop_assert!(solvable(p.tiles(), 3));
            }
        }
    }
}
