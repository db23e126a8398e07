use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

pub trait RandomSource {
    fn below(&mut self, bound: usize) -> usize;

    fn unit(&mut self) -> f32;
}

pub struct SeededRng {
    rng: Pcg32,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    // The seed is logged so a run can be replayed.
    pub fn from_entropy() -> Self {
        let seed = rand::thread_rng().gen::<u64>();
        log::info!("random seed {}", seed);
        Self::new(seed)
    }
}

impl RandomSource for SeededRng {
    fn below(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }

    fn unit(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }
}

/// Replays fixed values, cycling. `unit` reads them as thousandths.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<usize>,
    cursor: usize,
}

#[cfg(test)]
impl SequenceRng {
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, cursor: 0 }
    }

    fn next_raw(&mut self) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

#[cfg(test)]
impl RandomSource for SequenceRng {
    fn below(&mut self, bound: usize) -> usize {
        self.next_raw() % bound.max(1)
    }

    fn unit(&mut self) -> f32 {
        (self.next_raw() % 1000) as f32 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut a = SeededRng::new(7);
        let mut b = SeededRng::new(7);
        for _ in 0..32 {
            assert_eq!(a.below(100), b.below(100));
        }
        assert_eq!(a.unit(), b.unit());
    }

    #[test]
    fn seeded_rng_stays_in_range() {
        let mut rng = SeededRng::new(42);
        for _ in 0..1000 {
            assert!(rng.below(3) < 3);
            let u = rng.unit();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn sequence_rng_cycles() {
        let mut rng = SequenceRng::new(vec![1, 5]);
        assert_eq!(rng.below(4), 1);
        assert_eq!(rng.below(4), 1);
        assert_eq!(rng.below(10), 1);
        assert_eq!(rng.unit(), 0.005);
    }

    #[test]
    fn empty_sequence_yields_zero() {
        let mut rng = SequenceRng::new(Vec::new());
        assert_eq!(rng.below(9), 0);
        assert_eq!(rng.unit(), 0.0);
    }
}
