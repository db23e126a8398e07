#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Assessment {
    pub score: u32,
    pub ended: bool,
}

impl Assessment {
    pub fn running(score: u32) -> Self {
        Self { score, ended: false }
    }

    pub fn ended(score: u32) -> Self {
        Self { score, ended: true }
    }
}

pub fn snake_score(body_len: usize) -> u32 {
    body_len.saturating_sub(1) as u32
}

pub fn penalized_score(base: u32, penalty: u32, moves: u32) -> u32 {
    base.saturating_sub(penalty.saturating_mul(moves))
}

pub fn quiz_score(correct: u32, points_per_correct: u32) -> u32 {
    correct.saturating_mul(points_per_correct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn penalized_score_floors_at_zero() {
        assert_eq!(penalized_score(200, 2, 0), 200);
        assert_eq!(penalized_score(200, 2, 37), 126);
        assert_eq!(penalized_score(200, 2, 100), 0);
        assert_eq!(penalized_score(100, 1, u32::MAX), 0);
    }

    #[test]
    fn snake_score_is_growth() {
        assert_eq!(snake_score(1), 0);
        assert_eq!(snake_score(6), 5);
        assert_eq!(snake_score(0), 0);
    }

    #[test]
    fn quiz_score_scales_with_correct_answers() {
        assert_eq!(quiz_score(0, 20), 0);
        assert_eq!(quiz_score(3, 20), 60);
    }
}
