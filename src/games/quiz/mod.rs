pub mod render;

use std::time::Duration;

use crate::config::{Question, QuizRules};
use crate::games::Engine;
use crate::input::Command;
use crate::random::RandomSource;
use crate::scheduler::Timer;
use crate::scoring::{quiz_score, Assessment};

pub struct Quiz {
    rules: QuizRules,
    cursor: usize,
    selected: Option<usize>,
    correct: u32,
    advance: Timer,
}

impl Quiz {
    pub fn new(rules: QuizRules) -> Self {
        Self {
            rules,
            cursor: 0,
            selected: None,
            correct: 0,
            advance: Timer::default(),
        }
    }

    /// `None` once the last question has been passed.
    pub fn current(&self) -> Option<&Question> {
        self.rules.questions.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn total(&self) -> usize {
        self.rules.questions.len()
    }

    /// The option chosen for the current question, if answered.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.rules.questions.len()
    }
}

impl Engine for Quiz {
    // Question order is fixed.
    fn reset(&mut self, _rng: &mut dyn RandomSource) {
        self.cursor = 0;
        self.selected = None;
        self.correct = 0;
        self.advance.cancel();
    }

    fn apply(&mut self, command: Command, now: Duration) {
        let Command::SelectOption(choice) = command else {
            return;
        };
        if self.selected.is_some() {
            return;
        }
        let Some(question) = self.current() else {
            return;
        };
        if choice >= question.options.len() {
            return;
        }
        let right = choice == question.correct;
        log::debug!(
            "quiz question {} answered with {} ({})",
            self.cursor,
            choice,
            if right { "correct" } else { "wrong" }
        );
        if right {
            self.correct += 1;
        }
        self.selected = Some(choice);
        self.advance.arm(now, self.rules.advance_delay());
    }

    fn step(&mut self, now: Duration, _rng: &mut dyn RandomSource) {
        if self.advance.fire(now) {
            self.cursor += 1;
            self.selected = None;
        }
    }

    fn assess(&self) -> Assessment {
        Assessment {
            score: quiz_score(self.correct, self.rules.points_per_correct),
            ended: self.is_complete(),
        }
    }

    fn cancel_timers(&mut self) {
        self.advance.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRng;
    use proptest::prelude::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Answer every question with the given choices, waiting out each delay.
    fn play(quiz: &mut Quiz, choices: &[usize]) {
        let mut rng = SequenceRng::new(vec![0]);
        let mut now = Duration::ZERO;
        for &c in choices {
            quiz.apply(Command::SelectOption(c), now);
            now += ms(1500);
            quiz.step(now, &mut rng);
        }
    }

    #[test]
    fn all_correct_scores_a_hundred() {
        let mut q = Quiz::new(QuizRules::default());
        play(&mut q, &[2, 2, 2, 1, 1]);
        assert!(q.is_complete());
        assert_eq!(q.assess(), Assessment::ended(100));
        assert!(q.current().is_none());
    }

    #[test]
    fn second_answer_on_the_same_question_is_ignored() {
        let mut q = Quiz::new(QuizRules::default());
        q.apply(Command::SelectOption(0), ms(0));
        q.apply(Command::SelectOption(2), ms(10));
        assert_eq!(q.selected(), Some(0));
        assert_eq!(q.correct(), 0);

        q.step(ms(1499), &mut SequenceRng::new(vec![0]));
        assert_eq!(q.cursor(), 0);
        q.step(ms(1500), &mut SequenceRng::new(vec![0]));
        assert_eq!(q.cursor(), 1);
        assert_eq!(q.selected(), None);
    }

    #[test]
    fn out_of_range_option_is_not_an_answer() {
        let mut q = Quiz::new(QuizRules::default());
        q.apply(Command::SelectOption(7), ms(0));
        assert_eq!(q.selected(), None);
        q.apply(Command::SelectOption(2), ms(0));
        assert_eq!(q.assess(), Assessment::running(20));
    }

    #[test]
    fn reset_starts_over() {
        let mut q = Quiz::new(QuizRules::default());
        play(&mut q, &[2, 2]);
        q.apply(Command::SelectOption(2), ms(5000));
        q.reset(&mut SequenceRng::new(vec![0]));
        assert_eq!(q.cursor(), 0);
        assert_eq!(q.assess(), Assessment::running(0));
        q.step(ms(99_999), &mut SequenceRng::new(vec![0]));
        assert_eq!(q.cursor(), 0, "pending advance was dropped");
    }

    proptest! {
        #[test]
        fn prop_score_is_correct_count_times_points(choices in prop::collection::vec(0usize..4, 5)) {
            let mut q = Quiz::new(QuizRules::default());
            play(&mut q, &choices);
            let right = choices
                .iter()
                .zip(QuizRules::default().questions.iter())
                .filter(|(c, question)| **c == question.correct)
                .count() as u32;
            prop_assert_eq!(q.assess(), Assessment::ended(right * 20));
        }
    }
}
