//! Multiple-choice quiz with one-shot answers and a running score

use std::collections::BTreeMap;

use tracing::debug;

use crate::deck::{BlockKind, Deck, DeckStrings};

/// Styling applied to the chosen option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct QuestionState {
    /// Ordinal identifier from the deck
    pub id: String,
    pub slide: usize,
    pub block: usize,
    /// `is_correct` flag of each option
    options: Vec<bool>,
    answered: bool,
    chosen: Option<(usize, OptionMark)>,
    feedback: Option<Feedback>,
}

impl QuestionState {
    pub fn new(id: impl Into<String>, slide: usize, block: usize, options: Vec<bool>) -> Self {
        Self {
            id: id.into(),
            slide,
            block,
            options,
            answered: false,
            chosen: None,
            feedback: None,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Mark of `option`, if it was the one chosen
    pub fn mark(&self, option: usize) -> Option<OptionMark> {
        self.chosen
            .filter(|(chosen, _)| *chosen == option)
            .map(|(_, mark)| mark)
    }

    /// The locked-in choice, if answered
    pub fn chosen(&self) -> Option<(usize, OptionMark)> {
        self.chosen
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }
}

/// Result of a selection that locked a question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub score: u32,
}

#[derive(Debug, Clone)]
pub struct QuizController {
    questions: Vec<QuestionState>,
    score: u32,
    result_text: Option<String>,
    correct_message: String,
    incorrect_message: String,
    result_prefix: String,
    hints: BTreeMap<String, String>,
}

impl QuizController {
    pub fn new(
        questions: Vec<QuestionState>,
        strings: &DeckStrings,
        hints: BTreeMap<String, String>,
    ) -> Self {
        Self {
            questions,
            score: 0,
            result_text: None,
            correct_message: strings.quiz_correct.clone(),
            incorrect_message: strings.quiz_incorrect.clone(),
            result_prefix: strings.quiz_result_prefix.clone(),
            hints,
        }
    }

    pub fn from_deck(deck: &Deck) -> Self {
        let questions = deck
            .slides
            .iter()
            .flat_map(|slide| {
                slide
                    .blocks
                    .iter()
                    .enumerate()
                    .filter_map(move |(block_idx, block)| match &block.kind {
                        BlockKind::Quiz { id, options, .. } => Some(QuestionState::new(
                            id.clone(),
                            slide.index,
                            block_idx,
                            options.iter().map(|o| o.correct).collect(),
                        )),
                        _ => None,
                    })
            })
            .collect();
        Self::new(questions, &deck.strings, deck.hints.clone())
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn questions(&self) -> &[QuestionState] {
        &self.questions
    }

    pub fn question(&self, ordinal: usize) -> Option<&QuestionState> {
        self.questions.get(ordinal)
    }

    /// Ordinal of the question rendered by a given block
    pub fn ordinal_at(&self, slide: usize, block: usize) -> Option<usize> {
        self.questions
            .iter()
            .position(|q| q.slide == slide && q.block == block)
    }

    /// Running "score/total" line, shown once anything was answered
    pub fn result_text(&self) -> Option<&str> {
        self.result_text.as_deref()
    }

    /// Select `option` of question `ordinal`
    ///
    /// The first selection locks the question; later ones return `None` and
    /// change nothing. Unknown questions or options are ignored.
    pub fn select(&mut self, ordinal: usize, option: usize) -> Option<AnswerOutcome> {
        let question = self.questions.get_mut(ordinal)?;
        if question.answered {
            return None;
        }
        let correct = *question.options.get(option)?;

        question.answered = true;
        let message = if correct {
            self.score += 1;
            question.chosen = Some((option, OptionMark::Correct));
            self.correct_message.clone()
        } else {
            question.chosen = Some((option, OptionMark::Incorrect));
            self.incorrect_message.clone()
        };

        question.feedback = Some(Feedback {
            message,
            hint: self.hints.get(&question.id).cloned(),
        });
        debug!(
            "Quiz question '{}' answered ({}), score {}",
            question.id,
            if correct { "correct" } else { "incorrect" },
            self.score
        );

        self.result_text = Some(format!(
            "{}{}/{}",
            self.result_prefix,
            self.score,
            self.questions.len()
        ));

        Some(AnswerOutcome {
            correct,
            score: self.score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz() -> QuizController {
        let questions = vec![
            QuestionState::new("1", 0, 0, vec![false, true, false]),
            QuestionState::new("2", 0, 1, vec![false, true]),
            QuestionState::new("9", 1, 0, vec![true, false]),
        ];
        let mut hints = BTreeMap::new();
        hints.insert("1".to_string(), "check the sender".to_string());
        hints.insert("2".to_string(), "use official channels".to_string());
        QuizController::new(questions, &DeckStrings::default(), hints)
    }

    #[test]
    fn test_correct_answer_scores_once() {
        let mut quiz = quiz();
        let outcome = quiz.select(0, 1).unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.score, 1);

        let question = quiz.question(0).unwrap();
        assert!(question.is_answered());
        assert_eq!(question.mark(1), Some(OptionMark::Correct));
        assert_eq!(question.mark(0), None);
        assert_eq!(question.chosen(), Some((1, OptionMark::Correct)));
        assert_eq!(question.feedback().unwrap().message, "✅ Correct answer");
        assert_eq!(quiz.result_text(), Some("Current score: 1/3"));
    }

    #[test]
    fn test_incorrect_answer_shows_hint() {
        let mut quiz = quiz();
        let outcome = quiz.select(1, 0).unwrap();
        assert!(!outcome.correct);
        assert_eq!(quiz.score(), 0);

        let question = quiz.question(1).unwrap();
        assert_eq!(question.mark(0), Some(OptionMark::Incorrect));
        let feedback = question.feedback().unwrap();
        assert!(feedback.message.starts_with("❌"));
        assert_eq!(feedback.hint.as_deref(), Some("use official channels"));
        assert_eq!(quiz.result_text(), Some("Current score: 0/3"));
    }

    #[test]
    fn test_unknown_id_has_no_hint() {
        let mut quiz = quiz();
        quiz.select(2, 1);
        assert_eq!(quiz.question(2).unwrap().feedback().unwrap().hint, None);
    }

    #[test]
    fn test_answered_question_is_locked() {
        let mut quiz = quiz();
        quiz.select(0, 0);
        let feedback_before = quiz.question(0).unwrap().feedback().cloned();
        let result_before = quiz.result_text().map(str::to_string);

        assert_eq!(quiz.select(0, 1), None);
        assert_eq!(quiz.select(0, 0), None);

        assert_eq!(quiz.score(), 0);
        assert_eq!(quiz.question(0).unwrap().feedback().cloned(), feedback_before);
        assert_eq!(quiz.result_text().map(str::to_string), result_before);
        assert_eq!(quiz.question(0).unwrap().mark(1), None);
    }

    #[test]
    fn test_running_score_n_of_m() {
        let mut quiz = quiz();
        quiz.select(0, 1);
        quiz.select(1, 0);
        quiz.select(2, 0);
        assert_eq!(quiz.score(), 2);
        assert_eq!(quiz.result_text(), Some("Current score: 2/3"));
    }

    #[test]
    fn test_out_of_range_selection_ignored() {
        let mut quiz = quiz();
        assert_eq!(quiz.select(7, 0), None);
        assert_eq!(quiz.select(0, 9), None);
        assert!(!quiz.question(0).unwrap().is_answered());
        assert_eq!(quiz.result_text(), None);
    }

    #[test]
    fn test_from_deck() {
        let deck = Deck::bundled().unwrap();
        let quiz = QuizController::from_deck(&deck);
        assert_eq!(quiz.total(), 3);
        let q = quiz.question(0).unwrap();
        assert_eq!(quiz.ordinal_at(q.slide, q.block), Some(0));
    }
}
