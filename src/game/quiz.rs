use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use rust_i18n::t;

/// Positional questions asked per quiz, before the count and memory ones.
pub const POSITIONAL_QUESTIONS: usize = 5;

/// Wrong options offered next to the answer of a single-choice question.
pub const WRONG_OPTIONS: usize = 2;

const COUNT_CHOICES: [&str; 6] = ["3", "4", "5", "6", "7", "8"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuestionKind {
    Single { answer: String },
    Memory { correct: HashSet<String> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub id: usize,
    pub text: String,
    pub options: Vec<String>,
    pub kind: QuestionKind,
}

impl Question {
    pub fn is_memory(&self) -> bool {
        matches!(self.kind, QuestionKind::Memory { .. })
    }

    pub fn answer(&self) -> Option<&str> {
        match &self.kind {
            QuestionKind::Single { answer } => Some(answer),
            QuestionKind::Memory { .. } => None,
        }
    }
}

/// Where a positional question points in the train.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Positional {
    /// What rides before `words[i]`; `i >= 1`.
    Before(usize),
    /// What rides after `words[i]`; `i <= n - 2`.
    After(usize),
    /// What rides between `words[i - 1]` and `words[i + 1]`.
    Between(usize),
}

/// Every valid positional question for a train of `n` wagons.
pub fn positional_candidates(n: usize) -> Vec<Positional> {
    let mut candidates = Vec::new();
    if n >= 2 {
        candidates.extend((1..n).map(Positional::Before));
        candidates.extend((0..n - 1).map(Positional::After));
    }
    if n >= 3 {
        candidates.extend((1..n - 1).map(Positional::Between));
    }
    candidates
}

/// Pick up to `count` distinct values from `source`, skipping `exclude`.
fn random_from<R: Rng + ?Sized>(
    source: &[String],
    count: usize,
    exclude: &[&str],
    rng: &mut R,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut filtered: Vec<String> = source
        .iter()
        .filter(|item| !exclude.contains(&item.as_str()))
        .filter(|item| seen.insert(item.as_str()))
        .cloned()
        .collect();
    filtered.shuffle(rng);
    filtered.truncate(count);
    filtered
}

fn single<R: Rng + ?Sized>(
    id: usize,
    text: String,
    answer: &str,
    pool: &[String],
    exclude: &[&str],
    rng: &mut R,
) -> Question {
    let mut options = vec![answer.to_string()];
    options.extend(random_from(pool, WRONG_OPTIONS, exclude, rng));
    options.shuffle(rng);
    Question {
        id,
        text,
        options,
        kind: QuestionKind::Single {
            answer: answer.to_string(),
        },
    }
}

fn positional_question<R: Rng + ?Sized>(
    id: usize,
    kind: Positional,
    words: &[String],
    pool: &[String],
    rng: &mut R,
) -> Question {
    match kind {
        Positional::Before(i) => {
            let (target, answer) = (&words[i], &words[i - 1]);
            let text = t!("quiz.before", target = target).to_string();
            single(id, text, answer, pool, &[answer.as_str(), target.as_str()], rng)
        }
        Positional::After(i) => {
            let (target, answer) = (&words[i], &words[i + 1]);
            let text = t!("quiz.after", target = target).to_string();
            single(id, text, answer, pool, &[answer.as_str(), target.as_str()], rng)
        }
        Positional::Between(i) => {
            let (before, answer, after) = (&words[i - 1], &words[i], &words[i + 1]);
            let text = t!("quiz.between", before = before, after = after).to_string();
            let exclude = [answer.as_str(), before.as_str(), after.as_str()];
            single(id, text, answer, pool, &exclude, rng)
        }
    }
}

/// Build the quiz for a finished train: five positional questions picked at
/// random, one count question and the memory question last.
///
/// `words` is the train in slot order, `extras` the wrong wagons of this
/// round and `distractors` the category-level pool.
pub fn build_question_pool<R: Rng + ?Sized>(
    words: &[String],
    extras: &[String],
    distractors: &[String],
    rng: &mut R,
) -> Vec<Question> {
    let n = words.len();
    let pool: Vec<String> = words
        .iter()
        .chain(extras)
        .chain(distractors)
        .cloned()
        .collect();

    let mut candidates = positional_candidates(n);
    candidates.shuffle(rng);
    let mut picked: Vec<Positional> = candidates
        .iter()
        .take(POSITIONAL_QUESTIONS)
        .copied()
        .collect();
    // short trains repeat candidates
    while !candidates.is_empty() && picked.len() < POSITIONAL_QUESTIONS {
        picked.push(candidates[picked.len() % candidates.len()]);
    }

    let mut questions: Vec<Question> = picked
        .into_iter()
        .enumerate()
        .map(|(id, kind)| positional_question(id, kind, words, &pool, rng))
        .collect();

    let count = n.to_string();
    let choices: Vec<String> = COUNT_CHOICES.iter().map(|c| c.to_string()).collect();
    let mut count_options = vec![count.clone()];
    count_options.extend(random_from(&choices, WRONG_OPTIONS, &[count.as_str()], rng));
    count_options.shuffle(rng);
    questions.push(Question {
        id: questions.len(),
        text: t!("quiz.count").to_string(),
        options: count_options,
        kind: QuestionKind::Single { answer: count },
    });

    let mut seen = HashSet::new();
    let mut memory_options: Vec<String> = words
        .iter()
        .chain(extras)
        .filter(|w| seen.insert(w.as_str()))
        .cloned()
        .collect();
    memory_options.shuffle(rng);
    questions.push(Question {
        id: questions.len(),
        text: t!("quiz.memory").to_string(),
        options: memory_options,
        kind: QuestionKind::Memory {
            correct: words.iter().cloned().collect(),
        },
    });

    questions
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    pub positive: bool,
}

/// Per-option verdict shown after an answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
    Correct,
    Incorrect,
}

#[derive(Clone, Debug)]
pub struct QuizState {
    pub questions: Vec<Question>,
    pub index: usize,
    pub score: usize,
    pub memory_selection: HashSet<String>,
    /// Options stop taking input while feedback is on screen.
    pub locked: bool,
    pub marks: Vec<Option<OptionMark>>,
    pub feedback: Option<Feedback>,
    /// A failed memory check relabels the action button.
    pub retrying: bool,
}

impl QuizState {
    pub fn new(questions: Vec<Question>) -> Self {
        let mut state = Self {
            questions,
            index: 0,
            score: 0,
            memory_selection: HashSet::new(),
            locked: false,
            marks: Vec::new(),
            feedback: None,
            retrying: false,
        };
        state.reset_question();
        state
    }

    fn reset_question(&mut self) {
        let options = self.current().map_or(0, |q| q.options.len());
        self.marks = vec![None; options];
        self.memory_selection.clear();
        self.locked = false;
        self.feedback = None;
        self.retrying = false;
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.questions.len()
    }

    /// "3/7" style counter; stays on the last number once finished.
    pub fn counter_text(&self) -> String {
        let total = self.total();
        format!("{}/{}", (self.index + 1).min(total), total)
    }

    pub fn is_selected(&self, option: &str) -> bool {
        self.memory_selection.contains(option)
    }

    /// Answer a single-choice question. Returns whether the pick was right,
    /// or `None` when the question does not take a single answer right now.
    pub fn answer_single(&mut self, option: usize) -> Option<bool> {
        if self.locked {
            return None;
        }
        let question = self.current()?;
        let answer = question.answer()?;
        let picked = question.options.get(option)?;

        let correct = picked == answer;
        let text = if correct {
            t!("quiz.correct").to_string()
        } else {
            t!("quiz.wrong", answer = answer).to_string()
        };

        self.locked = true;
        self.marks[option] = Some(if correct {
            OptionMark::Correct
        } else {
            OptionMark::Incorrect
        });
        if correct {
            self.score += 1;
        }
        self.feedback = Some(Feedback {
            text,
            positive: correct,
        });
        Some(correct)
    }

    /// Flip an option of the memory question in or out of the selection.
    pub fn toggle_memory(&mut self, option: usize) -> bool {
        if self.locked {
            return false;
        }
        let Some(value) = self
            .current()
            .filter(|q| q.is_memory())
            .and_then(|q| q.options.get(option))
            .cloned()
        else {
            return false;
        };

        if !self.memory_selection.remove(&value) {
            self.memory_selection.insert(value);
        }
        true
    }

    /// Compare the selection with the train. Only an exact match scores.
    pub fn check_memory(&mut self) -> Option<bool> {
        if self.locked {
            return None;
        }
        let question = self.current()?;
        let QuestionKind::Memory { correct } = &question.kind else {
            return None;
        };

        let marks: Vec<Option<OptionMark>> = question
            .options
            .iter()
            .map(|option| {
                let selected = self.memory_selection.contains(option);
                match (selected, correct.contains(option)) {
                    (true, true) => Some(OptionMark::Correct),
                    (true, false) => Some(OptionMark::Incorrect),
                    (false, _) => None,
                }
            })
            .collect();
        let all_good = self.memory_selection == *correct;

        self.marks = marks;
        if all_good {
            self.locked = true;
            self.score += 1;
            self.feedback = Some(Feedback {
                text: t!("quiz.memory_correct").to_string(),
                positive: true,
            });
        } else {
            self.retrying = true;
            self.feedback = Some(Feedback {
                text: t!("quiz.memory_wrong").to_string(),
                positive: false,
            });
        }
        Some(all_good)
    }

    /// Drop the verdict marks of a failed memory check; the selection stays.
    pub fn clear_marks(&mut self) {
        self.marks.iter_mut().for_each(|m| *m = None);
    }

    /// Move to the next question. Returns true when the quiz is over.
    pub fn advance(&mut self) -> bool {
        if !self.is_finished() {
            self.index += 1;
        }
        self.reset_question();
        self.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn train() -> Vec<String> {
        words(&["банан", "бджола", "булка", "бочка"])
    }

    fn extras() -> Vec<String> {
        words(&["риба", "зуб", "хліб", "дуб"])
    }

    fn pool() -> Vec<String> {
        words(&["риба", "зуб", "хліб", "дуб", "куб", "жаба"])
    }

    #[test]
    fn candidates_never_point_past_the_ends() {
        for n in 0..9 {
            for candidate in positional_candidates(n) {
                match candidate {
                    Positional::Before(i) => assert!(i >= 1 && i < n),
                    Positional::After(i) => assert!(i + 1 < n),
                    Positional::Between(i) => assert!(i >= 1 && i + 1 < n),
                }
            }
        }
        assert_eq!(positional_candidates(4).len(), 3 + 3 + 2);
        assert!(positional_candidates(1).is_empty());
    }

    #[test]
    fn pool_has_five_positional_then_count_then_memory() {
        for seed in 0..16 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let questions = build_question_pool(&train(), &extras(), &pool(), &mut rng);
            assert_eq!(questions.len(), 7);
            assert!(questions[..6].iter().all(|q| !q.is_memory()));
            assert_eq!(questions[5].answer(), Some("4"));
            assert_eq!(questions[5].text, "Скільки вагонів у потязі?");
            assert!(questions[6].is_memory());
        }
    }

    #[test]
    fn single_options_are_distinct_and_hold_the_answer() {
        for seed in 0..32 {
            let mut rng = SmallRng::seed_from_u64(seed);
            for question in build_question_pool(&train(), &extras(), &pool(), &mut rng) {
                let Some(answer) = question.answer() else {
                    continue;
                };
                assert!(question.options.iter().any(|o| o == answer));
                let unique: HashSet<&String> = question.options.iter().collect();
                assert_eq!(unique.len(), question.options.len(), "{question:?}");
                assert_eq!(question.options.len(), 1 + WRONG_OPTIONS);
            }
        }
    }

    #[test]
    fn positional_answers_follow_slot_order() {
        // scrambled but all-correct train
        let order = words(&["бочка", "банан", "булка", "бджола"]);
        let mut rng = SmallRng::seed_from_u64(5);
        let questions = build_question_pool(&order, &extras(), &pool(), &mut rng);
        for question in &questions[..5] {
            let answer = question.answer().unwrap();
            let text = &question.text;
            if text.contains("перед словом «банан»") {
                assert_eq!(answer, "бочка");
            } else if text.contains("після слова «булка»") {
                assert_eq!(answer, "бджола");
            } else if text.contains("між словами «банан» та «бджола»") {
                assert_eq!(answer, "булка");
            }
        }
    }

    #[test]
    fn neighbours_are_never_offered_as_wrong_options() {
        let mut rng = SmallRng::seed_from_u64(21);
        let train = train();
        for question in build_question_pool(&train, &extras(), &pool(), &mut rng)
            .iter()
            .take(5)
        {
            let answer = question.answer().unwrap();
            for (i, word) in train.iter().enumerate() {
                if question.text == t!("quiz.before", target = word) {
                    assert!(!question.options.contains(&train[i]));
                }
                if question.text == t!("quiz.after", target = word) {
                    assert!(!question.options.contains(&train[i]));
                    assert_eq!(answer, train[i + 1]);
                }
            }
        }
    }

    #[test]
    fn short_trains_pad_by_cycling() {
        let two = words(&["банан", "бочка"]);
        let mut rng = SmallRng::seed_from_u64(2);
        let questions = build_question_pool(&two, &extras(), &pool(), &mut rng);
        assert_eq!(questions.len(), 7);
        assert_eq!(questions[5].answer(), Some("2"));
    }

    #[test]
    fn memory_options_cover_train_and_extras() {
        let mut rng = SmallRng::seed_from_u64(8);
        let questions = build_question_pool(&train(), &extras(), &pool(), &mut rng);
        let memory = questions.last().unwrap();
        let mut options = memory.options.clone();
        options.sort();
        let mut expected: Vec<String> = train().into_iter().chain(extras()).collect();
        expected.sort();
        assert_eq!(options, expected);
        let QuestionKind::Memory { correct } = &memory.kind else {
            panic!("last question must be the memory one");
        };
        assert_eq!(correct, &train().into_iter().collect::<HashSet<_>>());
    }

    fn quiz() -> QuizState {
        let mut rng = SmallRng::seed_from_u64(4);
        QuizState::new(build_question_pool(&train(), &extras(), &pool(), &mut rng))
    }

    fn answer_index(quiz: &QuizState) -> usize {
        let question = quiz.current().unwrap();
        let answer = question.answer().unwrap();
        question.options.iter().position(|o| o == answer).unwrap()
    }

    #[test]
    fn single_answer_scores_once_and_locks() {
        let mut quiz = quiz();
        let right = answer_index(&quiz);
        assert_eq!(quiz.answer_single(right), Some(true));
        assert_eq!(quiz.score, 1);
        assert_eq!(quiz.answer_single(right), None);
        assert_eq!(quiz.score, 1);
        assert_eq!(quiz.feedback.as_ref().unwrap().text, "Правильно!");
    }

    #[test]
    fn wrong_single_answer_names_the_right_one() {
        let mut quiz = quiz();
        let right = answer_index(&quiz);
        let wrong = (right + 1) % quiz.current().unwrap().options.len();
        let answer = quiz.current().unwrap().answer().unwrap().to_string();
        assert_eq!(quiz.answer_single(wrong), Some(false));
        assert_eq!(quiz.score, 0);
        assert_eq!(
            quiz.feedback.as_ref().unwrap().text,
            format!("Невірно. Правильна відповідь — «{answer}».")
        );
        assert_eq!(quiz.marks[wrong], Some(OptionMark::Incorrect));
    }

    fn skip_to_memory(quiz: &mut QuizState) {
        while !quiz.current().unwrap().is_memory() {
            quiz.advance();
        }
    }

    #[test]
    fn memory_needs_the_exact_set() {
        let mut quiz = quiz();
        skip_to_memory(&mut quiz);
        let options = quiz.current().unwrap().options.clone();
        let train = train();

        for (i, option) in options.iter().enumerate() {
            if train.contains(option) {
                quiz.toggle_memory(i);
            }
        }
        // one extra wrong pick spoils it
        let wrong = options.iter().position(|o| !train.contains(o)).unwrap();
        quiz.toggle_memory(wrong);
        assert_eq!(quiz.check_memory(), Some(false));
        assert!(quiz.retrying);
        assert!(!quiz.locked);
        assert_eq!(quiz.marks[wrong], Some(OptionMark::Incorrect));
        assert_eq!(quiz.score, 0);

        quiz.clear_marks();
        assert!(quiz.marks.iter().all(Option::is_none));
        assert!(quiz.is_selected(&options[wrong]));

        quiz.toggle_memory(wrong);
        assert_eq!(quiz.check_memory(), Some(true));
        assert_eq!(quiz.score, 1);
        assert!(quiz.locked);
    }

    #[test]
    fn advancing_past_the_end_finishes() {
        let mut quiz = quiz();
        let total = quiz.total();
        assert_eq!(quiz.counter_text(), format!("1/{total}"));
        for _ in 0..total - 1 {
            assert!(!quiz.advance());
        }
        assert!(quiz.advance());
        assert!(quiz.is_finished());
        assert_eq!(quiz.counter_text(), format!("{total}/{total}"));
        assert!(quiz.current().is_none());
    }
}
