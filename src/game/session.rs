use std::time::{Duration, Instant};

use rand::Rng;
use rand::rngs::SmallRng;
use ratatui::layout::Position;
use rust_i18n::t;

use crate::game::board::{Board, BoardGeometry, DropOutcome, PointerId, WagonId};
use crate::game::quiz::{QuizState, build_question_pool};
use crate::game::round::RoundState;
use crate::game::{
    GameError, MEMORY_ANSWER_DELAY, MEMORY_MARKS_DELAY, Phase, READY_DELAY, SINGLE_ANSWER_DELAY,
    TOAST_DURATION, Tone,
};
use crate::toast::{self, Toast};
use crate::words::{MIN_POOL, WordBank, normalize_code};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    StartQuiz,
    AdvanceQuestion,
    ClearMemoryMarks,
}

/// A delayed transition. It only fires if the session still looks the way
/// it did when the transition was queued.
#[derive(Clone, Copy, Debug)]
struct Scheduled {
    at: Instant,
    action: Action,
    generation: u64,
    question: usize,
}

/// One game of "build the train" for a fixed letter and category.
pub struct GameSession {
    letter: String,
    letter_name: String,
    category: String,
    category_label: String,
    correct_words: Vec<String>,
    distractors: Vec<String>,

    phase: Phase,
    round: RoundState,
    board: Board,
    quiz: Option<QuizState>,
    focused: Option<WagonId>,

    status: String,
    toast: Option<Toast>,
    final_message: Option<String>,

    scheduled: Vec<Scheduled>,
    cues: Vec<Tone>,
    generation: u64,
    rng: SmallRng,
}

impl GameSession {
    /// Look up the letter and category and prepare the first round.
    pub fn launch(
        bank: &WordBank,
        letter: &str,
        category: &str,
        mut rng: SmallRng,
    ) -> Result<Self, GameError> {
        let code = normalize_code(letter);
        let config = bank
            .letter_config(&code)
            .ok_or_else(|| GameError::UnknownLetter(code.clone()))?;
        let category_config =
            config
                .category(category)
                .ok_or_else(|| GameError::UnknownCategory {
                    letter: code.clone(),
                    category: category.to_string(),
                })?;

        if category_config.words.len() < MIN_POOL {
            return Err(GameError::NotEnoughWords {
                needed: MIN_POOL,
                available: category_config.words.len(),
            });
        }

        let correct_words = category_config.words.clone();
        let distractors = config.distractors(category);
        let round = RoundState::prepare(&correct_words, &distractors, &mut rng)?;
        let board = Board::new(&round.wagon_items, round.slot_count());

        tracing::info!(
            letter = %code,
            category,
            wagons = round.wagon_items.len(),
            "round prepared"
        );

        let mut session = Self {
            letter: code,
            letter_name: config.name.clone(),
            category: category.to_string(),
            category_label: category_config.label.clone(),
            correct_words,
            distractors,
            phase: Phase::Build,
            round,
            board,
            quiz: None,
            focused: None,
            status: String::new(),
            toast: None,
            final_message: None,
            scheduled: Vec::new(),
            cues: Vec::new(),
            generation: 0,
            rng,
        };
        session.status = session.build_status();
        Ok(session)
    }

    fn build_status(&self) -> String {
        t!(
            "game.status_build",
            letter = self.letter_name,
            category = self.category_label
        )
        .to_string()
    }

    pub fn letter(&self) -> &str {
        &self.letter
    }

    pub fn letter_name(&self) -> &str {
        &self.letter_name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn category_label(&self) -> &str {
        &self.category_label
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn quiz(&self) -> Option<&QuizState> {
        self.quiz.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn focused(&self) -> Option<WagonId> {
        self.focused
    }

    pub fn final_message(&self) -> Option<&str> {
        self.final_message.as_deref()
    }

    /// "Правильних відповідей: 5/7" once the quiz is over.
    pub fn score_text(&self) -> Option<String> {
        if self.phase != Phase::Finished {
            return None;
        }
        let quiz = self.quiz.as_ref()?;
        Some(t!("finish.score", score = quiz.score, total = quiz.total()).to_string())
    }

    /// The train is covered while the memory question is asked.
    pub fn train_hidden(&self) -> bool {
        self.phase == Phase::Quiz
            && self
                .quiz
                .as_ref()
                .and_then(QuizState::current)
                .is_some_and(|q| q.is_memory())
    }

    /// Sounds requested since the last call.
    pub fn drain_cues(&mut self) -> Vec<Tone> {
        std::mem::take(&mut self.cues)
    }

    fn show_toast(&mut self, text: String, now: Instant) {
        self.toast = Some(Toast::new(text, now, TOAST_DURATION));
    }

    fn schedule(&mut self, action: Action, now: Instant, delay: Duration) {
        let question = self.quiz.as_ref().map_or(0, |q| q.index);
        self.scheduled.push(Scheduled {
            at: now + delay,
            action,
            generation: self.generation,
            question,
        });
    }

    pub fn set_geometry(&mut self, geometry: BoardGeometry) {
        self.board.set_geometry(geometry, &mut self.rng);
    }

    // -- build phase ------------------------------------------------------

    pub fn begin_drag(&mut self, pointer: PointerId, at: Position) -> bool {
        if self.phase != Phase::Build {
            return false;
        }
        let Some(id) = self.board.wagon_at(at) else {
            return false;
        };
        let started = self.board.begin_drag(id, pointer, at);
        if started {
            self.focused = Some(id);
        }
        started
    }

    pub fn drag_move(&mut self, pointer: PointerId, at: Position) -> bool {
        self.board.drag_move(pointer, at)
    }

    pub fn end_drag(
        &mut self,
        pointer: PointerId,
        at: Position,
        now: Instant,
    ) -> Option<DropOutcome> {
        let outcome = self.board.end_drag(pointer, at, &mut self.rng)?;
        self.after_drop(outcome, now);
        Some(outcome)
    }

    /// Keyboard drop of a wagon into `slot`, or back to the free area.
    pub fn place(
        &mut self,
        id: WagonId,
        slot: Option<usize>,
        now: Instant,
    ) -> Option<DropOutcome> {
        if self.phase != Phase::Build {
            return None;
        }
        let outcome = self.board.place(id, slot, &mut self.rng)?;
        self.after_drop(outcome, now);
        Some(outcome)
    }

    fn after_drop(&mut self, outcome: DropOutcome, now: Instant) {
        if let DropOutcome::Occupied(slot) = outcome {
            tracing::debug!(slot, "drop onto occupied slot");
            self.show_toast(t!("game.slot_taken").to_string(), now);
        }
    }

    /// Move keyboard focus to the next or previous wagon.
    pub fn cycle_focus(&mut self, forward: bool) {
        let mut ids: Vec<WagonId> = self.board.wagons().iter().map(|w| w.id).collect();
        ids.sort_unstable();
        if ids.is_empty() {
            self.focused = None;
            return;
        }

        let current = self
            .focused
            .and_then(|id| ids.iter().position(|&other| other == id));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => ids.len() - 1,
            (Some(i), true) => (i + 1) % ids.len(),
            (Some(i), false) => (i + ids.len() - 1) % ids.len(),
        };
        self.focused = Some(ids[next]);
    }

    pub fn place_focused(&mut self, slot: Option<usize>, now: Instant) -> Option<DropOutcome> {
        let id = self.focused?;
        self.place(id, slot, now)
    }

    /// Check the train. Every slot must be filled; order does not matter.
    pub fn verify_train(&mut self, now: Instant) {
        if self.phase != Phase::Build || self.board.dragging().is_some() {
            return;
        }
        if !self.board.is_full() {
            self.show_toast(t!("game.fill_all").to_string(), now);
            return;
        }

        self.board.mark_slots();
        if self.board.all_correct() {
            tracing::info!(train = ?self.board.slot_words(), "train assembled");
            self.phase = Phase::Ready;
            self.cues.push(Tone::Success);
            self.status = t!("game.status_ready").to_string();
            self.schedule(Action::StartQuiz, now, READY_DELAY);
        } else {
            self.cues.push(Tone::Failure);
            self.show_toast(t!("game.try_again").to_string(), now);
        }
    }

    // -- quiz phase -------------------------------------------------------

    /// Build the questions from the train as it stands and lock the board.
    pub fn start_quiz(&mut self) {
        if self.phase != Phase::Ready {
            return;
        }
        let mut words = self.board.slot_words();
        if words.is_empty() {
            words = self.correct_words.clone();
        }

        let questions = build_question_pool(
            &words,
            &self.round.round_extras,
            &self.distractors,
            &mut self.rng,
        );
        tracing::debug!(questions = questions.len(), "quiz started");

        self.quiz = Some(QuizState::new(questions));
        self.board.remove_extra_free_wagons();
        self.board.lock();
        self.focused = None;
        self.phase = Phase::Quiz;
    }

    /// Digit-key or click on option `index` of the current question.
    pub fn choose_option(&mut self, index: usize, now: Instant) {
        let is_memory = self
            .quiz
            .as_ref()
            .and_then(QuizState::current)
            .is_some_and(|q| q.is_memory());
        if is_memory {
            self.toggle_memory(index);
        } else {
            self.answer_single(index, now);
        }
    }

    pub fn answer_single(&mut self, index: usize, now: Instant) -> Option<bool> {
        if self.phase != Phase::Quiz {
            return None;
        }
        let correct = self.quiz.as_mut()?.answer_single(index)?;
        self.cues.push(if correct { Tone::Success } else { Tone::Failure });
        self.schedule(Action::AdvanceQuestion, now, SINGLE_ANSWER_DELAY);
        Some(correct)
    }

    pub fn toggle_memory(&mut self, index: usize) -> bool {
        if self.phase != Phase::Quiz {
            return false;
        }
        self.quiz.as_mut().is_some_and(|q| q.toggle_memory(index))
    }

    pub fn check_memory(&mut self, now: Instant) -> Option<bool> {
        if self.phase != Phase::Quiz {
            return None;
        }
        let matched = self.quiz.as_mut()?.check_memory()?;
        if matched {
            self.cues.push(Tone::Success);
            self.schedule(Action::AdvanceQuestion, now, MEMORY_ANSWER_DELAY);
        } else {
            self.cues.push(Tone::Failure);
            self.schedule(Action::ClearMemoryMarks, now, MEMORY_MARKS_DELAY);
        }
        Some(matched)
    }

    fn advance_question(&mut self) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        if quiz.advance() {
            self.finish();
        }
    }

    fn finish(&mut self) {
        let message = match self.rng.gen_range(0..3) {
            0 => t!("finish.praise_1"),
            1 => t!("finish.praise_2"),
            _ => t!("finish.praise_3"),
        };
        self.final_message = Some(message.to_string());
        self.phase = Phase::Finished;
        if let Some(quiz) = &self.quiz {
            tracing::info!(score = quiz.score, total = quiz.total(), "quiz finished");
        }
    }

    // -- timers -----------------------------------------------------------

    /// Fire due transitions, expire the toast and retry pending scatters.
    pub fn tick(&mut self, now: Instant) {
        toast::expire(&mut self.toast, now);
        self.board.scatter_pending(&mut self.rng);

        let (due, pending): (Vec<Scheduled>, Vec<Scheduled>) = std::mem::take(&mut self.scheduled)
            .into_iter()
            .partition(|s| s.at <= now);
        self.scheduled = pending;

        for scheduled in due {
            self.fire(scheduled);
        }
    }

    fn fire(&mut self, scheduled: Scheduled) {
        if scheduled.generation != self.generation {
            return;
        }
        let on_question = self
            .quiz
            .as_ref()
            .is_some_and(|q| q.index == scheduled.question);

        match scheduled.action {
            Action::StartQuiz if self.phase == Phase::Ready => self.start_quiz(),
            Action::AdvanceQuestion if self.phase == Phase::Quiz && on_question => {
                self.advance_question();
            }
            Action::ClearMemoryMarks if self.phase == Phase::Quiz && on_question => {
                if let Some(quiz) = self.quiz.as_mut().filter(|q| !q.locked) {
                    quiz.clear_marks();
                }
            }
            _ => tracing::trace!(
                action = ?scheduled.action,
                phase = self.phase.as_str(),
                "stale transition dropped"
            ),
        }
    }

    /// Throw the current round away and start over in the build phase.
    pub fn reset_game(&mut self) -> Result<(), GameError> {
        let round = RoundState::prepare(&self.correct_words, &self.distractors, &mut self.rng)?;
        let geometry = self.board.geometry().clone();

        self.generation += 1;
        self.scheduled.clear();
        self.board = Board::new(&round.wagon_items, round.slot_count());
        self.board.set_geometry(geometry, &mut self.rng);
        self.round = round;
        self.quiz = None;
        self.focused = None;
        self.toast = None;
        self.final_message = None;
        self.phase = Phase::Build;
        self.status = self.build_status();
        tracing::debug!(generation = self.generation, "round reset");
        Ok(())
    }
}
