pub mod board;
pub mod error;
pub mod quiz;
pub mod round;
pub mod scatter;
pub mod session;

use std::time::Duration;

pub use error::GameError;
pub use session::GameSession;

/// Number of wrong wagons mixed into every round.
pub const EXTRA_WAGONS: usize = 4;

pub const READY_DELAY: Duration = Duration::from_millis(800);
pub const SINGLE_ANSWER_DELAY: Duration = Duration::from_millis(1200);
pub const MEMORY_ANSWER_DELAY: Duration = Duration::from_millis(1400);
pub const MEMORY_MARKS_DELAY: Duration = Duration::from_millis(900);
pub const TOAST_DURATION: Duration = Duration::from_millis(2000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Build,
    Ready,
    Quiz,
    Finished,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Build => "build",
            Phase::Ready => "ready",
            Phase::Quiz => "quiz",
            Phase::Finished => "finished",
        }
    }
}

/// Audible feedback requested by the game; the terminal front end decides how
/// to play it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Success,
    Failure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_names_are_stable() {
        let names: Vec<&str> = [Phase::Build, Phase::Ready, Phase::Quiz, Phase::Finished]
            .into_iter()
            .map(Phase::as_str)
            .collect();
        assert_eq!(names, ["build", "ready", "quiz", "finished"]);
    }
}
