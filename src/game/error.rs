use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("unknown letter '{0}'")]
    UnknownLetter(String),

    #[error("letter '{letter}' has no category '{category}'")]
    UnknownCategory { letter: String, category: String },

    #[error("category needs at least {needed} words, found {available}")]
    NotEnoughWords { needed: usize, available: usize },

    #[error("need at least {needed} distractor words, found {available}")]
    NotEnoughDistractors { needed: usize, available: usize },
}

impl GameError {
    /// Missing configuration sends the player straight back to selection;
    /// thin word pools get a message first.
    pub fn is_missing_config(&self) -> bool {
        matches!(
            self,
            GameError::UnknownLetter(_) | GameError::UnknownCategory { .. }
        )
    }
}
