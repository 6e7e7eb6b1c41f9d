use rust_i18n::t;

use crate::route::Route;
use crate::words::WordBank;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LetterChoice {
    pub code: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryChoice {
    pub key: String,
    pub label: String,
    pub word_count: usize,
}

/// Letter and category picker that leads into the game.
#[derive(Clone, Debug)]
pub struct SelectionState {
    pub letters: Vec<LetterChoice>,
    pub categories: Vec<CategoryChoice>,
    pub active_letter: Option<usize>,
    pub active_category: Option<usize>,
    pub label: String,
}

impl SelectionState {
    pub fn new(bank: &WordBank) -> Self {
        let letters = bank
            .available_letters()
            .into_iter()
            .filter_map(|code| bank.letter_config(code))
            .map(|config| LetterChoice {
                code: config.code.clone(),
                name: config.name.clone(),
            })
            .collect();

        Self {
            letters,
            categories: Vec::new(),
            active_letter: None,
            active_category: None,
            label: t!("select.pick_letter").to_string(),
        }
    }

    pub fn letter(&self) -> Option<&LetterChoice> {
        self.active_letter.and_then(|i| self.letters.get(i))
    }

    pub fn category(&self) -> Option<&CategoryChoice> {
        self.active_category.and_then(|i| self.categories.get(i))
    }

    /// Pick a letter. Picking the active one again keeps the category.
    pub fn choose_letter(&mut self, bank: &WordBank, index: usize) {
        if self.active_letter == Some(index) || index >= self.letters.len() {
            return;
        }
        self.active_letter = Some(index);
        self.active_category = None;
        self.label = t!("select.pick_category").to_string();

        self.categories = bank
            .letter_config(&self.letters[index].code)
            .map(|config| {
                config
                    .playable_categories()
                    .map(|c| CategoryChoice {
                        key: c.key.clone(),
                        label: c.label.clone(),
                        word_count: c.words.len(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        if self.categories.is_empty() {
            self.label = t!("select.no_categories").to_string();
        }
    }

    /// Pick a letter by its code, as the `--letter` flag does.
    pub fn choose_letter_code(&mut self, bank: &WordBank, code: &str) -> bool {
        let code = crate::words::normalize_code(code);
        match self.letters.iter().position(|l| l.code == code) {
            Some(index) => {
                self.choose_letter(bank, index);
                true
            }
            None => false,
        }
    }

    pub fn choose_category(&mut self, index: usize) {
        let (Some(letter), Some(category)) = (self.letter(), self.categories.get(index)) else {
            return;
        };
        self.label = t!(
            "select.chosen",
            letter = letter.name,
            category = category.label
        )
        .to_string();
        self.active_category = Some(index);
    }

    /// Step the letter choice left or right, wrapping around.
    pub fn move_letter(&mut self, bank: &WordBank, delta: isize) {
        let len = self.letters.len();
        if len == 0 {
            return;
        }
        let next = match self.active_letter {
            Some(i) => (i as isize + delta).rem_euclid(len as isize) as usize,
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.choose_letter(bank, next);
    }

    pub fn move_category(&mut self, delta: isize) {
        let len = self.categories.len();
        if len == 0 {
            return;
        }
        let next = match self.active_category {
            Some(i) => (i as isize + delta).rem_euclid(len as isize) as usize,
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.choose_category(next);
    }

    pub fn can_start(&self) -> bool {
        self.letter().is_some() && self.category().is_some()
    }

    /// Where "start" leads; `None` until both picks are made.
    pub fn start(&self) -> Option<Route> {
        let letter = self.letter()?;
        let category = self.category()?;
        Some(Route::Game {
            letter: letter.code.clone(),
            category: category.key.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> WordBank {
        WordBank::load()
    }

    fn index_of(state: &SelectionState, code: &str) -> usize {
        state.letters.iter().position(|l| l.code == code).unwrap()
    }

    #[test]
    fn lists_every_bundled_letter() {
        let bank = bank();
        let state = SelectionState::new(&bank);
        assert_eq!(state.letters.len(), bank.available_letters().len());
        assert_eq!(state.label, "Оберіть літеру");
        assert!(state.start().is_none());
    }

    #[test]
    fn choosing_a_letter_resets_the_category() {
        let bank = bank();
        let mut state = SelectionState::new(&bank);
        let b = index_of(&state, "б");
        state.choose_letter(&bank, b);
        assert_eq!(state.label, "Оберіть тип слів");
        assert!(!state.categories.is_empty());

        state.choose_category(0);
        assert!(state.can_start());

        // same letter again keeps the pick
        state.choose_letter(&bank, b);
        assert!(state.can_start());

        state.move_letter(&bank, 1);
        assert!(!state.can_start());
        assert_eq!(state.label, "Оберіть тип слів");
    }

    #[test]
    fn chosen_label_names_letter_and_category() {
        let bank = bank();
        let mut state = SelectionState::new(&bank);
        state.choose_letter_code(&bank, "Б");
        let pochatok = state
            .categories
            .iter()
            .position(|c| c.key == "pochatok")
            .unwrap();
        state.choose_category(pochatok);
        assert_eq!(
            state.label,
            "Обрана літера Б, категорія — Звук на початку слова"
        );
        assert_eq!(
            state.start(),
            Some(Route::Game {
                letter: "б".to_string(),
                category: "pochatok".to_string()
            })
        );
    }

    #[test]
    fn thin_letters_offer_no_categories() {
        let bank = WordBank::from_json(
            r#"{"letters":[{"code":"ж","name":"Ж","categories":[
                {"key":"pochatok","label":"На початку","words":["жаба","жук","жолудь","жито"]},
                {"key":"kinets","label":"У кінці","words":["ніж"]}]}]}"#,
        )
        .unwrap();
        let mut state = SelectionState::new(&bank);
        state.choose_letter(&bank, 0);
        assert!(state.categories.is_empty());
        assert_eq!(state.label, "Для цієї літери поки що немає категорій.");
        state.move_category(1);
        assert!(state.start().is_none());
    }

    #[test]
    fn unknown_letter_code_is_ignored() {
        let bank = bank();
        let mut state = SelectionState::new(&bank);
        assert!(!state.choose_letter_code(&bank, "ї"));
        assert!(state.letter().is_none());
    }
}
