use rust_i18n::t;

use crate::route::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameId {
    Potyah,
    Letters,
    Rhymes,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameCard {
    pub id: GameId,
    pub title: String,
    pub status: String,
    pub description: String,
    pub rules: Vec<String>,
    pub action: String,
    /// `None` while the game is still being made.
    pub target: Option<Route>,
}

impl GameCard {
    pub fn is_available(&self) -> bool {
        self.target.is_some()
    }
}

/// Games listed on the landing page.
pub fn catalog() -> Vec<GameCard> {
    vec![
        GameCard {
            id: GameId::Potyah,
            title: t!("catalog.potyah.title").to_string(),
            status: t!("catalog.potyah.status").to_string(),
            description: t!("catalog.potyah.description").to_string(),
            rules: vec![
                t!("catalog.potyah.rule_1").to_string(),
                t!("catalog.potyah.rule_2").to_string(),
                t!("catalog.potyah.rule_3").to_string(),
            ],
            action: t!("catalog.potyah.action").to_string(),
            target: Some(Route::Select),
        },
        GameCard {
            id: GameId::Letters,
            title: t!("catalog.letters.title").to_string(),
            status: t!("catalog.letters.status").to_string(),
            description: t!("catalog.letters.description").to_string(),
            rules: vec![
                t!("catalog.letters.rule_1").to_string(),
                t!("catalog.letters.rule_2").to_string(),
            ],
            action: t!("catalog.letters.action").to_string(),
            target: None,
        },
        GameCard {
            id: GameId::Rhymes,
            title: t!("catalog.rhymes.title").to_string(),
            status: t!("catalog.rhymes.status").to_string(),
            description: t!("catalog.rhymes.description").to_string(),
            rules: vec![
                t!("catalog.rhymes.rule_1").to_string(),
                t!("catalog.rhymes.rule_2").to_string(),
            ],
            action: t!("catalog.rhymes.action").to_string(),
            target: None,
        },
    ]
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HomeAction {
    Navigate(Route),
    Notice(String),
}

/// Landing page: a card list with a details panel for the opened card.
#[derive(Clone, Debug)]
pub struct HomeState {
    pub cards: Vec<GameCard>,
    pub selected: usize,
    pub opened: Option<usize>,
}

impl Default for HomeState {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeState {
    pub fn new() -> Self {
        Self {
            cards: catalog(),
            selected: 0,
            opened: None,
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.cards.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.cards.len() - 1;
        }
    }

    pub fn opened_card(&self) -> Option<&GameCard> {
        self.opened.and_then(|i| self.cards.get(i))
    }

    /// Show the details of card `index`.
    pub fn open(&mut self, index: usize) {
        if index < self.cards.len() {
            self.selected = index;
            self.opened = Some(index);
        }
    }

    /// Enter on a card opens its details; Enter on opened details runs the
    /// card's action.
    pub fn activate(&mut self) -> Option<HomeAction> {
        if self.opened != Some(self.selected) {
            self.open(self.selected);
            return None;
        }
        self.run_action()
    }

    pub fn run_action(&self) -> Option<HomeAction> {
        let card = self.opened_card()?;
        Some(match &card.target {
            Some(route) => HomeAction::Navigate(route.clone()),
            None => HomeAction::Notice(t!("catalog.in_development").to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_train_is_playable() {
        let cards = catalog();
        assert_eq!(cards.len(), 3);
        assert!(cards[0].is_available());
        assert_eq!(cards[0].title, "Потяг");
        assert_eq!(cards[0].rules.len(), 3);
        assert!(cards[1..].iter().all(|c| !c.is_available()));
    }

    #[test]
    fn first_enter_opens_second_runs() {
        let mut home = HomeState::new();
        assert_eq!(home.activate(), None);
        assert_eq!(home.opened, Some(0));
        assert_eq!(home.activate(), Some(HomeAction::Navigate(Route::Select)));
    }

    #[test]
    fn unavailable_game_gives_a_notice() {
        let mut home = HomeState::new();
        home.prev();
        assert_eq!(home.selected, 2);
        home.activate();
        assert_eq!(
            home.activate(),
            Some(HomeAction::Notice(
                "Гра в активній розробці. Слідкуйте за оновленнями.".to_string()
            ))
        );
    }

    #[test]
    fn moving_keeps_the_opened_card_until_enter() {
        let mut home = HomeState::new();
        home.open(0);
        home.next();
        assert_eq!(home.opened_card().unwrap().id, GameId::Potyah);
        home.activate();
        assert_eq!(home.opened_card().unwrap().id, GameId::Letters);
    }
}
