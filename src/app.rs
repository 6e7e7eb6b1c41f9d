use std::path::PathBuf;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::layout::Rect;
use rust_i18n::t;

use crate::catalog::{HomeAction, HomeState};
use crate::config::Config;
use crate::game::{GameError, GameSession, TOAST_DURATION, Tone};
use crate::images::ImageResolver;
use crate::route::Route;
use crate::selection::SelectionState;
use crate::toast::{self, Toast};
use crate::ui::components::nav_menu::NavMenu;
use crate::ui::layout::{AppLayout, GameLayout};
use crate::ui::theme::{Theme, ThemeMode};
use crate::words::WordBank;

/// How long the "not enough words" notice stays up.
pub const NOTICE_DURATION: Duration = Duration::from_millis(3000);
/// Delay before a failed game launch falls back to the selection page.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(3200);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Home,
    Select,
    Game,
    About,
}

pub struct App {
    pub screen: AppScreen,
    pub theme: Theme,
    pub theme_mode: ThemeMode,
    pub config: Config,
    pub bank: WordBank,
    pub images: ImageResolver,
    pub nav: NavMenu,
    pub home: HomeState,
    pub selection: SelectionState,
    pub game: Option<GameSession>,
    pub toast: Option<Toast>,
    pub pending_redirect: Option<(Instant, Route)>,
    /// Terminal size at the last draw; mouse hit-testing uses it.
    pub area: Rect,
    pub should_quit: bool,
    /// Session switch; `--no-sound` clears it without touching the config.
    pub sound: bool,
    /// Off in tests so toggling the theme does not touch the real config.
    pub persist_config: bool,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self::with_bank(config, WordBank::load(), SmallRng::from_entropy())
    }

    pub fn with_bank(config: Config, bank: WordBank, rng: SmallRng) -> Self {
        let theme_mode = ThemeMode::preferred(config.theme.as_deref());
        let images = ImageResolver::new(Some(PathBuf::from(&config.images_dir)));
        let selection = SelectionState::new(&bank);
        let sound = config.sound;

        Self {
            screen: AppScreen::Home,
            theme: Theme::for_mode(theme_mode),
            theme_mode,
            config,
            bank,
            images,
            nav: NavMenu::new(),
            home: HomeState::new(),
            selection,
            game: None,
            toast: None,
            pending_redirect: None,
            area: Rect::default(),
            should_quit: false,
            sound,
            persist_config: true,
            rng,
        }
    }

    pub fn route(&self) -> Route {
        match self.screen {
            AppScreen::Home => Route::Home,
            AppScreen::Select => Route::Select,
            AppScreen::About => Route::About,
            AppScreen::Game => self
                .game
                .as_ref()
                .map(|g| Route::Game {
                    letter: g.letter().to_string(),
                    category: g.category().to_string(),
                })
                .unwrap_or(Route::Select),
        }
    }

    pub fn navigate(&mut self, route: Route, now: Instant) {
        tracing::debug!(?route, "navigate");
        self.nav.close(false);
        self.pending_redirect = None;
        match route {
            Route::Home => self.screen = AppScreen::Home,
            Route::Select => {
                self.game = None;
                self.screen = AppScreen::Select;
            }
            Route::About => self.screen = AppScreen::About,
            Route::Game { letter, category } => self.start_game(&letter, &category, now),
        }
    }

    fn start_game(&mut self, letter: &str, category: &str, now: Instant) {
        let rng = SmallRng::from_rng(&mut self.rng).unwrap_or_else(|_| SmallRng::from_entropy());
        match GameSession::launch(&self.bank, letter, category, rng) {
            Ok(session) => {
                for item in &session.round().wagon_items {
                    self.images.resolve(session.letter(), &item.word);
                }
                self.game = Some(session);
                self.screen = AppScreen::Game;
                self.sync_geometry();
            }
            Err(err) => self.launch_failed(err, now),
        }
    }

    fn launch_failed(&mut self, err: GameError, now: Instant) {
        tracing::warn!("cannot start game: {err}");
        self.game = None;
        if err.is_missing_config() {
            self.screen = AppScreen::Select;
            return;
        }
        self.toast = Some(Toast::new(
            t!("game.not_enough_words").to_string(),
            now,
            NOTICE_DURATION,
        ));
        self.pending_redirect = Some((now + REDIRECT_DELAY, Route::Select));
    }

    pub fn show_toast(&mut self, text: String, now: Instant) {
        self.toast = Some(Toast::new(text, now, TOAST_DURATION));
    }

    /// Switch palettes for this run only.
    pub fn set_theme_mode(&mut self, mode: ThemeMode) {
        self.theme_mode = mode;
        self.theme = Theme::for_mode(mode);
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme_mode(self.theme_mode.toggle());
        self.config.theme = Some(self.theme_mode.as_str().to_string());
        if self.persist_config {
            if let Err(err) = self.config.save() {
                tracing::warn!("could not save theme preference: {err:#}");
            }
        }
    }

    pub fn home_activate(&mut self, action: Option<HomeAction>, now: Instant) {
        match action {
            Some(HomeAction::Navigate(route)) => self.navigate(route, now),
            Some(HomeAction::Notice(text)) => self.show_toast(text, now),
            None => {}
        }
    }

    pub fn start_selected(&mut self, now: Instant) {
        match self.selection.start() {
            Some(route) => self.navigate(route, now),
            None => self.show_toast(t!("select.need_both").to_string(), now),
        }
    }

    pub fn replay(&mut self) {
        if let Some(game) = self.game.as_mut() {
            if let Err(err) = game.reset_game() {
                tracing::error!("reset failed: {err}");
                return;
            }
            for item in &game.round().wagon_items {
                self.images.resolve(game.letter(), &item.word);
            }
        }
        self.sync_geometry();
    }

    pub fn game_layout(&self) -> Option<GameLayout> {
        let game = self.game.as_ref()?;
        let app_layout = AppLayout::new(self.area);
        Some(GameLayout::new(
            app_layout.main,
            game.board().slots().len(),
            app_layout.tier,
        ))
    }

    /// Push the current layout into the board so drops and scatters use
    /// what is on screen.
    pub fn sync_geometry(&mut self) {
        if let Some(layout) = self.game_layout() {
            if let Some(game) = self.game.as_mut() {
                game.set_geometry(layout.board_geometry());
            }
        }
    }

    pub fn resize(&mut self, area: Rect) {
        if self.area != area {
            self.area = area;
            self.sync_geometry();
        }
    }

    /// Advance timers. Returns the tones the game asked for.
    pub fn tick(&mut self, now: Instant) -> Vec<Tone> {
        toast::expire(&mut self.toast, now);

        if let Some((at, route)) = self.pending_redirect.clone() {
            if now >= at {
                self.navigate(route, now);
            }
        }

        match self.game.as_mut() {
            Some(game) => {
                game.tick(now);
                let cues = game.drain_cues();
                if self.sound { cues } else { Vec::new() }
            }
            None => Vec::new(),
        }
    }

    /// Game toast first, then the app-level one.
    pub fn visible_toast(&self) -> Option<&Toast> {
        self.game
            .as_ref()
            .filter(|_| self.screen == AppScreen::Game)
            .and_then(GameSession::toast)
            .or(self.toast.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Phase;

    fn app() -> App {
        let mut app = App::with_bank(
            Config::default(),
            WordBank::load(),
            SmallRng::seed_from_u64(42),
        );
        app.persist_config = false;
        app.resize(Rect::new(0, 0, 120, 40));
        app
    }

    fn game_route(letter: &str, category: &str) -> Route {
        Route::Game {
            letter: letter.to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn starts_on_home() {
        let app = app();
        assert_eq!(app.screen, AppScreen::Home);
        assert_eq!(app.route(), Route::Home);
    }

    #[test]
    fn game_route_launches_a_session_with_scattered_wagons() {
        let mut app = app();
        app.navigate(game_route("Б", "pochatok"), Instant::now());
        assert_eq!(app.screen, AppScreen::Game);
        assert_eq!(app.route(), game_route("б", "pochatok"));

        let game = app.game.as_ref().unwrap();
        assert_eq!(game.phase(), Phase::Build);
        assert!(game.board().wagons().iter().all(|w| w.free_pos.is_some()));
    }

    #[test]
    fn missing_config_goes_straight_to_selection() {
        let mut app = app();
        app.navigate(game_route("б", "kosmos"), Instant::now());
        assert_eq!(app.screen, AppScreen::Select);
        assert!(app.game.is_none());
        assert!(app.toast.is_none());
    }

    #[test]
    fn thin_pool_shows_notice_then_redirects() {
        let bank = WordBank::from_json(
            r#"{"letters":[{"code":"ж","name":"Ж","categories":[
                {"key":"pochatok","label":"На початку","words":["жаба","жук","жолудь","жито"]}]}]}"#,
        )
        .unwrap();
        let mut app = App::with_bank(Config::default(), bank, SmallRng::seed_from_u64(1));
        app.persist_config = false;

        let now = Instant::now();
        app.navigate(game_route("ж", "pochatok"), now);
        assert_eq!(app.screen, AppScreen::Home);
        assert_eq!(
            app.visible_toast().unwrap().text,
            "Для цієї категорії не вистачає слів. Оберіть іншу."
        );

        app.tick(now + NOTICE_DURATION);
        assert!(app.toast.is_none());
        assert_eq!(app.screen, AppScreen::Home);
        app.tick(now + REDIRECT_DELAY);
        assert_eq!(app.screen, AppScreen::Select);
    }

    #[test]
    fn theme_toggle_updates_config() {
        let mut app = app();
        let before = app.theme_mode;
        app.toggle_theme();
        assert_eq!(app.theme_mode, before.toggle());
        assert_eq!(app.config.theme.as_deref(), Some(app.theme_mode.as_str()));
        assert_eq!(app.theme.name, app.theme_mode.as_str());
    }

    #[test]
    fn start_without_picks_warns() {
        let mut app = app();
        app.navigate(Route::Select, Instant::now());
        app.start_selected(Instant::now());
        assert_eq!(app.screen, AppScreen::Select);
        assert_eq!(app.toast.as_ref().unwrap().text, "Оберіть літеру та категорію");
    }

    #[test]
    fn app_toasts_share_the_game_duration() {
        let mut app = app();
        let now = Instant::now();
        app.show_toast("привіт".to_string(), now);
        app.tick(now + TOAST_DURATION - Duration::from_millis(1));
        assert!(app.toast.is_some());
        app.tick(now + TOAST_DURATION);
        assert!(app.toast.is_none());
    }

    #[test]
    fn sound_off_swallows_cues() {
        let mut app = app();
        app.sound = false;
        app.navigate(game_route("б", "pochatok"), Instant::now());
        let now = Instant::now();
        let game = app.game.as_mut().unwrap();
        let ids: Vec<_> = game
            .board()
            .wagons()
            .iter()
            .filter(|w| w.item.is_correct)
            .map(|w| w.id)
            .collect();
        for (slot, id) in ids.into_iter().enumerate() {
            game.place(id, Some(slot), now);
        }
        game.verify_train(now);
        assert!(app.tick(now).is_empty());
    }
}
