use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};
use rust_i18n::t;
use tracing_subscriber::EnvFilter;

use potyah::app::{App, AppScreen};
use potyah::config::Config;
use potyah::event::{AppEvent, EventHandler};
use potyah::game::board::PointerId;
use potyah::game::{Phase, Tone};
use potyah::images::ImageResolver;
use potyah::route::Route;
use potyah::ui::components::dashboard::Dashboard;
use potyah::ui::components::menu::Menu;
use potyah::ui::components::nav_menu::{NavMenu, NavMenuView};
use potyah::ui::components::quiz_panel::QuizPanel;
use potyah::ui::components::render_button;
use potyah::ui::components::select_page::SelectPage;
use potyah::ui::components::train::TrainView;
use potyah::ui::layout::{
    AppLayout, FinalLayout, HeaderLayout, HomeLayout, QuizLayout, SelectLayout, centered_rect,
    pack_hint_lines,
};
use potyah::ui::theme::ThemeMode;

rust_i18n::i18n!("locales", fallback = "uk");

/// The terminal has a single mouse.
const MOUSE_POINTER: PointerId = 0;

#[derive(Parser)]
#[command(name = "potyah", version, about = "Word-train game for speech-therapy practice")]
struct Cli {
    #[arg(short, long, help = "Theme for this run (light, dark)")]
    theme: Option<String>,

    #[arg(short, long, help = "Letter to open on the selection page")]
    letter: Option<String>,

    #[arg(short, long, requires = "letter", help = "Category key; starts the game directly")]
    category: Option<String>,

    #[arg(long, help = "Directory with wagon pictures")]
    images_dir: Option<PathBuf>,

    #[arg(long, help = "Disable the terminal bell cues")]
    no_sound: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();
    rust_i18n::set_locale("uk");

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!("config unreadable, using defaults: {err:#}");
        Config::default()
    });
    let mut app = App::new(config);

    if let Some(name) = cli.theme.as_deref() {
        match ThemeMode::parse(name) {
            Some(mode) => app.set_theme_mode(mode),
            None => eprintln!("Unknown theme '{name}', expected light or dark"),
        }
    }
    if let Some(dir) = cli.images_dir {
        app.images = ImageResolver::new(Some(dir));
    }
    if cli.no_sound {
        app.sound = false;
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;
    app.resize(Rect::new(0, 0, size.width, size.height));

    let now = Instant::now();
    match (cli.letter, cli.category) {
        (Some(letter), Some(category)) => app.navigate(Route::Game { letter, category }, now),
        (Some(letter), None) => {
            app.navigate(Route::Select, now);
            let bank = &app.bank;
            app.selection.choose_letter_code(bank, &letter);
        }
        _ => {}
    }

    let events = EventHandler::new(Duration::from_millis(50));
    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!("{err:#}");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Log to a file; the terminal belongs to the game.
fn init_logging() {
    let Some(dir) = dirs::data_dir().map(|d| d.join("potyah")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("potyah.log"))
    else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
            AppEvent::Tick => {}
            AppEvent::Resize(w, h) => app.resize(Rect::new(0, 0, w, h)),
        }

        let cues = app.tick(Instant::now());
        play_cues(&mut io::stdout(), &cues);

        if app.should_quit {
            return Ok(());
        }
    }
}

/// One bell for success, two for a miss.
fn play_cues(out: &mut impl Write, cues: &[Tone]) {
    if cues.is_empty() {
        return;
    }
    for cue in cues {
        let bells: &[u8] = match cue {
            Tone::Success => b"\x07",
            Tone::Failure => b"\x07\x07",
        };
        if let Err(err) = out.write_all(bells) {
            tracing::debug!("bell failed: {err}");
            return;
        }
    }
    if let Err(err) = out.flush() {
        tracing::debug!("bell flush failed: {err}");
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    let now = Instant::now();

    if app.nav.is_open() {
        match key.code {
            KeyCode::Esc | KeyCode::F(2) => app.nav.close(true),
            KeyCode::Up | KeyCode::Char('k') => app.nav.prev(),
            KeyCode::Down | KeyCode::Char('j') => app.nav.next(),
            KeyCode::Enter => {
                if let Some(route) = app.nav.activate_focused() {
                    app.navigate(route, now);
                }
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::F(2) => {
            app.nav.toggle();
            return;
        }
        KeyCode::Char('t') => {
            app.toggle_theme();
            return;
        }
        _ => {}
    }

    match app.screen {
        AppScreen::Home => handle_home_key(app, key, now),
        AppScreen::Select => handle_select_key(app, key, now),
        AppScreen::Game => handle_game_key(app, key, now),
        AppScreen::About => {
            if key.code == KeyCode::Esc {
                app.navigate(Route::Home, now);
            }
        }
    }
}

fn handle_home_key(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.home.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.home.next(),
        KeyCode::Enter => {
            let action = app.home.activate();
            app.home_activate(action, now);
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as usize) - ('1' as usize);
            app.home.open(index);
        }
        _ => {}
    }
}

fn handle_select_key(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Esc => app.navigate(Route::Home, now),
        KeyCode::Left | KeyCode::Char('h') => {
            let bank = &app.bank;
            app.selection.move_letter(bank, -1);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            let bank = &app.bank;
            app.selection.move_letter(bank, 1);
        }
        KeyCode::Up | KeyCode::Char('k') => app.selection.move_category(-1),
        KeyCode::Down | KeyCode::Char('j') => app.selection.move_category(1),
        KeyCode::Enter => app.start_selected(now),
        _ => {}
    }
}

fn handle_game_key(app: &mut App, key: KeyEvent, now: Instant) {
    if key.code == KeyCode::Esc {
        app.navigate(Route::Select, now);
        return;
    }
    let Some(phase) = app.game.as_ref().map(|g| g.phase()) else {
        return;
    };

    match phase {
        Phase::Build => {
            let Some(game) = app.game.as_mut() else {
                return;
            };
            match key.code {
                KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => game.cycle_focus(false),
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => game.cycle_focus(true),
                KeyCode::Char(c @ '1'..='9') => {
                    let slot = (c as usize) - ('1' as usize);
                    game.place_focused(Some(slot), now);
                }
                KeyCode::Backspace | KeyCode::Char('0') => {
                    game.place_focused(None, now);
                }
                KeyCode::Enter => game.verify_train(now),
                _ => {}
            }
        }
        Phase::Ready => {}
        Phase::Quiz => {
            let Some(game) = app.game.as_mut() else {
                return;
            };
            match key.code {
                KeyCode::Char(c @ '1'..='9') => {
                    let index = (c as usize) - ('1' as usize);
                    game.choose_option(index, now);
                }
                KeyCode::Enter => {
                    game.check_memory(now);
                }
                _ => {}
            }
        }
        Phase::Finished => match key.code {
            KeyCode::Char('r') => app.replay(),
            KeyCode::Char('m') => app.navigate(Route::Select, now),
            _ => {}
        },
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let at = Position::new(mouse.column, mouse.row);
    let now = Instant::now();

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_click(app, at, now),
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(game) = app.game.as_mut() {
                game.drag_move(MOUSE_POINTER, at);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(game) = app.game.as_mut() {
                game.end_drag(MOUSE_POINTER, at, now);
            }
        }
        _ => {}
    }
}

fn handle_click(app: &mut App, at: Position, now: Instant) {
    let app_layout = AppLayout::new(app.area);
    let header = HeaderLayout::new(app_layout.header);

    if app.nav.is_open() {
        let dropdown = header.nav_menu(NavMenu::items().len(), app.area);
        if dropdown.contains(at) {
            if let Some(route) = nav_row_at(dropdown, at).and_then(|row| app.nav.activate(row)) {
                app.navigate(route, now);
            }
        } else {
            app.nav.close(false);
        }
        return;
    }

    if header.theme_toggle.contains(at) {
        app.toggle_theme();
        return;
    }
    if header.nav_toggle.contains(at) {
        app.nav.toggle();
        return;
    }

    match app.screen {
        AppScreen::Home => {
            let layout = HomeLayout::new(app_layout.main, app.home.cards.len(), app_layout.tier);
            if let Some(index) = layout.cards.iter().position(|r| r.contains(at)) {
                app.home.open(index);
            } else if app.home.opened.is_some() && layout.details_action.contains(at) {
                let action = app.home.run_action();
                app.home_activate(action, now);
            }
        }
        AppScreen::Select => {
            let layout = SelectLayout::new(
                app_layout.main,
                app.selection.letters.len(),
                app.selection.categories.len(),
            );
            if let Some(index) = layout.letters.iter().position(|r| r.contains(at)) {
                let bank = &app.bank;
                app.selection.choose_letter(bank, index);
            } else if let Some(index) = layout.categories.iter().position(|r| r.contains(at)) {
                app.selection.choose_category(index);
            } else if layout.start.contains(at) {
                app.start_selected(now);
            }
        }
        AppScreen::Game => handle_game_click(app, at, now),
        AppScreen::About => {}
    }
}

/// Item row under `at`, or `None` on the dropdown's border.
fn nav_row_at(dropdown: Rect, at: Position) -> Option<usize> {
    let inner_top = dropdown.y + 1;
    let inner_bottom = dropdown.bottom().saturating_sub(1);
    let inner_left = dropdown.x + 1;
    let inner_right = dropdown.right().saturating_sub(1);
    if at.y < inner_top || at.y >= inner_bottom || at.x < inner_left || at.x >= inner_right {
        return None;
    }
    Some((at.y - inner_top) as usize)
}

fn handle_game_click(app: &mut App, at: Position, now: Instant) {
    let Some(layout) = app.game_layout() else {
        return;
    };
    let Some(phase) = app.game.as_ref().map(|g| g.phase()) else {
        return;
    };

    match phase {
        Phase::Build => {
            let Some(game) = app.game.as_mut() else {
                return;
            };
            if layout.check_button.contains(at) {
                game.verify_train(now);
            } else {
                game.begin_drag(MOUSE_POINTER, at);
            }
        }
        Phase::Ready => {}
        Phase::Quiz => {
            let Some(game) = app.game.as_mut() else {
                return;
            };
            let Some(option_count) = game
                .quiz()
                .and_then(|q| q.current())
                .map(|q| q.options.len())
            else {
                return;
            };
            let quiz_layout = QuizLayout::new(layout.lower, option_count);
            if let Some(index) = quiz_layout.options.iter().position(|r| r.contains(at)) {
                game.choose_option(index, now);
            } else if quiz_layout.action.contains(at) {
                game.check_memory(now);
            }
        }
        Phase::Finished => {
            let final_layout = FinalLayout::new(app.area);
            if final_layout.replay.contains(at) {
                app.replay();
            } else if final_layout.menu.contains(at) {
                app.navigate(Route::Select, now);
            }
        }
    }
}

// -- rendering ------------------------------------------------------------

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let app_layout = AppLayout::new(area);
    render_header(frame, app, &app_layout);

    match app.screen {
        AppScreen::Home => render_home(frame, app, &app_layout),
        AppScreen::Select => render_select(frame, app, &app_layout),
        AppScreen::Game => render_game(frame, app, &app_layout),
        AppScreen::About => render_about(frame, app, &app_layout),
    }

    render_footer(frame, app, &app_layout);
    render_toast(frame, app, &app_layout);

    if app.nav.is_open() {
        let header = HeaderLayout::new(app_layout.header);
        let dropdown = header.nav_menu(NavMenu::items().len(), area);
        let current = app.route();
        frame.render_widget(
            NavMenuView {
                menu: &app.nav,
                current: &current,
                theme: &app.theme,
            },
            dropdown,
        );
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, app_layout: &AppLayout) {
    let colors = &app.theme.colors;
    let header = HeaderLayout::new(app_layout.header);
    let header_style = Style::default().fg(colors.header_fg()).bg(colors.header_bg());

    let block = Block::bordered()
        .border_style(Style::default().fg(colors.border()))
        .style(header_style);
    let title_inner = block.inner(app_layout.header);
    frame.render_widget(block, app_layout.header);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", t!("app.title")),
            header_style.add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", t!("app.subtitle")),
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]));
    frame.render_widget(
        title,
        title_inner.intersection(header.title),
    );

    let theme_label = format!("[t] {} {}", app.theme_mode.icon(), app.theme_mode.label());
    let nav_label = format!("[F2] {}", app.nav.toggle_label());
    let buf = frame.buffer_mut();
    render_button(&theme_label, true, header.theme_toggle, &app.theme, buf);
    render_button(&nav_label, true, header.nav_toggle, &app.theme, buf);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, app_layout: &AppLayout) {
    let colors = &app.theme.colors;
    let hints = match app.screen {
        AppScreen::Home => t!("app.footer_home"),
        AppScreen::Select => t!("app.footer_select"),
        AppScreen::About => t!("app.footer_about"),
        AppScreen::Game => match app.game.as_ref().map(|g| g.phase()) {
            Some(Phase::Quiz) => t!("app.footer_quiz"),
            Some(Phase::Finished) => t!("app.footer_finished"),
            _ => t!("app.footer_build"),
        },
    };
    let line = pack_hint_lines(&[hints.trim()], app_layout.footer.width as usize)
        .into_iter()
        .next()
        .unwrap_or_default();
    let footer = Paragraph::new(Line::from(Span::styled(
        line,
        Style::default().fg(colors.muted()),
    )));
    frame.render_widget(footer, app_layout.footer);
}

fn render_toast(frame: &mut ratatui::Frame, app: &App, app_layout: &AppLayout) {
    let Some(toast) = app.visible_toast() else {
        return;
    };
    let colors = &app.theme.colors;
    let main = app_layout.main;
    let width = (toast.text.chars().count() as u16 + 4).min(main.width);
    let area = Rect::new(
        main.x + (main.width - width) / 2,
        (main.y + main.height).saturating_sub(3).max(main.y),
        width,
        3.min(main.height),
    );
    frame.render_widget(Clear, area);
    let toast_widget = Paragraph::new(toast.text.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(colors.fg()).bg(colors.bg()))
        .block(
            Block::bordered()
                .border_style(Style::default().fg(colors.warning()))
                .style(Style::default().bg(colors.bg())),
        );
    frame.render_widget(toast_widget, area);
}

fn render_home(frame: &mut ratatui::Frame, app: &App, app_layout: &AppLayout) {
    let layout = HomeLayout::new(app_layout.main, app.home.cards.len(), app_layout.tier);
    let menu = Menu::new(&app.home, &layout, &app.theme);
    frame.render_widget(&menu, app_layout.main);
}

fn render_select(frame: &mut ratatui::Frame, app: &App, app_layout: &AppLayout) {
    let layout = SelectLayout::new(
        app_layout.main,
        app.selection.letters.len(),
        app.selection.categories.len(),
    );
    frame.render_widget(
        SelectPage {
            state: &app.selection,
            layout: &layout,
            theme: &app.theme,
        },
        app_layout.main,
    );
}

fn render_game(frame: &mut ratatui::Frame, app: &App, app_layout: &AppLayout) {
    let (Some(game), Some(layout)) = (app.game.as_ref(), app.game_layout()) else {
        return;
    };
    let colors = &app.theme.colors;

    let status = Paragraph::new(Line::from(Span::styled(
        game.status(),
        Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
    )))
    .wrap(Wrap { trim: true });
    frame.render_widget(status, layout.status);

    if game.phase() == Phase::Build {
        render_button(
            &format!("[Enter] {}", t!("game.check")),
            game.board().dragging().is_none(),
            layout.check_button,
            &app.theme,
            frame.buffer_mut(),
        );
    }

    if let (Phase::Quiz | Phase::Finished, Some(quiz)) = (game.phase(), game.quiz()) {
        let option_count = quiz.current().map_or(0, |q| q.options.len());
        let quiz_layout = QuizLayout::new(layout.lower, option_count);
        frame.render_widget(QuizPanel::new(quiz, &quiz_layout, &app.theme), layout.lower);
    }

    frame.render_widget(
        TrainView {
            session: game,
            layout: &layout,
            images: &app.images,
            theme: &app.theme,
        },
        app_layout.main,
    );

    if game.phase() == Phase::Finished {
        let final_layout = FinalLayout::new(frame.area());
        let message = game.final_message().unwrap_or_default();
        let score_text = game.score_text().unwrap_or_default();
        let ratio = game
            .quiz()
            .map_or(0.0, |q| q.score as f64 / q.total().max(1) as f64);
        frame.render_widget(
            Dashboard::new(message, &score_text, ratio, &final_layout, &app.theme),
            final_layout.panel,
        );
    }
}

fn render_about(frame: &mut ratatui::Frame, app: &App, app_layout: &AppLayout) {
    let colors = &app.theme.colors;
    let area = centered_rect(70, 60, app_layout.main);
    let block = Block::bordered()
        .title(format!(" {} ", t!("about.title")))
        .border_style(Style::default().fg(colors.border_focused()));
    let body = Paragraph::new(vec![
        Line::from(t!("about.body_1").to_string()),
        Line::from(""),
        Line::from(t!("about.body_2").to_string()),
        Line::from(""),
        Line::from(t!("about.body_3").to_string()),
    ])
    .style(Style::default().fg(colors.fg()))
    .wrap(Wrap { trim: true })
    .block(block);
    body.render(area, frame.buffer_mut());
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use potyah::ui::components::nav_menu::NavFocus;
    use potyah::words::WordBank;

    fn app() -> App {
        let mut app = App::with_bank(
            Config::default(),
            WordBank::load(),
            SmallRng::seed_from_u64(9),
        );
        app.persist_config = false;
        app.resize(Rect::new(0, 0, 120, 40));
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn dropdown(app: &App) -> Rect {
        let header = HeaderLayout::new(AppLayout::new(app.area).header);
        header.nav_menu(NavMenu::items().len(), app.area)
    }

    #[test]
    fn f2_opens_nav_and_escape_closes_it() {
        let mut app = app();
        press(&mut app, KeyCode::F(2));
        assert!(app.nav.is_open());
        press(&mut app, KeyCode::Esc);
        assert!(!app.nav.is_open());
        assert_eq!(app.nav.focus(), NavFocus::Toggle);
        assert_eq!(app.screen, AppScreen::Home);
    }

    struct StuckTerminal {
        written: Vec<u8>,
    }

    impl Write for StuckTerminal {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("terminal gone"))
        }
    }

    #[test]
    fn cues_ring_once_or_twice() {
        let mut out = Vec::new();
        play_cues(&mut out, &[Tone::Success, Tone::Failure]);
        assert_eq!(out, b"\x07\x07\x07");
    }

    #[test]
    fn failed_flush_keeps_the_bells_written() {
        let mut out = StuckTerminal { written: Vec::new() };
        play_cues(&mut out, &[Tone::Failure]);
        assert_eq!(out.written, b"\x07\x07");
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = app();
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn nav_border_clicks_do_nothing() {
        let mut app = app();
        press(&mut app, KeyCode::F(2));
        let menu = dropdown(&app);

        handle_click(&mut app, Position::new(menu.x + 3, menu.y), Instant::now());
        assert!(app.nav.is_open());
        assert_eq!(app.screen, AppScreen::Home);

        handle_click(
            &mut app,
            Position::new(menu.x + 3, menu.bottom() - 1),
            Instant::now(),
        );
        assert!(app.nav.is_open());
        assert_eq!(app.screen, AppScreen::Home);

        // second row is the selection page
        handle_click(&mut app, Position::new(menu.x + 3, menu.y + 2), Instant::now());
        assert!(!app.nav.is_open());
        assert_eq!(app.screen, AppScreen::Select);
    }

    #[test]
    fn clicking_check_verifies_the_train() {
        let mut app = app();
        let now = Instant::now();
        app.navigate(
            Route::Game {
                letter: "б".into(),
                category: "pochatok".into(),
            },
            now,
        );
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

        let button = app.game_layout().unwrap().check_button;
        let centre = Position::new(button.x + button.width / 2, button.y + 1);
        handle_click(&mut app, centre, now);
        assert_eq!(app.game.as_ref().map(|g| g.phase()), Some(Phase::Ready));
    }
}
