//! Screen geometry. The same structs drive drawing and mouse hit-testing so a
//! click always lands on what was drawn.

use ratatui::layout::{Constraint, Direction, Layout, Rect, Size};

use crate::game::board::BoardGeometry;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // ≥100 cols: full-size wagons, details panel beside the cards
    Medium, // 60-99 cols: narrower wagons
    Narrow, // <60 cols: smallest wagons, stacked panels
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 100 {
            LayoutTier::Wide
        } else if area.width >= 60 {
            LayoutTier::Medium
        } else {
            LayoutTier::Narrow
        }
    }

    pub fn tile(&self) -> Size {
        match self {
            LayoutTier::Wide => Size::new(14, 5),
            LayoutTier::Medium => Size::new(12, 5),
            LayoutTier::Narrow => Size::new(10, 4),
        }
    }

    pub fn side_by_side(&self) -> bool {
        *self == LayoutTier::Wide
    }
}

pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let tier = LayoutTier::from_area(area);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: vertical[0],
            main: vertical[1],
            footer: vertical[2],
            tier,
        }
    }
}

pub const TOGGLE_WIDTH: u16 = 18;
pub const NAV_MENU_WIDTH: u16 = 22;

/// Title on the left, theme and menu toggles on the right.
pub struct HeaderLayout {
    pub title: Rect,
    pub theme_toggle: Rect,
    pub nav_toggle: Rect,
}

impl HeaderLayout {
    pub fn new(header: Rect) -> Self {
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(TOGGLE_WIDTH),
                Constraint::Length(TOGGLE_WIDTH),
            ])
            .split(header);

        Self {
            title: horizontal[0],
            theme_toggle: horizontal[1],
            nav_toggle: horizontal[2],
        }
    }

    /// Dropdown under the menu toggle, one row per item.
    pub fn nav_menu(&self, items: usize, screen: Rect) -> Rect {
        let width = NAV_MENU_WIDTH.min(screen.width);
        let right = self.nav_toggle.x + self.nav_toggle.width;
        let x = right.saturating_sub(width).max(screen.x);
        let y = self.nav_toggle.y + self.nav_toggle.height;
        let height = (items as u16 + 2).min(screen.height.saturating_sub(y - screen.y));
        Rect::new(x, y, width, height)
    }
}

/// Rows of a bordered list: one per item, inside the border.
pub fn list_rows(area: Rect, items: usize) -> Vec<Rect> {
    let inner_bottom = area.y + area.height.saturating_sub(1);
    (0..items as u16)
        .map(|i| Rect::new(area.x + 1, area.y + 1 + i, area.width.saturating_sub(2), 1))
        .filter(|r| r.y < inner_bottom)
        .collect()
}

pub const LOCOMOTIVE_WIDTH: u16 = 12;
pub const BUTTON_WIDTH: u16 = 24;

/// Game screen: status line, the train, the check button and the lower
/// area (loose wagons while building, the quiz afterwards).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameLayout {
    pub status: Rect,
    pub locomotive: Rect,
    pub slots: Vec<Rect>,
    pub check_button: Rect,
    pub lower: Rect,
    pub tile: Size,
    pub surface: Rect,
}

impl GameLayout {
    pub fn new(main: Rect, slot_count: usize, tier: LayoutTier) -> Self {
        let preferred = tier.tile();
        let count = slot_count.max(1) as u16;
        let room = main.width.saturating_sub(LOCOMOTIVE_WIDTH + 1);
        let tile_w = (room / count).saturating_sub(1).clamp(6, preferred.width);
        let tile = Size::new(tile_w, preferred.height);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(tile.height + 1),
                Constraint::Length(3),
                Constraint::Min(tile.height),
            ])
            .split(main);

        let train_row = vertical[1];
        let locomotive = Rect::new(
            train_row.x,
            train_row.y,
            LOCOMOTIVE_WIDTH.min(train_row.width),
            tile.height,
        );
        let first_x = train_row.x + LOCOMOTIVE_WIDTH + 1;
        let slots = (0..slot_count as u16)
            .map(|i| Rect::new(first_x + i * (tile.width + 1), train_row.y, tile.width, tile.height))
            .collect();

        let button_row = vertical[2];
        let check_button = Rect::new(
            button_row.x,
            button_row.y,
            BUTTON_WIDTH.min(button_row.width),
            button_row.height,
        );

        Self {
            status: vertical[0],
            locomotive,
            slots,
            check_button,
            lower: vertical[3],
            tile,
            surface: main,
        }
    }

    pub fn board_geometry(&self) -> BoardGeometry {
        BoardGeometry {
            surface: self.surface,
            free_area: self.lower,
            slots: self.slots.clone(),
            tile: self.tile,
        }
    }
}

/// Quiz panel: counter and question on top, one row per option, then the
/// feedback line and the action button.
pub struct QuizLayout {
    pub panel: Rect,
    pub question: Rect,
    pub options: Vec<Rect>,
    pub feedback: Rect,
    pub action: Rect,
}

impl QuizLayout {
    pub fn new(area: Rect, option_count: usize) -> Self {
        let inner = Rect::new(
            area.x + 1,
            area.y + 1,
            area.width.saturating_sub(2),
            area.height.saturating_sub(2),
        );
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(option_count as u16),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(inner);

        let options_area = vertical[1];
        let options = (0..option_count as u16)
            .map(|i| Rect::new(options_area.x, options_area.y + i, options_area.width, 1))
            .filter(|r| r.y < options_area.y + options_area.height)
            .collect();

        let action_row = vertical[4];
        Self {
            panel: area,
            question: vertical[0],
            options,
            feedback: vertical[2],
            action: Rect::new(
                action_row.x,
                action_row.y,
                BUTTON_WIDTH.min(action_row.width),
                action_row.height,
            ),
        }
    }
}

pub const LETTER_BUTTON_WIDTH: u16 = 5;

/// Selection page: prompt, a row of letter buttons, the category list and
/// the start button.
pub struct SelectLayout {
    pub label: Rect,
    pub letters: Vec<Rect>,
    pub categories: Vec<Rect>,
    pub start: Rect,
}

impl SelectLayout {
    pub fn new(main: Rect, letter_count: usize, category_count: usize) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(category_count as u16 * 3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(main);

        let letter_row = vertical[1];
        let letters = (0..letter_count as u16)
            .map(|i| {
                Rect::new(
                    letter_row.x + i * (LETTER_BUTTON_WIDTH + 1),
                    letter_row.y,
                    LETTER_BUTTON_WIDTH,
                    letter_row.height,
                )
            })
            .filter(|r| r.x + r.width <= letter_row.x + letter_row.width)
            .collect();

        let list = vertical[3];
        let categories = (0..category_count as u16)
            .map(|i| Rect::new(list.x, list.y + i * 3, list.width.min(48), 3))
            .filter(|r| r.y + r.height <= list.y + list.height)
            .collect();

        let start_row = vertical[4];
        Self {
            label: vertical[0],
            letters,
            categories,
            start: Rect::new(
                start_row.x,
                start_row.y,
                BUTTON_WIDTH.min(start_row.width),
                start_row.height,
            ),
        }
    }
}

pub const CARD_HEIGHT: u16 = 4;

/// Landing page: game cards and the details of the opened one.
pub struct HomeLayout {
    pub heading: Rect,
    pub cards: Vec<Rect>,
    pub details: Rect,
    pub details_action: Rect,
}

impl HomeLayout {
    pub fn new(main: Rect, card_count: usize, tier: LayoutTier) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(main);

        let direction = if tier.side_by_side() {
            Direction::Horizontal
        } else {
            Direction::Vertical
        };
        let cards_len = card_count as u16 * CARD_HEIGHT;
        let split = Layout::default()
            .direction(direction)
            .constraints(if tier.side_by_side() {
                [Constraint::Percentage(40), Constraint::Percentage(60)]
            } else {
                [Constraint::Length(cards_len), Constraint::Min(0)]
            })
            .split(vertical[1]);

        let list = split[0];
        let cards = (0..card_count as u16)
            .map(|i| Rect::new(list.x, list.y + i * CARD_HEIGHT, list.width, CARD_HEIGHT))
            .filter(|r| r.y + r.height <= list.y + list.height)
            .collect();

        let details = split[1];
        let action_y = (details.y + details.height).saturating_sub(4);
        Self {
            heading: vertical[0],
            cards,
            details,
            details_action: Rect::new(
                details.x + 2,
                action_y.max(details.y),
                BUTTON_WIDTH.min(details.width.saturating_sub(4)),
                3,
            ),
        }
    }
}

/// Result popup with its two buttons.
pub struct FinalLayout {
    pub panel: Rect,
    pub replay: Rect,
    pub menu: Rect,
}

impl FinalLayout {
    pub fn new(area: Rect) -> Self {
        let panel = centered_rect(50, 50, area);
        let row_y = (panel.y + panel.height).saturating_sub(4);
        let half = panel.width / 2;
        let width = BUTTON_WIDTH.min(half.saturating_sub(2));
        Self {
            panel,
            replay: Rect::new(panel.x + half.saturating_sub(width + 1), row_y, width, 3),
            menu: Rect::new(panel.x + half + 1, row_y, width, 3),
        }
    }
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = "  ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints {
        if hint.is_empty() {
            continue;
        }
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
            has_hint = true;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
            has_hint = true;
        }
    }

    if has_hint {
        out.push(current);
    }
    out
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 40;
    const MIN_POPUP_HEIGHT: u16 = 12;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_layout_fits_slots_in_the_train_row() {
        let main = Rect::new(0, 3, 120, 40);
        let layout = GameLayout::new(main, 5, LayoutTier::from_area(main));
        assert_eq!(layout.slots.len(), 5);
        for pair in layout.slots.windows(2) {
            assert!(pair[0].x + pair[0].width < pair[1].x);
        }
        let last = layout.slots.last().unwrap();
        assert!(last.x + last.width <= main.x + main.width);
        assert!(layout.lower.y >= layout.check_button.y + layout.check_button.height);
        assert_eq!(layout.board_geometry().free_area, layout.lower);
    }

    #[test]
    fn narrow_screens_shrink_wagons() {
        let main = Rect::new(0, 3, 70, 30);
        let layout = GameLayout::new(main, 6, LayoutTier::from_area(main));
        assert!(layout.tile.width < LayoutTier::Wide.tile().width);
        let last = layout.slots.last().unwrap();
        assert!(last.x + last.width <= main.x + main.width);
    }

    #[test]
    fn quiz_options_get_one_row_each() {
        let layout = QuizLayout::new(Rect::new(0, 20, 80, 16), 3);
        assert_eq!(layout.options.len(), 3);
        assert_eq!(layout.options[1].y, layout.options[0].y + 1);
        assert!(layout.action.y > layout.feedback.y);
    }

    #[test]
    fn nav_menu_hangs_under_its_toggle() {
        let screen = Rect::new(0, 0, 100, 30);
        let header = HeaderLayout::new(Rect::new(0, 0, 100, 3));
        let menu = header.nav_menu(3, screen);
        assert_eq!(menu.y, 3);
        assert_eq!(menu.height, 5);
        assert_eq!(menu.x + menu.width, 100);
        assert_eq!(list_rows(menu, 3).len(), 3);
    }

    #[test]
    fn test_pack_hint_lines_wraps() {
        let lines = pack_hint_lines(&["[a] one", "[b] two", "[c] three"], 20);
        assert_eq!(lines, vec!["  [a] one  [b] two", "  [c] three"]);
    }
}
