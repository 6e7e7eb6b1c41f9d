use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};
use rust_i18n::t;

use crate::route::Route;
use crate::ui::layout::list_rows;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavFocus {
    /// Focus sits on the menu toggle in the header.
    Toggle,
    Item(usize),
    /// Focus left the header (click elsewhere).
    None,
}

/// Collapsible site navigation.
#[derive(Clone, Debug)]
pub struct NavMenu {
    open: bool,
    focus: NavFocus,
}

impl Default for NavMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl NavMenu {
    pub fn new() -> Self {
        Self {
            open: false,
            focus: NavFocus::None,
        }
    }

    pub fn items() -> Vec<(String, Route)> {
        vec![
            (t!("nav.home").to_string(), Route::Home),
            (t!("nav.select").to_string(), Route::Select),
            (t!("nav.about").to_string(), Route::About),
        ]
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn focus(&self) -> NavFocus {
        self.focus
    }

    pub fn toggle_label(&self) -> String {
        if self.open {
            t!("nav.close").to_string()
        } else {
            t!("nav.open").to_string()
        }
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close(false);
        } else {
            self.open();
        }
    }

    pub fn open(&mut self) {
        self.open = true;
        self.focus = NavFocus::Item(0);
    }

    /// Close the dropdown. Escape passes `restore_focus` so the toggle
    /// takes focus back; a click elsewhere does not.
    pub fn close(&mut self, restore_focus: bool) {
        if !self.open {
            return;
        }
        self.open = false;
        self.focus = if restore_focus {
            NavFocus::Toggle
        } else {
            NavFocus::None
        };
    }

    pub fn next(&mut self) {
        let len = Self::items().len();
        if let NavFocus::Item(i) = self.focus {
            self.focus = NavFocus::Item((i + 1) % len);
        }
    }

    pub fn prev(&mut self) {
        let len = Self::items().len();
        if let NavFocus::Item(i) = self.focus {
            self.focus = NavFocus::Item((i + len - 1) % len);
        }
    }

    /// Follow item `index`; the menu closes on the way out.
    pub fn activate(&mut self, index: usize) -> Option<Route> {
        if !self.open {
            return None;
        }
        let route = Self::items().into_iter().nth(index).map(|(_, r)| r)?;
        self.close(false);
        Some(route)
    }

    pub fn activate_focused(&mut self) -> Option<Route> {
        match self.focus {
            NavFocus::Item(i) => self.activate(i),
            _ => None,
        }
    }
}

pub struct NavMenuView<'a> {
    pub menu: &'a NavMenu,
    pub current: &'a Route,
    pub theme: &'a Theme,
}

impl Widget for NavMenuView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        Clear.render(area, buf);

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.header_bg()));
        block.render(area, buf);

        let items = NavMenu::items();
        for (i, (row, (label, route))) in list_rows(area, items.len())
            .into_iter()
            .zip(items.iter())
            .enumerate()
        {
            let focused = self.menu.focus() == NavFocus::Item(i);
            let here = route == self.current;
            let mut style = Style::default().fg(colors.header_fg());
            if here {
                style = style.bg(colors.accent_dim()).add_modifier(Modifier::BOLD);
            }
            if focused {
                style = style.fg(colors.bg()).bg(colors.accent());
            }
            let marker = if focused { "›" } else { " " };
            Paragraph::new(Line::from(Span::styled(format!("{marker} {label}"), style)))
                .render(row, buf);
        }
    }
}
