use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::selection::SelectionState;
use crate::ui::layout::SelectLayout;
use crate::ui::theme::Theme;

pub struct SelectPage<'a> {
    pub state: &'a SelectionState,
    pub layout: &'a SelectLayout,
    pub theme: &'a Theme,
}

impl Widget for SelectPage<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        Paragraph::new(vec![
            Line::from(Span::styled(
                t!("select.title").to_string(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.state.label.as_str(),
                Style::default().fg(colors.fg()),
            )),
        ])
        .render(self.layout.label, buf);

        for (i, (letter, rect)) in self
            .state
            .letters
            .iter()
            .zip(self.layout.letters.iter())
            .enumerate()
        {
            let active = self.state.active_letter == Some(i);
            let (border, text) = if active {
                (colors.border_focused(), Style::default().fg(colors.bg()).bg(colors.accent()))
            } else {
                (colors.border(), Style::default().fg(colors.fg()))
            };
            let block = Block::bordered().border_style(Style::default().fg(border));
            let inner = block.inner(*rect);
            block.render(*rect, buf);
            Paragraph::new(Span::styled(letter.name.as_str(), text.add_modifier(Modifier::BOLD)))
                .alignment(Alignment::Center)
                .render(inner, buf);
        }

        for (i, (category, rect)) in self
            .state
            .categories
            .iter()
            .zip(self.layout.categories.iter())
            .enumerate()
        {
            let active = self.state.active_category == Some(i);
            let border = if active {
                colors.border_focused()
            } else {
                colors.border()
            };
            let block = Block::bordered().border_style(Style::default().fg(border));
            let inner = block.inner(*rect);
            block.render(*rect, buf);

            let label_style = if active {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            Paragraph::new(Line::from(vec![
                Span::styled(category.label.as_str(), label_style),
                Span::styled(
                    format!("  {}", t!("select.word_count", count = category.word_count)),
                    Style::default().fg(colors.muted()),
                ),
            ]))
            .render(inner, buf);
        }

        super::render_button(
            &format!("[Enter] {}", t!("select.start")),
            self.state.can_start(),
            self.layout.start,
            self.theme,
            buf,
        );
    }
}
