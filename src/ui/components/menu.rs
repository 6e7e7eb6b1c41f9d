use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::catalog::HomeState;
use crate::ui::layout::HomeLayout;
use crate::ui::theme::Theme;

/// Landing page: the game cards and the details of the opened card.
pub struct Menu<'a> {
    pub home: &'a HomeState,
    pub layout: &'a HomeLayout,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn new(home: &'a HomeState, layout: &'a HomeLayout, theme: &'a Theme) -> Self {
        Self {
            home,
            layout,
            theme,
        }
    }

    fn render_details(&self, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let area = self.layout.details;
        let block = Block::bordered()
            .title(format!(" {} ", t!("catalog.details_heading")))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(card) = self.home.opened_card() else {
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled(
                card.title.as_str(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                card.description.as_str(),
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
        ];
        for rule in &card.rules {
            lines.push(Line::from(vec![
                Span::styled(" • ", Style::default().fg(colors.accent())),
                Span::styled(rule.as_str(), Style::default().fg(colors.fg())),
            ]));
        }
        if !card.is_available() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                t!("catalog.in_development").to_string(),
                Style::default().fg(colors.warning()),
            )));
        }
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);

        super::render_button(
            &card.action,
            card.is_available(),
            self.layout.details_action,
            self.theme,
            buf,
        );
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::default().style(Style::default().bg(colors.bg()));
        block.render(area, buf);

        let title_lines = vec![
            Line::from(Span::styled(
                t!("app.title").to_string(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                t!("app.subtitle").to_string(),
                Style::default().fg(colors.fg()),
            )),
        ];
        Paragraph::new(title_lines).render(self.layout.heading, buf);

        for (i, (card, rect)) in self
            .home
            .cards
            .iter()
            .zip(self.layout.cards.iter())
            .enumerate()
        {
            let is_selected = i == self.home.selected;
            let is_opened = self.home.opened == Some(i);
            let indicator = if is_selected { ">" } else { " " };

            let border = if is_selected {
                colors.border_focused()
            } else {
                colors.border()
            };
            let card_block = Block::bordered().border_style(Style::default().fg(border));
            let inner = card_block.inner(*rect);
            card_block.render(*rect, buf);

            let status_color = if card.is_available() {
                colors.success()
            } else {
                colors.muted()
            };
            let lines = vec![
                Line::from(vec![
                    Span::styled(
                        format!("{indicator} [{}] {}", i + 1, card.title),
                        Style::default()
                            .fg(if is_selected {
                                colors.accent()
                            } else {
                                colors.fg()
                            })
                            .add_modifier(if is_opened {
                                Modifier::BOLD
                            } else {
                                Modifier::empty()
                            }),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("    {}", card.status),
                    Style::default().fg(status_color),
                )),
            ];
            Paragraph::new(lines).render(inner, buf);
        }

        self.render_details(buf);
    }
}
