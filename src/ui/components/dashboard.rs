use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};
use rust_i18n::t;

use crate::ui::layout::FinalLayout;
use crate::ui::theme::Theme;

/// Result screen shown when the quiz is over.
pub struct Dashboard<'a> {
    pub message: &'a str,
    pub score_text: &'a str,
    pub ratio: f64,
    pub layout: &'a FinalLayout,
    pub theme: &'a Theme,
}

impl<'a> Dashboard<'a> {
    pub fn new(
        message: &'a str,
        score_text: &'a str,
        ratio: f64,
        layout: &'a FinalLayout,
        theme: &'a Theme,
    ) -> Self {
        Self {
            message,
            score_text,
            ratio,
            layout,
            theme,
        }
    }
}

impl Widget for Dashboard<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let panel = self.layout.panel;
        Clear.render(panel, buf);

        let block = Block::bordered()
            .title(format!(" {} ", t!("finish.title")))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(panel);
        block.render(panel, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(inner);

        let message = Paragraph::new(Line::from(Span::styled(
            self.message,
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        message.render(layout[1], buf);

        let score_color = if self.ratio >= 0.85 {
            colors.success()
        } else if self.ratio >= 0.5 {
            colors.warning()
        } else {
            colors.error()
        };
        let score = Paragraph::new(Line::from(Span::styled(
            self.score_text,
            Style::default().fg(score_color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        score.render(layout[2], buf);

        super::render_button(
            &format!("[r] {}", t!("finish.replay")),
            true,
            self.layout.replay,
            self.theme,
            buf,
        );
        super::render_button(
            &format!("[m] {}", t!("finish.menu")),
            true,
            self.layout.menu,
            self.theme,
            buf,
        );
    }
}
