use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::game::quiz::{OptionMark, QuizState};
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::layout::QuizLayout;
use crate::ui::theme::Theme;

pub struct QuizPanel<'a> {
    pub quiz: &'a QuizState,
    pub layout: &'a QuizLayout,
    pub theme: &'a Theme,
}

impl<'a> QuizPanel<'a> {
    pub fn new(quiz: &'a QuizState, layout: &'a QuizLayout, theme: &'a Theme) -> Self {
        Self {
            quiz,
            layout,
            theme,
        }
    }
}

impl Widget for QuizPanel<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let panel = self.layout.panel;
        Clear.render(panel, buf);
        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        block.render(panel, buf);

        let Some(question) = self.quiz.current() else {
            return;
        };

        let question_area = self.layout.question;
        let progress_row = Rect::new(question_area.x, question_area.y, question_area.width, 1);
        let ratio = self.quiz.index as f64 / self.quiz.total().max(1) as f64;
        ProgressBar::new(&self.quiz.counter_text(), ratio, self.theme).render(progress_row, buf);

        let text_row = Rect::new(
            question_area.x,
            question_area.y + 1,
            question_area.width,
            question_area.height.saturating_sub(1),
        );
        Paragraph::new(Span::styled(
            question.text.as_str(),
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        ))
        .wrap(Wrap { trim: true })
        .render(text_row, buf);

        let memory = question.is_memory();
        for (i, (option, row)) in question
            .options
            .iter()
            .zip(self.layout.options.iter())
            .enumerate()
        {
            let selected = memory && self.quiz.is_selected(option);
            let mark = self.quiz.marks.get(i).copied().flatten();
            let color = match mark {
                Some(OptionMark::Correct) => colors.success(),
                Some(OptionMark::Incorrect) => colors.error(),
                None if selected => colors.accent(),
                None if self.quiz.locked => colors.muted(),
                None => colors.fg(),
            };
            let mut style = Style::default().fg(color);
            if selected || mark.is_some() {
                style = style.add_modifier(Modifier::BOLD);
            }

            let check = match (memory, selected) {
                (false, _) => "",
                (true, true) => "[x] ",
                (true, false) => "[ ] ",
            };
            Paragraph::new(Line::from(vec![
                Span::styled(format!(" {}. ", i + 1), Style::default().fg(colors.muted())),
                Span::styled(format!("{check}{option}"), style),
            ]))
            .render(*row, buf);
        }

        if let Some(feedback) = &self.quiz.feedback {
            let color = if feedback.positive {
                colors.success()
            } else {
                colors.error()
            };
            Paragraph::new(Span::styled(feedback.text.as_str(), Style::default().fg(color)))
                .render(self.layout.feedback, buf);
        }

        if memory {
            let label = if self.quiz.retrying {
                t!("quiz.retry")
            } else {
                t!("quiz.check_answer")
            };
            super::render_button(
                &format!("[Enter] {label}"),
                !self.quiz.locked,
                self.layout.action,
                self.theme,
                buf,
            );
        }
    }
}
