use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use crate::game::board::Placement;
use crate::game::session::GameSession;
use crate::images::{ImageResolver, WagonImage};
use crate::ui::layout::GameLayout;
use crate::ui::theme::Theme;

/// Locomotive, slots and every visible wagon.
pub struct TrainView<'a> {
    pub session: &'a GameSession,
    pub layout: &'a GameLayout,
    pub images: &'a ImageResolver,
    pub theme: &'a Theme,
}

impl TrainView<'_> {
    fn render_locomotive(&self, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let area = self.layout.locomotive;
        let block = Block::bordered()
            .border_style(Style::default().fg(colors.locomotive()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::from(Span::styled(
                "▄█▀▀█▄",
                Style::default().fg(colors.locomotive()),
            )),
            Line::from(Span::styled(
                self.session.letter_name().to_string(),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("o  o", Style::default().fg(colors.muted()))),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }

    fn render_slots(&self, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let board = self.session.board();
        let hover = board.hovered_slot();
        let hidden = self.session.train_hidden();

        for (i, rect) in self.layout.slots.iter().enumerate() {
            let marked = board.slot_marks().get(i).copied().unwrap_or(false);
            let border = if hover == Some(i) {
                colors.slot_hover()
            } else if marked {
                colors.success()
            } else {
                colors.border()
            };
            let bg = if hover == Some(i) {
                colors.slot_hover()
            } else {
                colors.slot()
            };
            let block = Block::bordered()
                .title(format!(" {} ", i + 1))
                .border_style(Style::default().fg(border))
                .style(Style::default().bg(bg));
            let inner = block.inner(*rect);
            block.render(*rect, buf);

            if hidden {
                Paragraph::new("?")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(colors.muted()))
                    .render(inner, buf);
            }
        }

        // rails under the whole train
        let rail_y = self.layout.locomotive.y + self.layout.locomotive.height;
        let end = self
            .layout
            .slots
            .last()
            .map_or(self.layout.locomotive.right(), |r| r.right());
        if rail_y < buf.area.bottom() {
            for x in self.layout.locomotive.x..end.min(buf.area.right()) {
                buf[(x, rail_y)]
                    .set_symbol("═")
                    .set_style(Style::default().fg(colors.muted()));
            }
        }
    }

    fn render_wagons(&self, buf: &mut Buffer) {
        if self.session.train_hidden() {
            return;
        }
        let board = self.session.board();
        let letter = self.session.letter();
        let focused = self.session.focused();

        for wagon in board.wagons() {
            let Some(rect) = board.wagon_rect(wagon.id) else {
                continue;
            };
            let rect = rect.intersection(buf.area);
            if rect.is_empty() {
                continue;
            }
            let state = WagonLook {
                dragging: wagon.placement == Placement::Dragging,
                focused: focused == Some(wagon.id),
                locked: board.is_locked(),
            };
            let image = self.images.get(letter, &wagon.item.word);
            render_wagon(&wagon.item.word, &image, state, rect, self.theme, buf);
        }
    }
}

#[derive(Clone, Copy, Default)]
struct WagonLook {
    dragging: bool,
    focused: bool,
    locked: bool,
}

fn render_wagon(
    word: &str,
    image: &WagonImage,
    look: WagonLook,
    area: Rect,
    theme: &Theme,
    buf: &mut Buffer,
) {
    let colors = &theme.colors;
    Clear.render(area, buf);

    let border = if look.dragging {
        Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD)
    } else if look.focused && !look.locked {
        Style::default().fg(colors.border_focused())
    } else {
        Style::default().fg(colors.border())
    };
    let block = Block::bordered()
        .border_style(border)
        .style(Style::default().bg(colors.wagon_bg()).fg(colors.wagon_fg()));
    let inner = block.inner(area);
    block.render(area, buf);

    let picture = match image {
        WagonImage::File(_) => Span::styled("▣", Style::default().fg(colors.accent())),
        WagonImage::Placeholder(letter) => Span::styled(
            format!(" {letter} "),
            Style::default()
                .fg(colors.fg())
                .bg(colors.placeholder())
                .add_modifier(Modifier::BOLD),
        ),
    };
    let mut lines = vec![Line::from(picture)];
    if inner.height > 2 {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        word.to_string(),
        Style::default().fg(colors.wagon_fg()),
    )));
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(inner, buf);
}

impl Widget for TrainView<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        self.render_locomotive(buf);
        self.render_slots(buf);
        self.render_wagons(buf);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::ui::layout::LayoutTier;
    use crate::words::WordBank;

    #[test]
    fn locomotive_carries_the_letter() {
        let bank = WordBank::load();
        let mut session =
            GameSession::launch(&bank, "б", "pochatok", SmallRng::seed_from_u64(5)).unwrap();
        let area = Rect::new(0, 0, 120, 36);
        let layout = GameLayout::new(area, session.board().slots().len(), LayoutTier::Wide);
        session.set_geometry(layout.board_geometry());

        let theme = Theme::default();
        let images = ImageResolver::new(None);
        let mut buf = Buffer::empty(area);
        TrainView {
            session: &session,
            layout: &layout,
            images: &images,
            theme: &theme,
        }
        .render(area, &mut buf);

        let loco = layout.locomotive;
        let found = (loco.y..loco.bottom())
            .flat_map(|y| (loco.x..loco.right()).map(move |x| (x, y)))
            .any(|pos| buf[pos].symbol() == "Б");
        assert!(found, "letter name missing from the locomotive");
    }
}
