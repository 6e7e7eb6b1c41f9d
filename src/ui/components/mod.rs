pub mod dashboard;
pub mod menu;
pub mod nav_menu;
pub mod progress_bar;
pub mod quiz_panel;
pub mod select_page;
pub mod train;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

/// Bordered, centred label. Disabled buttons are drawn muted.
pub fn render_button(label: &str, enabled: bool, area: Rect, theme: &Theme, buf: &mut Buffer) {
    let colors = &theme.colors;
    let area = area.intersection(buf.area);
    if area.is_empty() {
        return;
    }

    let (border, text) = if enabled {
        (
            colors.accent(),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (colors.border(), Style::default().fg(colors.muted()))
    };
    let block = Block::bordered().border_style(Style::default().fg(border));
    let inner = block.inner(area);
    block.render(area, buf);
    Paragraph::new(label)
        .style(text)
        .alignment(Alignment::Center)
        .render(inner, buf);
}
