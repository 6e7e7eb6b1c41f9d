use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::ui::theme::Theme;

/// One-row bar with a centred caption, used for quiz progress.
pub struct ProgressBar<'a> {
    pub caption: String,
    pub ratio: f64,
    pub theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn new(caption: &str, ratio: f64, theme: &'a Theme) -> Self {
        Self {
            caption: caption.to_string(),
            ratio: ratio.clamp(0.0, 1.0),
            theme,
        }
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        if area.width == 0 || area.height == 0 {
            return;
        }

        let filled_width = (self.ratio * area.width as f64) as u16;
        for x in area.x..area.x + area.width {
            let style = if x < area.x + filled_width {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, area.y)].set_style(style);
        }

        let caption_len = self.caption.chars().count() as u16;
        let caption_x = area.x + (area.width.saturating_sub(caption_len)) / 2;
        buf.set_string(caption_x, area.y, &self.caption, Style::default().fg(colors.fg()));
    }
}
