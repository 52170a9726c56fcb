use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

pub struct HelpPopupWidget;

impl HelpPopupWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let popup = centered_rect(46, 14, area);
        frame.render_widget(Clear, popup);

        let keys = [
            ("j / k / wheel", "scroll"),
            ("Ctrl-d / Ctrl-u", "half page"),
            ("Ctrl-f / Ctrl-b", "full page"),
            ("gg / G", "top / bottom"),
            ("Tab / Shift-Tab", "focus next/previous link"),
            ("Enter / click", "activate link"),
            ("?", "this help"),
            ("q", "quit"),
        ];

        let mut lines = Vec::with_capacity(keys.len());
        for (key, action) in keys {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {:<16}", key),
                    Style::default()
                        .fg(app.theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(action, Style::default().fg(app.theme.fg0)),
            ]));
        }

        let block = Block::default()
            .title(" Keys ")
            .borders(Borders::ALL)
            .style(Style::default().bg(app.theme.bg1).fg(app.theme.fg1));
        let paragraph = Paragraph::new(lines).block(block);
        frame.render_widget(paragraph, popup);
    }
}

/// Fixed-size rectangle centered in `area`, clamped to it.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
