use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use pageant_core::InputMode;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let mode_str = match app.input_mode() {
            Some(InputMode::Touch) => "TOUCH",
            Some(InputMode::Mouse) => "MOUSE",
            None => "--",
        };

        let scroll = app.doc.scroll_y().round() as i64;
        let max_scroll = app.doc.max_scroll().round() as i64;

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {} | {}", mode_str, msg)
        } else {
            format!(
                " {} | {} | {}/{} | seen: {}",
                mode_str,
                app.title,
                scroll,
                max_scroll,
                app.revealed_count()
            )
        };

        let help_hint = " q:quit j/k:scroll tab:links enter:go ?:help ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width())
            .saturating_sub(help_hint.width());

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default().fg(app.theme.fg0).bg(app.theme.bg2),
            ),
            Span::styled(
                " ".repeat(padding_len),
                Style::default().bg(app.theme.bg2),
            ),
            Span::styled(
                help_hint,
                Style::default().fg(app.theme.grey).bg(app.theme.bg2),
            ),
        ]);

        let paragraph = Paragraph::new(line);
        frame.render_widget(paragraph, area);
    }
}
