use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use pageant_core::{Element, NodeId};

use crate::app::App;

pub struct PageViewWidget;

impl PageViewWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let scroll = app.doc.scroll_y().round() as usize;
        let reveal_selector_class = tracked_class(&app.config.tracker.selector);

        // Flatten elements into rendered lines, then window by the scroll
        // position. Geometry uses one document pixel per terminal row, so
        // the element tops line up with what hit_test expects.
        let mut lines: Vec<Line> = Vec::with_capacity(area.height as usize);
        let mut consumed = 0usize;
        'outer: for (node, el) in app.doc.elements() {
            let style = element_style(app, node, el, reveal_selector_class.as_deref());
            let height = el.height.round() as usize;
            for row in 0..height {
                if consumed + row < scroll {
                    continue;
                }
                if lines.len() >= area.height as usize {
                    break 'outer;
                }
                let text = el.lines.get(row).map(String::as_str).unwrap_or("");
                lines.push(render_line(text, el, style));
            }
            consumed += height;
        }

        let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.bg0));
        frame.render_widget(paragraph, area);
    }
}

/// The class name a simple `.class` tracker selector targets, used to dim
/// not-yet-revealed elements.
fn tracked_class(selector: &str) -> Option<String> {
    selector.strip_prefix('.').map(str::to_string)
}

fn element_style(app: &App, node: NodeId, el: &Element, reveal_class: Option<&str>) -> Style {
    let theme = &app.theme;
    let mut style = Style::default().fg(theme.fg0);

    match el.tag.as_str() {
        "h1" | "h2" | "h3" | "header" => {
            style = style.fg(theme.heading).add_modifier(Modifier::BOLD);
        }
        "a" => {
            style = style.fg(theme.link).add_modifier(Modifier::UNDERLINED);
        }
        _ => {}
    }

    if el.has_class(&app.config.input.touched_class) {
        style = style.fg(theme.touched).add_modifier(Modifier::BOLD);
    }
    if app.focused_link() == Some(node) {
        style = style.bg(theme.selection);
    }
    if let Some(class) = reveal_class {
        if el.has_class(class) && !app.is_revealed(node) {
            style = Style::default().fg(theme.grey).add_modifier(Modifier::DIM);
        }
    }
    style
}

fn render_line<'a>(text: &'a str, el: &Element, style: Style) -> Line<'a> {
    let span = match el.tag.as_str() {
        "blockquote" => Span::styled(format!("▌ {}", text), style),
        "li" => Span::styled(format!("• {}", text), style),
        _ => Span::styled(text, style),
    };
    Line::from(span)
}
