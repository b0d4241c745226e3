use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::layout::{max_scroll_back, scroll_offset, transcript_lines};
use super::theme::Theme;
use crate::core::widget::ChatWidget;

const INPUT_TITLE: &str = "Type your message (Enter to send, PgUp/PgDn to scroll, Ctrl+C to quit)";

/// Draw one frame. Returns the largest scroll-back the transcript pane
/// currently allows, so the caller can clamp the widget's scroll state.
pub fn ui(f: &mut Frame, widget: &ChatWidget, theme: &Theme) -> u16 {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    f.render_widget(Paragraph::new(title_line(widget, theme)), chunks[0]);

    let transcript_area = chunks[1];
    let lines = transcript_lines(widget.transcript(), theme, transcript_area.width);
    let total_lines = lines.len();
    let offset = scroll_offset(total_lines, transcript_area.height, widget.scroll_back);
    f.render_widget(Paragraph::new(lines).scroll((offset, 0)), transcript_area);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.input_border_style)
        .title(Span::styled(INPUT_TITLE, theme.input_title_style));
    let input_inner = input_block.inner(chunks[2]);
    f.render_widget(input_block, chunks[2]);
    f.render_widget(widget.input(), input_inner);

    max_scroll_back(total_lines, transcript_area.height)
}

fn title_line(widget: &ChatWidget, theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!(
            "relaychat v{} - {}",
            env!("CARGO_PKG_VERSION"),
            widget.endpoint()
        ),
        theme.title_style,
    )];

    match widget.pending_requests() {
        0 => {}
        1 => spans.push(Span::styled(
            " • waiting for reply",
            theme.pending_indicator_style,
        )),
        n => spans.push(Span::styled(
            format!(" • waiting for {n} replies"),
            theme.pending_indicator_style,
        )),
    }

    if !widget.is_following_newest() {
        spans.push(Span::styled(" • scrolled", theme.title_style));
    }

    Line::from(spans)
}
