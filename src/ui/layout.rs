use ratatui::text::{Line, Span};

use super::plain_text::sanitize_display_text;
use super::theme::Theme;
use crate::core::message::Role;
use crate::core::text_wrapping::wrap_text;
use crate::core::transcript::Transcript;

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Assistant => "Assistant",
    }
}

/// Flatten the transcript into display lines: a role label, the wrapped
/// message text, then a blank spacer line per message.
pub fn transcript_lines(transcript: &Transcript, theme: &Theme, width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();

    for message in transcript {
        lines.push(Line::from(Span::styled(
            role_label(message.role),
            theme.label_style(message.role),
        )));

        let text = sanitize_display_text(&message.text);
        let style = theme.text_style(message.role);
        for wrapped in wrap_text(&text, width) {
            lines.push(Line::from(Span::styled(wrapped, style)));
        }

        lines.push(Line::default());
    }

    lines
}

/// Largest useful `scroll_back` value for a transcript of `total_lines`
/// shown in `height` rows.
pub fn max_scroll_back(total_lines: usize, height: u16) -> u16 {
    let overflow = total_lines.saturating_sub(usize::from(height));
    u16::try_from(overflow).unwrap_or(u16::MAX)
}

/// Top row offset for the paragraph, given how far the user scrolled back
/// from the newest line.
pub fn scroll_offset(total_lines: usize, height: u16, scroll_back: u16) -> u16 {
    let max = max_scroll_back(total_lines, height);
    max - scroll_back.min(max)
}
