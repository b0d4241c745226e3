//! Width-aware word wrapping for transcript text.
//!
//! The transcript is pre-wrapped here and rendered without ratatui's own
//! wrapping, so the line count used for scrolling is exactly the line count
//! that gets drawn.

use unicode_width::UnicodeWidthChar;

/// Wrap a single logical line (no `\n`) to `width` columns. Breaks at the
/// last space that fits; words longer than the width are split. Always
/// returns at least one (possibly empty) line.
pub fn wrap_line(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;
    // Byte offset in `current` just after the last space, and the width up to it.
    let mut last_break: Option<(usize, usize)> = None;

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);

        if current_width + ch_width > width && !current.is_empty() {
            match last_break {
                Some((offset, break_width)) if offset < current.len() => {
                    let rest = current.split_off(offset);
                    lines.push(current.trim_end().to_string());
                    current = rest;
                    current_width -= break_width;
                }
                _ => {
                    lines.push(std::mem::take(&mut current).trim_end().to_string());
                    current_width = 0;
                }
            }
            last_break = None;

            if ch == ' ' && current.is_empty() {
                continue;
            }
        }

        current.push(ch);
        current_width += ch_width;
        if ch == ' ' {
            last_break = Some((current.len(), current_width));
        }
    }

    lines.push(current);
    lines
}

/// Wrap multi-line text; every `\n` starts a new visual line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    text.split('\n')
        .flat_map(|line| wrap_line(line, width))
        .collect()
}
