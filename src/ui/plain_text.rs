//! Message text is shown literally. Anything that would make the terminal
//! interpret it (escape sequences, carriage returns, bidi overrides) is
//! replaced before it reaches the screen.

const REPLACEMENT: char = '\u{FFFD}';
const TAB_WIDTH: usize = 4;

fn is_bidi_control(ch: char) -> bool {
    matches!(ch, '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}')
}

pub fn sanitize_display_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\n' => out.push('\n'),
            '\t' => out.extend(std::iter::repeat(' ').take(TAB_WIDTH)),
            '\r' => {}
            c if c.is_control() || is_bidi_control(c) => out.push(REPLACEMENT),
            c => out.push(c),
        }
    }
    out
}
