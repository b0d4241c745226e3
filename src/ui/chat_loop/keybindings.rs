use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::Input as TAInput;

use crate::core::widget::ChatWidget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Sent,
    Quit,
}

/// Route one key press. `page` is the transcript height, used for PgUp/PgDn.
pub fn handle_key(widget: &mut ChatWidget, key: KeyEvent, page: u16) -> KeyOutcome {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => KeyOutcome::Quit,
        KeyCode::Esc => KeyOutcome::Quit,
        KeyCode::Enter => {
            if widget.send() {
                KeyOutcome::Sent
            } else {
                KeyOutcome::Continue
            }
        }
        KeyCode::PageUp => {
            widget.scroll_up(page.max(1));
            KeyOutcome::Continue
        }
        KeyCode::PageDown => {
            widget.scroll_down(page.max(1));
            KeyOutcome::Continue
        }
        // The input box stays single-line; these would insert a newline.
        KeyCode::Char('m') | KeyCode::Char('j') if ctrl => KeyOutcome::Continue,
        _ => {
            widget.apply_input_edit(|ta| {
                ta.input(TAInput::from(key));
            });
            KeyOutcome::Continue
        }
    }
}

/// Pasted text is inserted on one line.
pub fn handle_paste(widget: &mut ChatWidget, text: &str) {
    let flattened = text.replace("\r\n", " ").replace(['\r', '\n'], " ");
    widget.apply_input_edit(|ta| {
        ta.insert_str(flattened);
    });
}
