use ratatui::style::{Color, Modifier, Style};

use crate::core::message::Role;

#[derive(Debug, Clone)]
pub struct Theme {
    pub user_label_style: Style,
    pub user_text_style: Style,
    pub assistant_label_style: Style,
    pub assistant_text_style: Style,

    // Chrome
    pub title_style: Style,
    pub pending_indicator_style: Style,
    pub input_border_style: Style,
    pub input_title_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            user_label_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            assistant_label_style: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            assistant_text_style: Style::default().fg(Color::White),

            title_style: Style::default().fg(Color::Gray),
            pending_indicator_style: Style::default().fg(Color::Yellow),
            input_border_style: Style::default().fg(Color::Gray),
            input_title_style: Style::default().fg(Color::Gray),
        }
    }

    pub fn label_style(&self, role: Role) -> Style {
        match role {
            Role::User => self.user_label_style,
            Role::Assistant => self.assistant_label_style,
        }
    }

    pub fn text_style(&self, role: Role) -> Style {
        match role {
            Role::User => self.user_text_style,
            Role::Assistant => self.assistant_text_style,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark_default()
    }
}
