//! The chat widget: input control, send action and transcript.
//!
//! The widget is owned by a single task (the UI loop, or the `say` command).
//! Requests run on their own Tokio tasks and report back over a channel;
//! replies are appended only when the owner drains that channel, so every
//! transcript mutation happens on the owning task.

use ratatui::style::Style;
use tokio::sync::mpsc;
use tui_textarea::TextArea;

use crate::core::chat_client::{resolve_outcome, ChatOutcome, ChatResult, ChatService};
use crate::core::message::Message;
use crate::core::transcript::Transcript;

pub const INPUT_PLACEHOLDER: &str = "Type a message and press Enter";

pub struct ChatWidget {
    transcript: Transcript,
    input: TextArea<'static>,
    service: ChatService,
    replies: mpsc::UnboundedReceiver<ChatResult>,
    pending: usize,
    /// Lines scrolled up from the newest entry. Zero means the view follows
    /// the bottom of the transcript.
    pub scroll_back: u16,
}

impl ChatWidget {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        let (service, replies) = ChatService::new(client, endpoint);
        Self {
            transcript: Transcript::new(),
            input: fresh_input(),
            service,
            replies,
            pending: 0,
            scroll_back: 0,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn endpoint(&self) -> &str {
        self.service.endpoint()
    }

    /// Number of requests issued whose replies have not been applied yet.
    pub fn pending_requests(&self) -> usize {
        self.pending
    }

    pub fn input(&self) -> &TextArea<'static> {
        &self.input
    }

    pub fn input_text(&self) -> String {
        self.input.lines().join("\n")
    }

    pub fn set_input_text(&mut self, text: &str) {
        self.input = fresh_input();
        self.input.insert_str(text);
    }

    pub fn apply_input_edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut TextArea<'static>),
    {
        f(&mut self.input);
    }

    /// Send the current input. Returns `false` (and does nothing) when the
    /// input is empty after trimming.
    pub fn send(&mut self) -> bool {
        let raw = self.input_text();
        let text = raw.trim();
        if text.is_empty() {
            return false;
        }
        let text = text.to_string();

        self.append(Message::user(text.clone()));
        self.input = fresh_input();
        self.pending += 1;
        self.service.spawn_request(text);
        true
    }

    /// Apply one finished request to the transcript.
    pub fn apply_result(&mut self, result: ChatResult) -> ChatOutcome {
        self.pending = self.pending.saturating_sub(1);
        let outcome = resolve_outcome(result);
        self.append(outcome.message.clone());
        outcome
    }

    /// Apply every reply that has already arrived, in arrival order.
    pub fn poll_replies(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(result) = self.replies.try_recv() {
            self.apply_result(result);
            applied += 1;
        }
        applied
    }

    /// Wait for the next reply to arrive and apply it.
    pub async fn next_reply(&mut self) -> Option<ChatOutcome> {
        let result = self.replies.recv().await?;
        Some(self.apply_result(result))
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    pub fn clamp_scroll_back(&mut self, max: u16) {
        self.scroll_back = self.scroll_back.min(max);
    }

    pub fn is_following_newest(&self) -> bool {
        self.scroll_back == 0
    }

    fn append(&mut self, message: Message) {
        self.transcript.push(message);
        self.scroll_back = 0;
    }

    #[cfg(test)]
    pub(crate) fn service(&self) -> &ChatService {
        &self.service
    }
}

fn fresh_input() -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_placeholder_text(INPUT_PLACEHOLDER);
    input.set_cursor_line_style(Style::default());
    input
}
