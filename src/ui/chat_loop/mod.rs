//! Main chat event loop
//!
//! The loop owns the [`ChatWidget`]: it draws a frame, routes at most one
//! terminal event, then applies every reply that arrived in the meantime.
//! Requests run on Tokio worker tasks, so a slow endpoint never stalls input.

mod keybindings;
mod lifecycle;

use std::{error::Error, path::PathBuf, time::Duration};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use self::keybindings::{handle_key, handle_paste, KeyOutcome};
use self::lifecycle::{restore_terminal, setup_terminal, Tui};
use crate::core::widget::ChatWidget;
use crate::ui::renderer::ui;
use crate::ui::theme::Theme;
use crate::utils::logging::{init_tracing, LogTarget};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
/// Title row plus the bordered input box.
const CHROME_HEIGHT: u16 = 4;

pub async fn run_chat(
    client: reqwest::Client,
    endpoint: String,
    log_file: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    if let Some(target) = LogTarget::for_tui(log_file) {
        init_tracing(&target)?;
    }
    info!(%endpoint, "starting chat widget");

    let mut widget = ChatWidget::new(client, endpoint);
    let theme = Theme::dark_default();

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut widget, &theme).await;
    let restored = restore_terminal(&mut terminal);

    info!(
        messages = widget.transcript().len(),
        pending = widget.pending_requests(),
        "chat widget closed"
    );
    result.and(restored)
}

async fn event_loop(
    terminal: &mut Tui,
    widget: &mut ChatWidget,
    theme: &Theme,
) -> Result<(), Box<dyn Error>> {
    loop {
        let mut max_scroll = 0;
        terminal.draw(|f| max_scroll = ui(f, widget, theme))?;
        widget.clamp_scroll_back(max_scroll);

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let page = terminal.size()?.height.saturating_sub(CHROME_HEIGHT);
                    if handle_key(widget, key, page) == KeyOutcome::Quit {
                        return Ok(());
                    }
                }
                Event::Paste(text) => handle_paste(widget, &text),
                _ => {}
            }
        }

        widget.poll_replies();
        tokio::task::yield_now().await;
    }
}
