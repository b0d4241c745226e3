//! TUI-less "say" command

use std::error::Error;

use crate::core::widget::ChatWidget;

/// Send a single message through the same widget path the TUI uses and print
/// the assistant reply. Exits with status 1 when the reply came from the
/// failure path.
pub async fn run_say(prompt: Vec<String>, endpoint: String) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        eprintln!("Usage: relaychat say <prompt>");
        std::process::exit(1);
    }

    let mut widget = ChatWidget::new(reqwest::Client::new(), endpoint);
    widget.set_input_text(&prompt);
    widget.send();

    let Some(outcome) = widget.next_reply().await else {
        eprintln!("❌ Error: the request ended without a reply");
        std::process::exit(1);
    };

    if outcome.failed {
        eprintln!("❌ {}", outcome.message.text);
        std::process::exit(1);
    }

    println!("{}", outcome.message.text);
    Ok(())
}
