//! Terminal UI layer for the chat widget.
//!
//! - [`chat_loop`]: the interactive loop that routes key events to the
//!   widget and drains replies.
//! - [`renderer`] and [`layout`]: frame composition and transcript layout.
//! - [`plain_text`]: literal-text guarantees for untrusted message content.
//! - [`theme`]: role and chrome styles.
//!
//! Ownership boundary: this layer presents and captures interaction state,
//! while [`crate::core`] owns the transcript and the request lifecycle.

pub mod chat_loop;
pub mod layout;
pub mod plain_text;
pub mod renderer;
pub mod theme;
