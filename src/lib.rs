//! relaychat is a terminal chat widget that posts each message to a chat
//! endpoint and shows the reply, plus the small relay server that endpoint
//! usually is.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the transcript, the widget's send/reply lifecycle, the
//!   outbound HTTP call, and configuration.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop that drives user input and display updates.
//! - [`relay`] serves `POST /chat` and forwards messages to an
//!   OpenAI-compatible chat-completions API.
//! - [`api`] defines the JSON payloads on both hops.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod relay;
pub mod ui;
pub mod utils;
