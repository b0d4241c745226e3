pub mod chat_client;
pub mod config;
pub mod message;
pub mod text_wrapping;
pub mod transcript;
pub mod widget;
