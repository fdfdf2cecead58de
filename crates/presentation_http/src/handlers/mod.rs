//! HTTP request handlers

pub mod chat;
pub mod common;
pub mod describe_image;
pub mod environment;
pub mod generate_image;
pub mod health;
pub mod sign_language;
pub mod speech_to_text;
pub mod text_to_speech;
