//! Local fallback generators for SensAble
//!
//! Every generator here mirrors the output shape of the corresponding
//! provider client so route handlers can treat both paths uniformly. The
//! generators are pure apart from bounded random selection: each picks from
//! a fixed, enumerable pool of named constants, never fails, and always
//! returns a non-empty payload.
//!
//! The sign-language gloss translator also lives here. It has no provider
//! counterpart and always runs locally.

pub mod chat;
pub mod description;
pub mod environment;
pub mod sign;
pub mod transcription;

pub use chat::chat_reply;
pub use description::description_for;
pub use environment::analysis_for;
pub use sign::{SignTranslation, SignWord, translate};
pub use transcription::{estimated_duration_secs, transcription_for};
