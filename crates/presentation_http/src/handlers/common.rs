//! Shared response envelope pieces

use serde::{Deserialize, Serialize};

/// How a response payload was produced.
///
/// Callers rely on this tag to distinguish authoritative provider output
/// from a local placeholder without inspecting the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    /// The external provider produced the payload
    #[serde(rename = "openai")]
    OpenAi,
    /// Provider unconfigured; the local fallback produced the payload
    #[serde(rename = "fallback")]
    Fallback,
    /// Provider call failed; the local fallback produced the payload
    #[serde(rename = "fallback_after_error")]
    FallbackAfterError,
}

/// Note attached to responses that degraded after a provider failure
pub const UNAVAILABLE_NOTE: &str = "API temporarily unavailable";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_serializes_to_wire_names() {
        assert_eq!(serde_json::to_string(&Source::OpenAi).unwrap(), "\"openai\"");
        assert_eq!(
            serde_json::to_string(&Source::Fallback).unwrap(),
            "\"fallback\""
        );
        assert_eq!(
            serde_json::to_string(&Source::FallbackAfterError).unwrap(),
            "\"fallback_after_error\""
        );
    }

    #[test]
    fn source_round_trips() {
        for source in [Source::OpenAi, Source::Fallback, Source::FallbackAfterError] {
            let json = serde_json::to_string(&source).unwrap();
            let back: Source = serde_json::from_str(&json).unwrap();
            assert_eq!(back, source);
        }
    }
}
