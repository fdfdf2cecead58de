//! Canned transcriptions
//!
//! Used when the transcription provider is unavailable. The canned text is
//! drawn from a fixed pool and biased by the estimated recording length so
//! it stays plausible for the uploaded file.

use rand::seq::SliceRandom;

/// The fixed transcription pool
pub const TRANSCRIPTS: [&str; 5] = [
    "Hello, this is a sample transcription. The audio file was successfully received.",
    "I can hear you speaking clearly. This is a demonstration of the speech-to-text feature.",
    "Your voice recording has been processed. This is what a transcription would look like.",
    "Thank you for using the speech-to-text feature. Your audio was captured successfully.",
    "This is a sample transcription showing how your speech would be converted to text.",
];

const NOTE: &str = " Note: This is a demonstration transcription. For accurate speech-to-text \
     conversion, please configure the OpenAI API key.";

/// Estimate recording duration in seconds from the file size.
///
/// Rough heuristic assuming ~16 kB per second of audio.
pub fn estimated_duration_secs(size_bytes: u64) -> u64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let secs = (size_bytes as f64 / 16000.0).round() as u64;
    secs
}

/// Produce a canned transcription for an audio upload of the given size
pub fn transcription_for(size_bytes: u64) -> String {
    let mut rng = rand::thread_rng();
    let base = TRANSCRIPTS
        .choose(&mut rng)
        .copied()
        .unwrap_or(TRANSCRIPTS[0]);

    let duration = estimated_duration_secs(size_bytes);
    let length_remark = if duration > 10 {
        " This appears to be a longer recording with multiple sentences."
    } else if duration > 5 {
        " This seems to be a medium-length recording."
    } else {
        " This appears to be a short recording."
    };

    format!("{base}{length_remark}{NOTE}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_estimate_rounds() {
        assert_eq!(estimated_duration_secs(0), 0);
        assert_eq!(estimated_duration_secs(16000), 1);
        assert_eq!(estimated_duration_secs(24000), 2);
        assert_eq!(estimated_duration_secs(320_000), 20);
    }

    #[test]
    fn short_recordings_get_short_remark() {
        let text = transcription_for(16000);
        assert!(text.contains("short recording"));
    }

    #[test]
    fn medium_recordings_get_medium_remark() {
        let text = transcription_for(7 * 16000);
        assert!(text.contains("medium-length recording"));
    }

    #[test]
    fn long_recordings_get_long_remark() {
        let text = transcription_for(20 * 16000);
        assert!(text.contains("longer recording with multiple sentences"));
    }

    #[test]
    fn base_text_comes_from_the_pool() {
        let text = transcription_for(1000);
        assert!(TRANSCRIPTS.iter().any(|t| text.starts_with(t)));
    }

    #[test]
    fn always_carries_the_demonstration_note() {
        let text = transcription_for(0);
        assert!(text.contains("demonstration transcription"));
        assert!(!text.is_empty());
    }
}
