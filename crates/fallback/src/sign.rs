//! Sign-language glossing
//!
//! Translates English text into a sequence of sign entries using a built-in
//! dictionary of common words. Unknown words become fingerspelling entries.
//! Gloss notation is a data format here, not a linguistic engine: uppercase
//! word glosses joined by spaces, fingerspelled letters joined by hyphens.

use serde::{Deserialize, Serialize};

/// A single signed word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignWord {
    /// The original (lowercased) word
    pub word: String,
    /// Illustration asset for the sign
    pub sign_image: String,
    /// Gloss notation for the sign
    pub gloss: String,
    /// How the sign is performed
    pub description: String,
}

/// A full text-to-sign translation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignTranslation {
    /// Per-word sign entries, in input order
    pub words: Vec<SignWord>,
    /// Space-joined glosses of all words
    pub full_gloss: String,
    /// The input text as received
    pub original_text: String,
    /// Language tag the caller supplied
    pub language: String,
}

/// Dictionary lookup: (gloss, image asset, description)
fn lookup(word: &str) -> Option<(&'static str, &'static str, &'static str)> {
    let entry = match word {
        "hello" | "hi" => ("HELLO", "hello", "Wave hand with open palm"),
        "how" => ("HOW", "how", "Curved hands moving apart"),
        "are" => ("ARE", "are", "Point forward with R handshape"),
        "you" => ("YOU", "you", "Point to person"),
        "thank" | "thanks" => ("THANK", "thank", "Hand moves from chin forward"),
        "very" => ("VERY", "very", "V handshapes moving apart"),
        "much" => ("MUCH", "much", "Claw hands moving apart"),
        "i" => ("I", "i", "Point to self"),
        "love" => ("LOVE", "love", "Arms crossed over heart"),
        "need" => ("NEED", "need", "X handshape moving down"),
        "help" => ("HELP", "help", "Flat hand on fist, both move up"),
        "please" => ("PLEASE", "please", "Flat hand circles on chest"),
        "what" => ("WHAT", "what", "Index finger wiggling"),
        "time" => ("TIME", "time", "Tap wrist with index finger"),
        "is" => ("IS", "is", "I handshape moving forward"),
        "it" => ("IT", "it", "Point to object or space"),
        "where" => ("WHERE", "where", "Index finger shaking side to side"),
        "bathroom" => ("BATHROOM", "bathroom", "T handshape shaking"),
        "hungry" => ("HUNGRY", "hungry", "C handshape down chest"),
        "am" => ("AM", "am", "A handshape moving forward"),
        "good" => ("GOOD", "good", "Flat hand from chin to other hand"),
        "morning" => ("MORNING", "morning", "Flat hand rising like sun"),
        _ => return None,
    };
    Some(entry)
}

/// Fingerspell an out-of-dictionary word
fn fingerspell(word: &str) -> SignWord {
    let upper = word.to_uppercase();
    let gloss = upper
        .chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join("-");

    SignWord {
        word: word.to_string(),
        sign_image: "/placeholder-signs/fingerspell.jpg".to_string(),
        gloss,
        description: format!("Fingerspell: {upper}"),
    }
}

/// Translate text into a sign sequence
pub fn translate(text: &str, language: &str) -> SignTranslation {
    let words: Vec<SignWord> = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .map(|word| {
            lookup(word).map_or_else(
                || fingerspell(word),
                |(gloss, image, description)| SignWord {
                    word: word.to_string(),
                    sign_image: format!("/placeholder-signs/{image}.jpg"),
                    gloss: gloss.to_string(),
                    description: description.to_string(),
                },
            )
        })
        .collect();

    let full_gloss = words
        .iter()
        .map(|w| w.gloss.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    SignTranslation {
        words,
        full_gloss,
        original_text: text.to_string(),
        language: language.to_string(),
    }
}
