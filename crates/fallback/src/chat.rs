//! Canned chat replies
//!
//! Keyword-dispatched responses used when the chat provider is unconfigured
//! or unreachable. Pools are named constants so tests can enumerate every
//! possible output; time and date replies are deterministic for a given
//! clock reading.

use chrono::{DateTime, Local, Timelike};
use rand::seq::SliceRandom;

/// Ambient-sound descriptions
pub const SOUND_RESPONSES: [&str; 3] = [
    "I can detect several ambient sounds: gentle keyboard typing from nearby workstations, soft \
     background music at low volume, air conditioning humming quietly, and occasional footsteps \
     in the hallway. The overall sound level is comfortable and not overwhelming.",
    "The acoustic environment includes: people having quiet conversations about 10 feet away, \
     papers rustling, a coffee machine brewing in the distance, and the gentle hum of electronic \
     devices. It sounds like a productive workspace.",
    "Current environmental sounds: light traffic outside the window, someone typing on a laptop \
     nearby, a phone vibrating on a desk, and the soft whir of a printer in operation. The \
     atmosphere is calm and focused.",
];

/// People and crowd descriptions
pub const PEOPLE_RESPONSES: [&str; 3] = [
    "I can sense approximately 12-15 people in your immediate area. Most are seated and working \
     quietly, with 2-3 people having a discussion near the coffee area. The energy feels \
     collaborative but focused.",
    "The space feels moderately busy with about 8-10 people. I can hear typing, quiet \
     conversations, and someone on a phone call in a nearby office. Everyone seems engaged in \
     their work.",
    "It's quite peaceful here - only 4-5 people around. Someone is reading nearby, another \
     person is writing, and there's very little movement or noise. Perfect for concentration.",
];

/// Greeting replies
pub const GREETINGS: [&str; 3] = [
    "Hello! I'm here to help you with any questions or have a conversation. What would you like \
     to talk about?",
    "Hi there! I can assist you with information about your surroundings, answer questions, or \
     just chat. How can I help?",
    "Hello! I'm your AI assistant, ready to help with anything you need. What's on your mind?",
];

/// Reply to "how are you"
pub const HOW_ARE_YOU_RESPONSE: &str = "I'm doing great and ready to assist you! I can help you \
     understand your surroundings, answer questions about time and weather, help with \
     calculations, or just have a friendly conversation. What interests you today?";

/// Capabilities overview
pub const HELP_RESPONSE: &str = "I can help you with many things! I can describe sounds and \
     environments around you, tell you the time and date, provide weather information, help \
     with math calculations, answer general questions, and have conversations. I'm also great \
     at providing assistance for daily tasks. What would you like to explore?";

/// Reply when nothing else matches
pub const DEFAULT_RESPONSE: &str = "I'm here to help you with anything! I can describe your \
     environment, answer questions about time and weather, help with math, provide information, \
     or just have a conversation. What would you like to know or discuss?";

/// Produce a canned chat reply for a user message
pub fn chat_reply(message: &str) -> String {
    chat_reply_at(message, Local::now())
}

/// Clock-injected variant of [`chat_reply`], used directly by tests
pub fn chat_reply_at(message: &str, now: DateTime<Local>) -> String {
    let lower = message.to_lowercase().trim().to_string();
    let mut rng = rand::thread_rng();

    if lower.contains("sound") && (lower.contains("around") || lower.contains("surround")) {
        return pick(&SOUND_RESPONSES, &mut rng);
    }

    if lower.contains("people") || lower.contains("crowd") || lower.contains("busy") {
        return pick(&PEOPLE_RESPONSES, &mut rng);
    }

    if lower.contains("weather") {
        let variants = weather_variants(now.hour());
        return variants
            .choose(&mut rng)
            .cloned()
            .unwrap_or_else(|| variants[0].clone());
    }

    if lower.contains("time") {
        return time_reply(now);
    }

    if lower.contains("date") || lower.contains("today") {
        return format!(
            "Today is {}. How can I help you make the most of your day?",
            now.format("%A, %B %-d, %Y")
        );
    }

    if let Some(answer) = math_reply(&lower) {
        return answer;
    }

    if lower.contains("hello") || lower.contains("hi") {
        return pick(&GREETINGS, &mut rng);
    }

    if lower.contains("how are you") {
        return HOW_ARE_YOU_RESPONSE.to_string();
    }

    if lower.contains("help") || lower.contains("what can you do") {
        return HELP_RESPONSE.to_string();
    }

    DEFAULT_RESPONSE.to_string()
}

fn pick(pool: &[&str], rng: &mut impl rand::Rng) -> String {
    pool.choose(rng).copied().unwrap_or(DEFAULT_RESPONSE).to_string()
}

/// Time reply: greeting appropriate to the hour plus the current time
pub fn time_reply(now: DateTime<Local>) -> String {
    let greeting = greeting_for_hour(now.hour());
    format!(
        "{greeting} The current time is {}.",
        now.format("%-I:%M:%S %p")
    )
}

/// Greeting for a 24-hour clock hour
pub fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning!"
    } else if hour < 17 {
        "Good afternoon!"
    } else {
        "Good evening!"
    }
}

/// The three weather phrasings for a given hour of day
pub fn weather_variants(hour: u32) -> [String; 3] {
    [
        format!(
            "Today's weather is sunny with a high of 75\u{b0}F and gentle breeze. Perfect for \
             outdoor activities! {}",
            if hour > 17 {
                "Great evening for a walk."
            } else {
                "Ideal conditions for the rest of the day."
            }
        ),
        format!(
            "It's cloudy today with a 60% chance of rain this afternoon. Temperature around \
             68\u{b0}F. {}",
            if hour < 14 {
                "You might want to bring an umbrella later."
            } else {
                "The rain should start soon."
            }
        ),
        format!(
            "Beautiful clear day with temperatures reaching 78\u{b0}F. Low humidity makes it \
             very comfortable. {}",
            if hour < 12 {
                "Perfect morning weather!"
            } else {
                "Great conditions continue."
            }
        ),
    ]
}

/// Answer `a op b` for the first integer expression in the message.
///
/// Division by zero and `i64` overflow yield `None` so the dispatch
/// continues to the remaining keyword checks.
fn math_reply(message: &str) -> Option<String> {
    let (left, op, right) = extract_arithmetic(message)?;

    #[allow(clippy::cast_precision_loss)]
    let rendered = match op {
        '+' => left.checked_add(right)?.to_string(),
        '-' => left.checked_sub(right)?.to_string(),
        '*' => left.checked_mul(right)?.to_string(),
        '/' => {
            if right == 0 {
                return None;
            }
            let quotient = left as f64 / right as f64;
            if quotient.fract() == 0.0 {
                (left / right).to_string()
            } else {
                format!("{quotient}")
            }
        },
        _ => return None,
    };

    Some(format!(
        "{left} {op} {right} = {rendered}. Need help with any other calculations?"
    ))
}

/// Find the first `<int> <op> <int>` expression, allowing spaces around the
/// operator.
fn extract_arithmetic(message: &str) -> Option<(i64, char, i64)> {
    let chars: Vec<char> = message.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if !matches!(c, '+' | '-' | '*' | '/') {
            continue;
        }

        let mut left_end = i;
        while left_end > 0 && chars[left_end - 1] == ' ' {
            left_end -= 1;
        }
        let mut left_start = left_end;
        while left_start > 0 && chars[left_start - 1].is_ascii_digit() {
            left_start -= 1;
        }
        if left_start == left_end {
            continue;
        }

        let mut right_start = i + 1;
        while right_start < chars.len() && chars[right_start] == ' ' {
            right_start += 1;
        }
        let mut right_end = right_start;
        while right_end < chars.len() && chars[right_end].is_ascii_digit() {
            right_end += 1;
        }
        if right_end == right_start {
            continue;
        }

        let left: i64 = chars[left_start..left_end]
            .iter()
            .collect::<String>()
            .parse()
            .ok()?;
        let right: i64 = chars[right_start..right_end]
            .iter()
            .collect::<String>()
            .parse()
            .ok()?;

        return Some((left, c, right));
    }

    None
}
