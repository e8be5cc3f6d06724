//! Outbound SMS reply value object

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single outbound SMS reply, bounded to one GSM segment
///
/// Construction never fails: overlong text is truncated, preferring the last
/// sentence boundary that fits so the rider does not receive a cut-off word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplyMessage {
    text: String,
}

impl ReplyMessage {
    /// Maximum reply length in characters (single SMS segment)
    pub const MAX_CHARS: usize = 160;

    /// Create a reply, truncating to [`Self::MAX_CHARS`] characters
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let trimmed = text.trim();

        if trimmed.chars().count() <= Self::MAX_CHARS {
            return Self {
                text: trimmed.to_string(),
            };
        }

        let head: String = trimmed.chars().take(Self::MAX_CHARS).collect();
        let text = head.rfind(". ").map_or(head.clone(), |idx| {
            // Keep the period, drop the dangling fragment after it
            head[..=idx].to_string()
        });

        Self {
            text: text.trim_end().to_string(),
        }
    }

    /// Get the reply text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the reply in characters
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

impl fmt::Display for ReplyMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_kept_verbatim() {
        let reply = ReplyMessage::new("Bus 12A info");
        assert_eq!(reply.text(), "Bus 12A info");
        assert_eq!(reply.char_count(), 12);
    }

    #[test]
    fn surrounding_whitespace_trimmed() {
        let reply = ReplyMessage::new("  hello  ");
        assert_eq!(reply.text(), "hello");
    }

    #[test]
    fn exactly_max_chars_kept() {
        let text = "a".repeat(ReplyMessage::MAX_CHARS);
        let reply = ReplyMessage::new(text.clone());
        assert_eq!(reply.text(), text);
    }

    #[test]
    fn overlong_text_truncated_to_bound() {
        let text = "a".repeat(400);
        let reply = ReplyMessage::new(text);
        assert_eq!(reply.char_count(), ReplyMessage::MAX_CHARS);
    }

    #[test]
    fn truncation_prefers_sentence_boundary() {
        let text = format!("First sentence. {}", "b".repeat(200));
        let reply = ReplyMessage::new(text);
        assert_eq!(reply.text(), "First sentence.");
    }

    #[test]
    fn truncation_is_char_safe_for_multibyte_text() {
        let text = "ಇಂದಿರಾನಗರ ".repeat(40);
        let reply = ReplyMessage::new(text);
        assert!(reply.char_count() <= ReplyMessage::MAX_CHARS);
        // Must still be valid UTF-8 with no split character; String guarantees it
        assert!(!reply.text().is_empty());
    }

    #[test]
    fn display_matches_text() {
        let reply = ReplyMessage::new("Next bus in 5 min");
        assert_eq!(format!("{reply}"), "Next bus in 5 min");
    }

    #[test]
    fn serializes_as_plain_string() {
        let reply = ReplyMessage::new("ok");
        assert_eq!(serde_json::to_string(&reply).expect("serialize"), "\"ok\"");
    }
}
