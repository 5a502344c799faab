//! Post-hoc classification of suppressed output.
//!
//! Observability only: nothing here feeds back into control flow.

/// Case-insensitive substrings that mark captured output as suspicious.
pub const FAILURE_TOKENS: [&str; 4] = ["error", "failed", "timeout", "exception"];

/// Characters of captured output quoted in the classification record.
pub const EXCERPT_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Nothing but whitespace was captured.
    Blank,
    /// Output with no failure tokens.
    Benign,
    /// Output mentioning at least one failure token.
    Suspicious,
}

#[must_use]
pub fn classify(captured: &str) -> Classification {
    if captured.trim().is_empty() {
        return Classification::Blank;
    }
    let lowered = captured.to_lowercase();
    if FAILURE_TOKENS.iter().any(|token| lowered.contains(token)) {
        Classification::Suspicious
    } else {
        Classification::Benign
    }
}

/// The first `max_chars` characters of `text`.
#[must_use]
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(cut, _)| &text[..cut])
}

/// Log captured output at a severity matching its classification.
pub fn report(captured: &str) {
    match classify(captured) {
        Classification::Blank => {}
        Classification::Benign => {
            tracing::debug!(
                excerpt = excerpt(captured, EXCERPT_CHARS),
                bytes = captured.len(),
                "suppressed output"
            );
        }
        Classification::Suspicious => {
            tracing::warn!(
                excerpt = excerpt(captured, EXCERPT_CHARS),
                bytes = captured.len(),
                "suppressed output contained errors"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn whitespace_is_blank() {
        assert_eq!(classify(""), Classification::Blank);
        assert_eq!(classify(" \n\t"), Classification::Blank);
    }

    #[test]
    fn tokens_match_case_insensitively() {
        assert_eq!(classify("Request TIMEOUT after 30s"), Classification::Suspicious);
        assert_eq!(classify("ValueError: bad"), Classification::Suspicious);
        assert_eq!(classify("scrape Failed"), Classification::Suspicious);
        assert_eq!(classify("Unhandled Exception"), Classification::Suspicious);
    }

    #[test]
    fn chatter_is_benign() {
        assert_eq!(
            classify("Fetching 12 pages\nSummarizing"),
            Classification::Benign
        );
    }

    #[test]
    fn excerpt_respects_char_boundaries() {
        assert_eq!(excerpt("héllo", 2), "hé");
        assert_eq!(excerpt("short", EXCERPT_CHARS), "short");
    }
}
