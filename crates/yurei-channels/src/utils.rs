//! Shared utilities for channel implementations.

/// Split a long message into chunks of at most `max_chars` characters.
///
/// Counts `char`s rather than bytes so multi-byte text (Japanese, emoji)
/// never splits mid-character. Prefers splitting after a newline when one
/// falls inside the window.
pub fn split_message(text: &str, max_chars: usize) -> Vec<&str> {
    if max_chars == 0 || text.chars().count() <= max_chars {
        return vec![text];
    }

    let mut chunks = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let end = rest
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let break_at = if end < rest.len() {
            rest[..end].rfind('\n').map(|i| i + 1).unwrap_or(end)
        } else {
            end
        };
        chunks.push(&rest[..break_at]);
        rest = &rest[break_at..];
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_message_untouched() {
        assert_eq!(split_message("こんにちは", 10), vec!["こんにちは"]);
    }

    #[test]
    fn test_split_counts_chars_not_bytes() {
        let text = "あいうえおかきくけこ";
        let chunks = split_message(text, 4);
        assert_eq!(chunks, vec!["あいうえ", "おかきく", "けこ"]);
    }

    #[test]
    fn test_split_prefers_newline() {
        let chunks = split_message("ab\ncdef", 5);
        assert_eq!(chunks, vec!["ab\n", "cdef"]);
    }

    #[test]
    fn test_chunks_rejoin_to_original() {
        let text = "幽霊".repeat(30);
        let chunks = split_message(&text, 7);
        assert!(chunks.iter().all(|c| c.chars().count() <= 7));
        assert_eq!(chunks.concat(), text);
    }
}
