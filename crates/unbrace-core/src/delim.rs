//! Delimiter utilities for bracket matching.

/// Count occurrences of `c` in text.
#[must_use]
pub fn count_char(text: &str, c: char) -> usize {
    text.chars().filter(|&ch| ch == c).count()
}
