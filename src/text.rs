//! Normalisation of free text received from the issue tracker.

/// Reduces text to a single printable line.
///
/// Line breaks and every other control character (tabs included) are
/// removed, then surrounding whitespace is trimmed. Applying it twice gives
/// the same result as applying it once.
///
/// # Example
///
/// ```
/// use gitlab_mirror::text::cleanup_one_line;
///
/// assert_eq!(cleanup_one_line("needs\r\ntriage\u{0}"), "needstriage");
/// assert_eq!(cleanup_one_line("bug"), "bug");
/// ```
#[must_use]
pub fn cleanup_one_line(text: &str) -> String {
    text.chars()
        .filter(|character| !character.is_control())
        .collect::<String>()
        .trim()
        .to_owned()
}
