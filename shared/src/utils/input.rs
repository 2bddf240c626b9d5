//! Code input sanitizing utilities

/// Keep only decimal digits and truncate to `max_len` characters.
///
/// Applied on every keystroke so the code buffer can never hold anything
/// but an at-most-`max_len` digit string.
pub fn sanitize_code_input(raw: &str, max_len: usize) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(max_len)
        .collect()
}

/// Check whether a sanitized buffer is a complete code of `len` digits
pub fn is_complete_code(buffer: &str, len: usize) -> bool {
    buffer.len() == len && buffer.chars().all(|c| c.is_ascii_digit())
}
