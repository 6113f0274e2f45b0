//! Detection of encoding-corruption artifacts in candidate terms.

/// Returns `true` if `c` signals broken decoding.
///
/// Flags the replacement character and the two BMP noncharacters
/// (U+FFFD, U+FFFE, U+FFFF), the C0 controls (U+0000..=U+001F), DEL and the
/// C1 controls (U+007F..=U+009F). Surrogates cannot occur in a `char`; lone
/// surrogate escapes are rejected by the JSON decoder before text gets here.
pub fn is_corrupted_char(c: char) -> bool {
    matches!(
        c,
        '\u{FFFD}' | '\u{FFFE}' | '\u{FFFF}' | '\u{0000}'..='\u{001F}' | '\u{007F}'..='\u{009F}'
    )
}

/// Returns `true` if `text` contains any corrupted code point.
///
/// # Example
///
/// ```rust
/// use chatmd::tagging::is_corrupted;
///
/// assert!(is_corrupted("caf\u{FFFD}"));
/// assert!(is_corrupted("tab\there"));
/// assert!(!is_corrupted("日本語テキスト"));
/// ```
pub fn is_corrupted(text: &str) -> bool {
    text.chars().any(is_corrupted_char)
}
