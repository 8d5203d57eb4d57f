//! Control-character escaping for embed HTML
//!
//! Newline, carriage return and tab become the two-character tokens `\n`,
//! `\r` and `\t`. Nothing else is touched: quotes, backslashes and non-ASCII
//! text pass through as-is.
//!
//! Because pre-existing backslashes are not escaped, text that already
//! contains a literal `\n` token is indistinguishable from an escaped
//! newline once escaped. [`unescape_content`] therefore only inverts
//! [`escape_content`] for input without such tokens.

/// Replace `\n`, `\r`, `\t` with their escape tokens in one pass
pub fn escape_content(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Turn `\n`, `\r`, `\t` tokens back into control characters.
///
/// A backslash followed by anything else is kept verbatim.
pub fn unescape_content(escaped: &str) -> String {
    let mut content = String::with_capacity(escaped.len());
    let mut chars = escaped.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            content.push(c);
            continue;
        }
        match chars.peek() {
            Some('n') => {
                chars.next();
                content.push('\n');
            }
            Some('r') => {
                chars.next();
                content.push('\r');
            }
            Some('t') => {
                chars.next();
                content.push('\t');
            }
            _ => content.push('\\'),
        }
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escape_basic() {
        assert_eq!(escape_content("<div>Hi</div>\n"), "<div>Hi</div>\\n");
        assert_eq!(escape_content("a\r\nb\tc"), "a\\r\\nb\\tc");
        assert_eq!(escape_content(""), "");
    }

    #[test]
    fn test_escape_passes_other_text_through() {
        let text = r#"<svg viewBox="0 0 10 10">café ✓ \x "q" 'q'</svg>"#;
        assert_eq!(escape_content(text), text);
    }

    #[test]
    fn test_escape_whitespace_only() {
        assert_eq!(escape_content(" \n\t\r "), " \\n\\t\\r ");
    }

    #[test]
    fn test_existing_tokens_are_ambiguous() {
        // A literal backslash-n in the source and a real newline escape to
        // the same text, so decoding cannot tell them apart.
        let literal = "a\\nb";
        let real = "a\nb";
        assert_eq!(escape_content(literal), escape_content(real));
        assert_eq!(unescape_content(&escape_content(literal)), real);
    }

    #[test]
    fn test_unescape_keeps_unknown_sequences() {
        assert_eq!(unescape_content("C:\\path\\x"), "C:\\path\\x");
        assert_eq!(unescape_content("trailing\\"), "trailing\\");
    }

    proptest! {
        #[test]
        fn prop_no_control_chars_after_escape(s in any::<String>()) {
            let escaped = escape_content(&s);
            prop_assert!(!escaped.contains('\n'));
            prop_assert!(!escaped.contains('\r'));
            prop_assert!(!escaped.contains('\t'));
        }

        #[test]
        fn prop_round_trip_without_backslashes(s in "[^\\\\]*") {
            prop_assert_eq!(unescape_content(&escape_content(&s)), s);
        }

        #[test]
        fn prop_round_trip_whitespace_heavy(s in "[ \t\r\na-z<>/\"]{0,64}") {
            prop_assert_eq!(unescape_content(&escape_content(&s)), s);
        }
    }
}
