//! String literal escape processing.

/// Resolve backslash escapes in the body of a quoted string.
///
/// Recognized: `\n \t \r \0 \" \' \\ \uXXXX`. An unknown escape keeps the
/// escaped character; a malformed `\u` keeps its text verbatim.
pub(crate) fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                match decode_unicode(&hex) {
                    Some(decoded) => {
                        out.push(decoded);
                        for _ in 0..4 {
                            chars.next();
                        }
                    }
                    None => out.push_str("\\u"),
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn decode_unicode(hex: &str) -> Option<char> {
    if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_escapes() {
        assert_eq!(unescape(r"a\nb\tc"), "a\nb\tc");
        assert_eq!(unescape(r#"say \"hi\""#), "say \"hi\"");
        assert_eq!(unescape(r"it\'s"), "it's");
        assert_eq!(unescape(r"back\\slash"), "back\\slash");
    }

    #[test]
    fn test_unicode_escape() {
        assert_eq!(unescape(r"\u0041\u00e9"), "Aé");
    }

    #[test]
    fn test_malformed_escapes_are_kept() {
        assert_eq!(unescape(r"\q"), "q");
        assert_eq!(unescape(r"\u12"), "\\u12");
        assert_eq!(unescape(r"\uZZZZ!"), "\\uZZZZ!");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }
}
