/// Undo one level of backslash escaping in an HTML payload.
///
/// Some clients serialize the document twice, so `"` arrives as `\"` and line
/// breaks arrive as a literal `\n`. This restores the literal text. It does
/// not touch markup: scripts and attributes pass through as-is.
///
/// Recognised sequences: `\"` `\'` `\n` `\r` `\t` `\\` `\/`. Any other
/// backslash, including a trailing one, is kept verbatim.
///
/// Only call this when the transport is known to double-encode. Documents
/// that legitimately contain backslashes (inline JS regexes, Windows paths)
/// are altered by it.
pub fn decode_escaped_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quotes_and_newline() {
        let input = r#"\"hello\nworld\""#;
        assert_eq!(decode_escaped_html(input), "\"hello\nworld\"");
    }

    #[test]
    fn test_tabs_and_backslashes() {
        assert_eq!(decode_escaped_html(r"a\tb"), "a\tb");
        assert_eq!(decode_escaped_html(r"C:\\Users"), r"C:\Users");
        assert_eq!(decode_escaped_html(r"<\/div>"), "</div>");
    }

    #[test]
    fn test_escaped_backslash_before_n_is_not_newline() {
        // `\\n` is an escaped backslash followed by a plain `n`
        assert_eq!(decode_escaped_html(r"\\n"), r"\n");
    }

    #[test]
    fn test_unknown_sequences_kept() {
        assert_eq!(decode_escaped_html(r"\d+"), r"\d+");
        assert_eq!(decode_escaped_html("end\\"), "end\\");
    }

    #[test]
    fn test_plain_html_untouched() {
        let html = "<!DOCTYPE html>\n<html><body><h1 class=\"x\">Hi</h1></body></html>";
        assert_eq!(decode_escaped_html(html), html);
    }

    #[test]
    fn test_double_escaped_document() {
        let input = r#"<html>\n  <body class=\"dark\">\n\t<p>It\'s me</p>\n  </body>\n</html>"#;
        let expected = "<html>\n  <body class=\"dark\">\n\t<p>It's me</p>\n  </body>\n</html>";
        assert_eq!(decode_escaped_html(input), expected);
    }
}
