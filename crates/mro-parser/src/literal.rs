// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Decoding of literal lexemes.

/// Strip the quotes from a string lexeme and resolve its escapes.
///
/// The scanner only produces well-formed escapes; a lone UTF-16 surrogate
/// decodes to U+FFFD.
pub fn unquote(lexeme: &str) -> String {
    let body = lexeme
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(lexeme);
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
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let unit = hex4(&mut chars);
                let decoded = match unit {
                    Some(hi @ 0xD800..=0xDBFF) => {
                        let mut ahead = chars.clone();
                        let lo = match (ahead.next(), ahead.next()) {
                            (Some('\\'), Some('u')) => hex4(&mut ahead),
                            _ => None,
                        };
                        match lo {
                            Some(lo @ 0xDC00..=0xDFFF) => {
                                chars = ahead;
                                char::from_u32(0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00))
                            }
                            _ => None,
                        }
                    }
                    Some(unit) => char::from_u32(unit),
                    None => None,
                };
                out.push(decoded.unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn hex4(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    let mut value = 0;
    for _ in 0..4 {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    Some(value)
}

/// Split a `src` string into the command path and its arguments.
pub fn split_src(value: &str) -> (String, Vec<String>) {
    let mut words = value.split_whitespace().map(str::to_string);
    let path = words.next().unwrap_or_default();
    (path, words.collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_escapes() {
        assert_eq!(unquote(r#""abc""#), "abc");
        assert_eq!(unquote(r#""a\"b\\c\/d""#), "a\"b\\c/d");
        assert_eq!(unquote(r#""tab\there\n""#), "tab\there\n");
        assert_eq!(unquote(r#""\u00e9""#), "é");
        assert_eq!(unquote(r#""""#), "");
    }

    #[test]
    fn surrogate_pairs() {
        assert_eq!(unquote(r#""\ud83d\ude00""#), "😀");
        assert_eq!(unquote(r#""\ud83d x""#), "\u{fffd} x");
    }

    #[test]
    fn src_words() {
        let (path, args) = split_src("  bin/tool  --fast  -v ");
        assert_eq!(path, "bin/tool");
        assert_eq!(args, vec!["--fast", "-v"]);
        assert_eq!(split_src(""), (String::new(), Vec::new()));
    }
}
