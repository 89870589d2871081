//! Minimal parser for the java-properties file convention used by the
//! benchmark harness for both `results.*` and `subresults.*` files.
//!
//! Supported syntax: `=`, `:` or bare whitespace as the key/value separator,
//! `#` and `!` comment lines, backslash line continuation, and the usual
//! backslash escapes including `\uXXXX`. Later duplicate keys win.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::ResultsError;

/// Load and parse a property file, reporting I/O failures with the path.
pub fn load(path: &Path) -> Result<BTreeMap<String, String>, ResultsError> {
    let text = fs::read_to_string(path).map_err(|source| ResultsError::io(path, source))?;
    Ok(parse(&text))
}

/// Parse property-file text into a key/value map.
pub fn parse(text: &str) -> BTreeMap<String, String> {
    let mut props = BTreeMap::new();
    let mut lines = text.lines();
    while let Some(raw) = lines.next() {
        let line = raw.trim_start();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let mut logical = line.to_string();
        // A trailing unescaped backslash continues onto the next natural
        // line, whose leading whitespace is dropped.
        while ends_with_line_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some(next) => logical.push_str(next.trim_start()),
                None => break,
            }
        }
        let (key, value) = split_key_value(&logical);
        props.insert(key, value);
    }
    props
}

fn ends_with_line_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_key_value(line: &str) -> (String, String) {
    let chars: Vec<char> = line.chars().collect();
    let n = chars.len();
    let mut raw_key = String::new();
    let mut i = 0;
    let mut escaped = false;
    while i < n {
        let c = chars[i];
        if escaped {
            raw_key.push('\\');
            raw_key.push(c);
            escaped = false;
            i += 1;
            continue;
        }
        match c {
            '\\' => {
                escaped = true;
                i += 1;
            }
            '=' | ':' => {
                i += 1;
                break;
            }
            c if c.is_whitespace() => {
                // Whitespace terminates the key; a single `=` or `:` may
                // still follow it.
                while i < n && chars[i].is_whitespace() {
                    i += 1;
                }
                if i < n && (chars[i] == '=' || chars[i] == ':') {
                    i += 1;
                }
                break;
            }
            c => {
                raw_key.push(c);
                i += 1;
            }
        }
    }
    if escaped {
        raw_key.push('\\');
    }
    while i < n && chars[i].is_whitespace() {
        i += 1;
    }
    let raw_value: String = chars[i..].iter().collect();
    (unescape(&raw_key), unescape(&raw_value))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                if let Some(ch) = u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    out.push(ch);
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_key_value_pairs() {
        let props = parse("mean=42.5\nstdev = 1.25\nattempts: 10\n");
        assert_eq!(props.get("mean").map(String::as_str), Some("42.5"));
        assert_eq!(props.get("stdev").map(String::as_str), Some("1.25"));
        assert_eq!(props.get("attempts").map(String::as_str), Some("10"));
    }

    #[test]
    fn test_comments_and_blank_lines_ignored() {
        let props = parse("# comment\n\n! also a comment\n   \nkey=value\n");
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("key").map(String::as_str), Some("value"));
    }

    #[test]
    fn test_whitespace_separator() {
        let props = parse("scores 1.0 2.0 3.0\n");
        assert_eq!(props.get("scores").map(String::as_str), Some("1.0 2.0 3.0"));
    }

    #[test]
    fn test_line_continuation() {
        let props = parse("scores=1.0 \\\n    2.0 3.0\n");
        assert_eq!(props.get("scores").map(String::as_str), Some("1.0 2.0 3.0"));
    }

    #[test]
    fn test_escaped_backslash_is_not_a_continuation() {
        let props = parse("path=C\\\\\nother=1\n");
        assert_eq!(props.get("path").map(String::as_str), Some("C\\"));
        assert_eq!(props.get("other").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_escapes_in_key_and_value() {
        let props = parse("a\\ b=one\\ttwo\nuni=\\u00e9\n");
        assert_eq!(props.get("a b").map(String::as_str), Some("one\ttwo"));
        assert_eq!(props.get("uni").map(String::as_str), Some("\u{e9}"));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let props = parse("k=1\nk=2\n");
        assert_eq!(props.get("k").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_empty_value() {
        let props = parse("subresults_lower=\n");
        assert_eq!(props.get("subresults_lower").map(String::as_str), Some(""));
    }

    #[test]
    fn test_value_with_embedded_separator() {
        let props = parse("label=a=b\n");
        assert_eq!(props.get("label").map(String::as_str), Some("a=b"));
    }
}
