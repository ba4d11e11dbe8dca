//! JSON-with-comments handling for tsconfig files.
//!
//! tsconfig files routinely carry `//` and `/* */` comments and trailing
//! commas, neither of which `serde_json` accepts.

/// Strip comments and trailing commas while leaving string contents intact.
pub fn to_strict_json(input: &str) -> String {
    strip_trailing_commas(&strip_comments(input))
}

/// Remove `//` line comments and `/* */` block comments outside strings.
/// Line comments keep their newline so error positions stay on the same line.
fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                out.push('"');
                copy_string_tail(&mut chars, &mut out);
            }
            '/' if chars.peek() == Some(&'/') => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    if c == '\n' {
                        out.push('\n');
                    }
                    prev = c;
                }
            }
            _ => out.push(ch),
        }
    }

    out
}

/// Remove commas directly followed (modulo whitespace) by `}` or `]`.
fn strip_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                out.push('"');
                copy_string_tail(&mut chars, &mut out);
            }
            ',' => {
                let next = chars.clone().find(|c| !c.is_whitespace());
                if !matches!(next, Some('}') | Some(']')) {
                    out.push(',');
                }
            }
            _ => out.push(ch),
        }
    }

    out
}

/// Copy the remainder of a string literal, including its closing quote.
fn copy_string_tail<I: Iterator<Item = char>>(chars: &mut I, out: &mut String) {
    while let Some(c) = chars.next() {
        out.push(c);
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else if c == '"' {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_line_and_block_comments() {
        let input = r#"{
            // base options
            "compilerOptions": { /* inline */ "baseUrl": "." }
        }"#;
        let value: serde_json::Value = serde_json::from_str(&to_strict_json(input)).unwrap();
        assert_eq!(value["compilerOptions"]["baseUrl"], ".");
    }

    #[test]
    fn test_keeps_comment_markers_inside_strings() {
        let input = r#"{"paths": {"@/*": ["src/*"]}, "url": "http://example.com"}"#;
        let value: serde_json::Value = serde_json::from_str(&to_strict_json(input)).unwrap();
        assert_eq!(value["paths"]["@/*"][0], "src/*");
        assert_eq!(value["url"], "http://example.com");
    }

    #[test]
    fn test_removes_trailing_commas() {
        let input = "{\"a\": [1, 2,], \"b\": {\"c\": true,\n},}";
        let value: serde_json::Value = serde_json::from_str(&to_strict_json(input)).unwrap();
        assert_eq!(value["a"], serde_json::json!([1, 2]));
        assert_eq!(value["b"]["c"], true);
    }

    #[test]
    fn test_escaped_quotes_do_not_end_strings() {
        let input = r#"{"a": "say \"hi\" // not a comment",}"#;
        let value: serde_json::Value = serde_json::from_str(&to_strict_json(input)).unwrap();
        assert_eq!(value["a"], "say \"hi\" // not a comment");
    }

    #[test]
    fn test_non_ascii_survives() {
        let input = r#"{"name": "프로젝트", /* é */ "x": 1}"#;
        let value: serde_json::Value = serde_json::from_str(&to_strict_json(input)).unwrap();
        assert_eq!(value["name"], "프로젝트");
    }
}
