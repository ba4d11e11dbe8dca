//! Module-reference literal patterns.
//!
//! Literals are located by plain pattern search over the file text rather
//! than by parsing, so a matching string inside a comment is rewritten too.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// `import('x')` / `require("x")`
static CALL_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:import|require)\(['"]([^'"]*)['"]\)"#).expect("valid call pattern")
});

/// `import 'x'` / `... from "x"`
static STATEMENT_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:import|from) ['"]([^'"]*)['"]"#).expect("valid statement pattern")
});

/// The patterns in the order they are applied. The second pass sees the
/// output of the first.
pub fn reference_patterns() -> [&'static Regex; 2] {
    [&CALL_REFERENCE, &STATEMENT_REFERENCE]
}

/// Replace the literal captured by `pattern` wherever `rewrite` returns a
/// new value; the surrounding syntax is kept verbatim. Matches are visited
/// left to right.
pub fn replace_literals<F>(text: &str, pattern: &Regex, mut rewrite: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    pattern
        .replace_all(text, |caps: &Captures<'_>| {
            let whole = &caps[0];
            let Some(literal) = caps.get(1) else {
                return whole.to_string();
            };

            match rewrite(literal.as_str()) {
                Some(replacement) => {
                    let start = literal.start() - caps.get(0).map_or(0, |m| m.start());
                    let end = start + literal.len();
                    format!("{}{}{}", &whole[..start], replacement, &whole[end..])
                }
                None => whole.to_string(),
            }
        })
        .into_owned()
}
