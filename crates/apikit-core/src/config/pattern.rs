//! Appending alternatives to an existing exclusion regex

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

fn grouped_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\(.*\)$").expect("Invalid grouped regex"))
}

/// Whether `pattern` already looks like `( ... )`
///
/// This is a syntactic check on the first and last characters only:
/// `(a)|(b)` counts as grouped.
#[must_use]
pub fn is_grouped(pattern: &str) -> bool {
    grouped_regex().is_match(pattern)
}

/// Whether every parenthesis in `pattern` has a partner
///
/// Escaped parentheses and character classes are skipped. Any balanced
/// pattern can take another `|(alternative)`, since alternation binds loosest.
#[must_use]
pub fn has_balanced_parens(pattern: &str) -> bool {
    let mut depth = 0usize;
    let mut escaped = false;
    let mut in_class = false;
    for b in pattern.bytes() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' => escaped = true,
            b'[' if !in_class => in_class = true,
            b']' if in_class => in_class = false,
            b'(' if !in_class => depth += 1,
            b')' if !in_class => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0 && !in_class
}

/// Merge a new pattern into an existing one
///
/// Without `append`, or with no previous value, `new` replaces `old`.
/// Otherwise the result is `(old)|(new)`, reusing `old` as-is when it is
/// already wrapped in parentheses.
#[must_use]
pub fn merge_regex(old: Option<&str>, new: &str, append: bool) -> String {
    let Some(old) = old.filter(|_| append) else {
        return new.to_string();
    };

    let first = if is_grouped(old) {
        if !has_balanced_parens(old) {
            warn!(pattern = old, "existing pattern has unbalanced parentheses");
        }
        old.to_string()
    } else {
        format!("({old})")
    };
    format!("{first}|({new})")
}
