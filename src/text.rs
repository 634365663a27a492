//! Positional template formatting for localized strings.
//!
//! Locale entries carry `{0}`, `{1}`, … placeholders that the widget
//! fills with runtime values. A placeholder with no matching argument is
//! left verbatim, as is any `{` that does not open a `{digits}`
//! placeholder, so a partially-filled template stays legible.

/// Substitute `{n}` placeholders in `template` with `args[n]`.
pub fn format_template(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match parse_placeholder(tail) {
            Some((index, len)) => {
                match args.get(index) {
                    Some(arg) => out.push_str(arg),
                    None => out.push_str(&tail[..len]),
                }
                rest = &tail[len..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Parse a `{digits}` placeholder at the start of `s`.
///
/// Returns the index and the placeholder's byte length, or `None` when
/// `s` does not start with a well-formed placeholder.
fn parse_placeholder(s: &str) -> Option<(usize, usize)> {
    let inner = &s[1..];
    let close = inner.find('}')?;
    if close == 0 {
        return None;
    }
    let digits = &inner[..close];
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = digits.parse().ok()?;
    Some((index, close + 2))
}
