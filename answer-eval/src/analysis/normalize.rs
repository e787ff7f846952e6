//! Text canonicalization used before any comparison

/// Canonicalize text for comparison.
///
/// Lowercases, turns every run of characters outside `[a-z0-9]` into a
/// single space and trims the ends. Absent text normalizes to `""`.
/// The result only ever contains `[a-z0-9 ]`, so applying it twice changes
/// nothing.
pub fn normalize(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };

    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else {
            pending_space = true;
        }
    }

    out
}

/// [`normalize`] for text that is known to be present
pub fn normalize_str(text: &str) -> String {
    normalize(Some(text))
}
