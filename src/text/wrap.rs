/// Greedily wrap `text` into lines narrower than `max_width_px`.
///
/// Explicit `\n` breaks always end a line and each paragraph wraps on its own; an empty paragraph
/// produces one empty line so blank lines keep their vertical space. Words are separated by runs of
/// whitespace and re-joined with single spaces. A word that is wider than `max_width_px` on its own
/// still gets a line to itself; words are never split.
///
/// `measure` returns the rendered width of a candidate line. It is called with growing prefixes of
/// each paragraph and must be deterministic for the result to be deterministic.
pub fn wrap_lines(
    text: &str,
    max_width_px: f32,
    mut measure: impl FnMut(&str) -> f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    if text.is_empty() {
        return lines;
    }

    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        let mut words = paragraph.split_whitespace();
        let Some(first) = words.next() else {
            lines.push(String::new());
            continue;
        };

        let mut current = first.to_string();
        for word in words {
            let candidate = format!("{current} {word}");
            if measure(&candidate) < max_width_px {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);
    }

    lines
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
