//! Text normalization applied before any pattern matching.

/// Collapse intra-line whitespace runs to single spaces, trim each line,
/// and rejoin with `\n`.
///
/// Line boundaries are preserved so `(?m)^` anchor patterns keep working;
/// case is preserved (patterns match case-insensitively themselves).
/// Pure function: empty input yields empty output.
pub fn normalize_text(raw: &str) -> String {
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}
