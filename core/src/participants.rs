//! Free-text participant input.

/// One name per line. Lines are trimmed, blank lines dropped.
/// Order and duplicates are preserved: each line is its own segment.
pub fn parse(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Label shown on the player counter.
pub fn count_label(count: usize) -> String {
    match count {
        1 => "1 player".to_string(),
        n => format!("{n} players"),
    }
}
