//! Line bookkeeping for pending (not yet shown) snippet lines.
//!
//! Lines are compared by exact text, terminators excluded. Blank lines are
//! never pending.

use std::collections::HashSet;

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Non-blank lines of `new` that do not occur in `old`, deduplicated, in
/// order of first appearance.
pub fn introduced_lines(old: &str, new: &str) -> Vec<String> {
    let existing: HashSet<&str> = old.lines().collect();
    let mut seen = HashSet::new();
    new.lines()
        .filter(|line| !is_blank(line) && !existing.contains(line) && seen.insert(*line))
        .map(str::to_string)
        .collect()
}

/// `pending` minus every line in `shown`.
pub fn without<'a>(pending: &[String], shown: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let shown: HashSet<&str> = shown.into_iter().collect();
    pending
        .iter()
        .filter(|line| !shown.contains(line.as_str()))
        .cloned()
        .collect()
}

/// Lines added by a unified diff, `+` prefix stripped, file headers excluded.
pub fn added_lines(diff: &str) -> impl Iterator<Item = &str> {
    diff.lines()
        .skip_while(|line| !line.starts_with("@@"))
        .filter_map(|line| line.strip_prefix('+'))
}

/// First non-blank line of `excerpt` that is not a line of `content`.
pub fn first_unknown_line<'a>(excerpt: &'a str, content: &str) -> Option<&'a str> {
    let known: HashSet<&str> = content.lines().collect();
    excerpt
        .lines()
        .find(|line| !is_blank(line) && !known.contains(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn introduced_lines_keep_first_appearance_order_without_duplicates() {
        assert_eq!(
            introduced_lines("a\nb\n", "c\na\nd\nc\n\nb\n"),
            vec!["c".to_string(), "d".to_string()]
        );
    }

    #[test]
    fn everything_non_blank_is_introduced_from_nothing() {
        assert_eq!(
            introduced_lines("", "x = 1\n\n   \nprint(x)\n"),
            vec!["x = 1".to_string(), "print(x)".to_string()]
        );
    }

    #[test]
    fn carriage_returns_are_not_part_of_a_line() {
        assert!(introduced_lines("x = 1\n", "x = 1\r\n").is_empty());
    }

    #[test]
    fn without_removes_exact_matches_only() {
        let pending = vec!["x = 1".to_string(), "print(x)".to_string()];

        assert_eq!(
            without(&pending, ["print(x)", "x = 1 "]),
            vec!["x = 1".to_string()]
        );
    }

    #[test]
    fn added_lines_skip_file_headers() {
        let diff = "--- a\n+++ b\n@@ -1 +1,2 @@\n x\n-y\n+z\n+++w\n";

        assert_eq!(added_lines(diff).collect::<Vec<_>>(), vec!["z", "++w"]);
    }

    #[test]
    fn first_unknown_line_ignores_blank_lines() {
        assert_eq!(first_unknown_line("a\n\nb\n", "a\nb\n"), None);
        assert_eq!(first_unknown_line("a\nc\n", "a\nb\n"), Some("c"));
    }
}
