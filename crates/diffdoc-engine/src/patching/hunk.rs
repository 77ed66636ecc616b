use std::sync::OnceLock;

use regex::Regex;

use super::PatchError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HunkLine {
    Context(String),
    Remove(String),
    Add(String),
}

/// One `@@` section of a unified diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// 1-based first line of the old side, as stated in the header.
    pub old_start: usize,
    pub lines: Vec<HunkLine>,
}

impl Hunk {
    /// Lines the hunk expects to find in the original text.
    pub fn old_lines(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|line| match line {
                HunkLine::Context(text) | HunkLine::Remove(text) => Some(text.as_str()),
                HunkLine::Add(_) => None,
            })
            .collect()
    }

    /// 0-based index where the old side starts.
    ///
    /// A hunk with an empty old side inserts *after* `old_start`.
    pub fn position(&self) -> usize {
        if self.old_lines().is_empty() {
            self.old_start
        } else {
            self.old_start.saturating_sub(1)
        }
    }
}

/// Parses unified-diff text into hunks.
///
/// `---`/`+++` header lines before the first hunk are skipped. Hunk line
/// counts are not checked against the body, since trailing blank context
/// lines do not survive in an indented document block.
pub fn parse_hunks(patch: &str) -> Result<Vec<Hunk>, PatchError> {
    static HUNK_HEADER_REGEX: OnceLock<Regex> = OnceLock::new();
    let header_regex = HUNK_HEADER_REGEX.get_or_init(|| {
        Regex::new(r"^@@ -(\d+)(?:,\d+)? \+\d+(?:,\d+)? @@").expect("Invalid hunk header regex")
    });

    let mut hunks: Vec<Hunk> = Vec::new();

    for (index, raw) in patch.lines().enumerate() {
        let line_number = index + 1;
        if raw.starts_with("@@") {
            let captures = header_regex
                .captures(raw)
                .ok_or_else(|| PatchError::Malformed {
                    line: line_number,
                    text: raw.to_string(),
                })?;
            let old_start = captures[1].parse().map_err(|_| PatchError::Malformed {
                line: line_number,
                text: raw.to_string(),
            })?;
            hunks.push(Hunk {
                old_start,
                lines: vec![],
            });
            continue;
        }

        let Some(hunk) = hunks.last_mut() else {
            if raw.starts_with("---") || raw.starts_with("+++") {
                continue;
            }
            return Err(PatchError::Malformed {
                line: line_number,
                text: raw.to_string(),
            });
        };

        let mut chars = raw.chars();
        let hunk_line = match chars.next() {
            None => HunkLine::Context(String::new()),
            Some(' ') => HunkLine::Context(chars.as_str().to_string()),
            Some('-') => HunkLine::Remove(chars.as_str().to_string()),
            Some('+') => HunkLine::Add(chars.as_str().to_string()),
            // "\ No newline at end of file"
            Some('\\') => continue,
            Some(_) => {
                return Err(PatchError::Malformed {
                    line: line_number,
                    text: raw.to_string(),
                });
            }
        };
        hunk.lines.push(hunk_line);
    }

    if hunks.is_empty() {
        return Err(PatchError::NoHunks);
    }
    Ok(hunks)
}
