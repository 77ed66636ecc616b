use std::sync::OnceLock;

use regex::Regex;

/// Lexical conventions of the directive dialect.
pub struct Markup;

impl Markup {
    /// Opens a directive block when found at column 0.
    pub const MARKER: &'static str = ".. diff-doc::";
    /// One level of block indentation.
    pub const INDENT: &'static str = "    ";

    /// Arguments following the marker, or `None` if `line` is not a marker line.
    pub fn arguments(line: &str) -> Option<Vec<String>> {
        let rest = line.strip_prefix(Self::MARKER)?;
        Some(rest.split_whitespace().map(str::to_string).collect())
    }

    pub fn is_indented(line: &str) -> bool {
        line.starts_with(Self::INDENT)
    }

    pub fn is_blank(line: &str) -> bool {
        line.trim().is_empty()
    }

    /// Strips one indent unit. Blank lines collapse to their terminator.
    pub fn unindent(line: &str) -> &str {
        if Self::is_blank(line) {
            let body = line.trim_end_matches(['\r', '\n']);
            return &line[body.len()..];
        }
        line.strip_prefix(Self::INDENT).unwrap_or(line)
    }

    /// Parses an unindented `:key: value` option line.
    pub fn option(text: &str) -> Option<(String, String)> {
        static OPTION_REGEX: OnceLock<Regex> = OnceLock::new();
        let option_regex = OPTION_REGEX
            .get_or_init(|| Regex::new(r"^:([^:\s]+):[ \t]+(.*)$").expect("Invalid option regex"));

        let text = text.trim_end_matches(['\r', '\n']);
        let captures = option_regex.captures(text)?;
        Some((captures[1].to_string(), captures[2].trim().to_string()))
    }
}
