//! # Diff/Patch Adapter
//!
//! Applies unified-diff patches to snippet text and generates unified diffs
//! between two texts. The compiler only sees the [`Patcher`] trait, so tests
//! can swap in a stub.

pub mod hunk;

use similar::{Algorithm, TextDiff};
use thiserror::Error;

use hunk::{Hunk, HunkLine, parse_hunks};

/// Header written in front of generated diffs.
pub const SENTINEL_HEADER: &str = "---\n+++\n";

const CONTEXT_RADIUS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    #[error("patch contains no hunks")]
    NoHunks,
    #[error("malformed patch line {line}: {text:?}")]
    Malformed { line: usize, text: String },
    #[error("hunk {hunk} does not apply: expected {expected:?} near line {old_start}")]
    HunkMismatch {
        /// 1-based index of the failing hunk.
        hunk: usize,
        old_start: usize,
        expected: Vec<String>,
    },
}

pub trait Patcher {
    /// Applies `patch` to `original`, failing if any hunk does not apply cleanly.
    fn apply(&self, original: &str, patch: &str) -> Result<String, PatchError>;

    /// Unified diff turning `old` into `new`, with sentinel headers.
    fn diff(&self, old: &str, new: &str) -> String;
}

/// In-process unified-diff support.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnifiedPatcher;

impl Patcher for UnifiedPatcher {
    fn apply(&self, original: &str, patch: &str) -> Result<String, PatchError> {
        let hunks = parse_hunks(patch)?;
        let old: Vec<&str> = original.lines().collect();
        let mut new: Vec<String> = Vec::with_capacity(old.len());
        let mut cursor = 0;

        for (index, hunk) in hunks.iter().enumerate() {
            let position = locate(&old, hunk, cursor).ok_or_else(|| PatchError::HunkMismatch {
                hunk: index + 1,
                old_start: hunk.old_start,
                expected: hunk.old_lines().iter().map(|l| l.to_string()).collect(),
            })?;

            new.extend(old[cursor..position].iter().map(|l| l.to_string()));
            for line in &hunk.lines {
                match line {
                    HunkLine::Context(text) | HunkLine::Add(text) => new.push(text.clone()),
                    HunkLine::Remove(_) => {}
                }
            }
            cursor = position + hunk.old_lines().len();
        }
        new.extend(old[cursor..].iter().map(|l| l.to_string()));

        let mut result = new.join("\n");
        if !result.is_empty() && (original.ends_with('\n') || original.is_empty()) {
            result.push('\n');
        }
        Ok(result)
    }

    fn diff(&self, old: &str, new: &str) -> String {
        let text_diff = TextDiff::configure()
            .algorithm(Algorithm::Myers)
            .diff_lines(old, new);
        let mut unified = text_diff.unified_diff();
        unified
            .context_radius(CONTEXT_RADIUS)
            .missing_newline_hint(false);

        let mut out = String::from(SENTINEL_HEADER);
        for hunk in unified.iter_hunks() {
            out.push_str(&hunk.to_string());
        }
        out
    }
}

/// Where `hunk`'s old side matches `old`, at or after `cursor`.
///
/// The stated position wins; otherwise the match nearest to it is used,
/// trying later lines first at each distance, like `patch` applying with an
/// offset.
fn locate(old: &[&str], hunk: &Hunk, cursor: usize) -> Option<usize> {
    let expected = hunk.old_lines();
    let matches_at = |position: usize| {
        position >= cursor
            && position + expected.len() <= old.len()
            && old[position..position + expected.len()] == expected[..]
    };

    let stated = hunk.position();
    if matches_at(stated) {
        return Some(stated);
    }
    if expected.is_empty() {
        return None;
    }
    (1..=old.len()).find_map(|offset| {
        let later = stated + offset;
        if matches_at(later) {
            return Some(later);
        }
        stated.checked_sub(offset).filter(|&earlier| matches_at(earlier))
    })
}
