use std::collections::BTreeMap;
use std::sync::Arc;

use super::pending;

/// Current state of one named snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub language: String,
    pub content: String,
    /// Lines introduced since the snippet was last shown, in order of first
    /// appearance.
    pub pending_lines: Vec<String>,
}

impl Snippet {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            content: String::new(),
            pending_lines: Vec::new(),
        }
    }

    /// Snippet with `content` as its new text. Lines the old text did not
    /// have become pending, and pending lines still present stay pending.
    pub fn replaced(&self, content: &str) -> Self {
        let mut pending_lines = pending::introduced_lines(&self.content, content);
        for line in self.pending_lines.iter().rev() {
            let kept = content.lines().any(|candidate| candidate == line.as_str());
            if kept && !pending_lines.contains(line) {
                pending_lines.insert(0, line.clone());
            }
        }
        Self {
            language: self.language.clone(),
            content: content.to_string(),
            pending_lines,
        }
    }

    /// Snippet with `lines` no longer pending.
    pub fn shown<'a>(&self, lines: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            pending_lines: pending::without(&self.pending_lines, lines),
            ..self.clone()
        }
    }

    pub fn is_fully_shown(&self) -> bool {
        self.pending_lines.is_empty()
    }
}

/// Immutable name to snippet map. Updates return a new registry and leave
/// the old one untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    snippets: BTreeMap<String, Arc<Snippet>>,
}

impl Registry {
    pub fn get(&self, name: &str) -> Option<&Snippet> {
        self.snippets.get(name).map(Arc::as_ref)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.snippets.contains_key(name)
    }

    /// Copy of this registry with `name` bound to `snippet`.
    pub fn with(&self, name: impl Into<String>, snippet: Snippet) -> Self {
        let mut snippets = self.snippets.clone();
        snippets.insert(name.into(), Arc::new(snippet));
        Self { snippets }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.snippets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}
