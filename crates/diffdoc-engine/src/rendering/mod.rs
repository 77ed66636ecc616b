//! Rendered output and its reStructuredText serialization.

use crate::parsing::Markup;

/// What a compiled element turns into in the output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedElement {
    PlainText(String),
    CodeBlock { language: String, content: String },
    LiteralBlock { content: String },
    /// Nothing is written for this element.
    Empty,
}

impl RenderedElement {
    pub fn code_block(language: impl Into<String>, content: impl Into<String>) -> Self {
        RenderedElement::CodeBlock {
            language: language.into(),
            content: content.into(),
        }
    }

    pub fn literal_block(content: impl Into<String>) -> Self {
        RenderedElement::LiteralBlock {
            content: content.into(),
        }
    }

    pub fn dumps(&self) -> String {
        match self {
            RenderedElement::PlainText(text) => text.clone(),
            RenderedElement::CodeBlock { language, content } => {
                format!(".. code-block:: {language}\n{}", indent(content))
            }
            RenderedElement::LiteralBlock { content } => format!("::\n{}", indent(content)),
            RenderedElement::Empty => String::new(),
        }
    }
}

pub fn dumps(elements: &[RenderedElement]) -> String {
    elements.iter().map(RenderedElement::dumps).collect()
}

/// Blank line, then `content` indented one level with trailing whitespace
/// stripped from every line.
fn indent(content: &str) -> String {
    let indented = format!("\n{content}").replace('\n', &format!("\n{}", Markup::INDENT));
    // Every newline is now followed by an indent, so a trailing newline in
    // `content` survives as a final whitespace-only line trimmed to nothing.
    let lines: Vec<&str> = indented.lines().map(str::trim_end).collect();
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_text_is_written_verbatim() {
        let elements = vec![
            RenderedElement::PlainText("Text one\n".to_string()),
            RenderedElement::PlainText("\n".to_string()),
            RenderedElement::Empty,
            RenderedElement::PlainText("Text two\n".to_string()),
        ];

        assert_eq!(dumps(&elements), "Text one\n\nText two\n");
    }

    #[test]
    fn code_blocks_are_serialised() {
        let code_block =
            RenderedElement::code_block("python", "print(1)\n\nprint(2)\nprint(3)\n");

        assert_eq!(
            code_block.dumps(),
            concat!(
                ".. code-block:: python\n",
                "\n",
                "    print(1)\n",
                "\n",
                "    print(2)\n",
                "    print(3)\n",
            )
        );
    }

    #[test]
    fn literal_blocks_are_serialised() {
        let literal_block = RenderedElement::literal_block("1\n2\n");

        assert_eq!(literal_block.dumps(), "::\n\n    1\n    2\n");
    }

    #[test]
    fn content_without_final_newline_is_not_given_one() {
        assert_eq!(
            RenderedElement::code_block("python", "x = 1").dumps(),
            ".. code-block:: python\n\n    x = 1"
        );
    }
}
