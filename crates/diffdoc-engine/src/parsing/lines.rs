use xi_rope::Rope;

use super::span::Span;

/// A single physical line of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRef {
    /// 1-based line number.
    pub number: usize,
    /// Byte span of this line in the rope (includes newline if present).
    pub span: Span,
    /// The line text, line terminator included.
    pub text: String,
}

/// Returns an iterator over numbered lines with their byte spans.
///
/// Uses `lines_raw` to keep line terminators: prose lines are re-emitted
/// verbatim and block spans must end exactly after their last newline.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).enumerate().map(move |(index, line)| {
        let start = offset;
        offset += line.len();
        LineRef {
            number: index + 1,
            span: Span { start, end: offset },
            text: line.into_owned(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lines_are_numbered_from_one_and_keep_terminators() {
        let rope = Rope::from("one\ntwo\nthree");

        let lines: Vec<LineRef> = lines_with_spans(&rope).collect();

        assert_eq!(
            lines,
            vec![
                LineRef {
                    number: 1,
                    span: Span::new(0, 4),
                    text: "one\n".to_string(),
                },
                LineRef {
                    number: 2,
                    span: Span::new(4, 8),
                    text: "two\n".to_string(),
                },
                LineRef {
                    number: 3,
                    span: Span::new(8, 13),
                    text: "three".to_string(),
                },
            ]
        );
    }

    #[test]
    fn empty_rope_has_no_lines() {
        let rope = Rope::from("");
        assert_eq!(lines_with_spans(&rope).count(), 0);
    }
}
