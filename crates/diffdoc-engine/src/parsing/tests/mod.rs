//! Integration tests for the parsing module.


use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::parsing::{DirectiveBlock, Node, NodeKind, ParseError, parse_str};

fn parse(source: &str) -> Vec<Node> {
    let doc = parse_str(source).unwrap();
    invariants::check(source, &doc.nodes);
    doc.nodes
}

/// Nodes reduced to (line, kind) for comparison.
fn kinds(nodes: Vec<Node>) -> Vec<(usize, NodeKind)> {
    nodes.into_iter().map(|n| (n.line, n.kind)).collect()
}

fn text(t: &str) -> NodeKind {
    NodeKind::Text(t.to_string())
}

fn block(arguments: &[&str], options: &[(&str, &str)], content: &str) -> NodeKind {
    NodeKind::Directive(DirectiveBlock {
        arguments: arguments.iter().map(|a| a.to_string()).collect(),
        options: options
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
        content: content.to_string(),
    })
}

#[test]
fn splits_document_into_text_and_directive_blocks() {
    let source = concat!(
        "Text one\n",
        "\n",
        ".. diff-doc:: start example\n",
        "    :language: python\n",
        "    :render: True\n",
        "\n",
        "    Example 1\n",
        "\n",
        "    Example 2\n",
        "\n",
        "Text two\n",
        "\n",
        "Text three\n",
        "\n",
        ".. diff-doc:: replace example\n",
        "\n",
        "    Example 3\n",
        "\n",
        "    Example 4\n",
        "\n",
        "Text four",
    );

    assert_eq!(
        kinds(parse(source)),
        vec![
            (1, text("Text one\n")),
            (2, text("\n")),
            (
                3,
                block(
                    &["start", "example"],
                    &[("language", "python"), ("render", "True")],
                    "Example 1\n\nExample 2\n",
                ),
            ),
            (10, text("\n")),
            (11, text("Text two\n")),
            (12, text("\n")),
            (13, text("Text three\n")),
            (14, text("\n")),
            (
                15,
                block(&["replace", "example"], &[], "Example 3\n\nExample 4\n"),
            ),
            (20, text("\n")),
            (21, text("Text four")),
        ]
    );
}

#[test]
fn nested_indentation_is_kept_relative_to_the_block() {
    let source = concat!(
        ".. diff-doc:: render example\n",
        "\n",
        "    def f():\n",
        "        return 1\n",
    );

    assert_eq!(
        kinds(parse(source)),
        vec![(
            1,
            block(&["render", "example"], &[], "def f():\n    return 1\n")
        )]
    );
}

#[test]
fn block_without_content_at_end_of_document() {
    let source = ".. diff-doc:: render example\n";

    assert_eq!(
        kinds(parse(source)),
        vec![(1, block(&["render", "example"], &[], ""))]
    );
}

#[test]
fn blank_lines_after_options_are_prose_when_no_content_follows() {
    let source = concat!(
        ".. diff-doc:: output example\n",
        "    :render: False\n",
        "\n",
        "\n",
        "Prose\n",
    );

    assert_eq!(
        kinds(parse(source)),
        vec![
            (1, block(&["output", "example"], &[("render", "False")], "")),
            (3, text("\n")),
            (4, text("\n")),
            (5, text("Prose\n")),
        ]
    );
}

#[test]
fn block_directly_followed_by_another_block() {
    let source = concat!(
        ".. diff-doc:: render a\n",
        "\n",
        "    one\n",
        ".. diff-doc:: render b\n",
        "\n",
        "    two\n",
    );

    assert_eq!(
        kinds(parse(source)),
        vec![
            (1, block(&["render", "a"], &[], "one\n")),
            (4, block(&["render", "b"], &[], "two\n")),
        ]
    );
}

#[test]
fn whitespace_only_lines_inside_content_become_empty_lines() {
    let source = concat!(
        ".. diff-doc:: render example\n",
        "\n",
        "    a\n",
        "  \n",
        "    b\n",
    );

    assert_eq!(
        kinds(parse(source)),
        vec![(1, block(&["render", "example"], &[], "a\n\nb\n"))]
    );
}

#[test]
fn block_spans_end_after_the_last_content_line() {
    let source = concat!(
        "Intro\n",
        ".. diff-doc:: render example\n",
        "\n",
        "    a\n",
        "\n",
        "Outro\n",
    );

    let nodes = parse(source);

    assert_eq!(&source[nodes[1].span.range()], ".. diff-doc:: render example\n\n    a\n");
}

#[rstest]
#[case::duplicate_key(
    ".. diff-doc:: start example\n    :render: True\n    :render: False\n",
    3,
    "duplicate option"
)]
#[case::missing_colons(
    ".. diff-doc:: start example\n    render: True\n",
    2,
    "malformed option line"
)]
#[case::content_without_separating_blank_line(
    ".. diff-doc:: render example\n    print(1)\n",
    2,
    "malformed option line"
)]
fn malformed_options_are_format_errors(
    #[case] source: &str,
    #[case] line: usize,
    #[case] message: &str,
) {
    let err = parse_str(source).unwrap_err();

    assert_eq!(err.line(), line);
    let ParseError::Format { message: actual, .. } = err;
    assert!(actual.contains(message), "unexpected message: {actual}");
}

/// Empty document produces no nodes.
#[test]
fn empty_document() {
    assert!(parse("").is_empty());
}

/// Prose-only documents pass through line by line.
#[test]
fn prose_only() {
    assert_eq!(
        kinds(parse("a\n\nb")),
        vec![(1, text("a\n")), (2, text("\n")), (3, text("b"))]
    );
}
