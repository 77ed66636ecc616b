use super::{Element, ElementKind};
use crate::parsing::Markup;

/// Writes `element` back as directive markup that parses to the same kind.
///
/// Leading and trailing blank content lines do not survive a round trip;
/// the parser never produces them.
pub fn to_markup(element: &Element) -> String {
    match &element.kind {
        ElementKind::Text(text) => text.clone(),
        ElementKind::Start {
            name,
            language,
            render,
            content,
        } => directive(
            "start",
            name,
            &[("language", language.as_str()), ("render", bool_text(*render))],
            content,
        ),
        ElementKind::Replace {
            name,
            render,
            content,
        } => directive("replace", name, &[("render", bool_text(*render))], content),
        ElementKind::Diff {
            name,
            render,
            content,
        } => directive("diff", name, &[("render", bool_text(*render))], content),
        ElementKind::Render { name, content } => directive("render", name, &[], content),
        ElementKind::Output {
            name,
            render,
            content,
        } => directive("output", name, &[("render", bool_text(*render))], content),
    }
}

fn bool_text(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

fn directive(keyword: &str, name: &str, options: &[(&str, &str)], content: &str) -> String {
    let mut out = format!("{} {keyword} {name}\n", Markup::MARKER);
    for (key, value) in options {
        out.push_str(&format!("{}:{key}: {value}\n", Markup::INDENT));
    }
    if content.is_empty() {
        return out;
    }
    out.push('\n');
    for line in content.split_inclusive('\n') {
        if Markup::is_blank(line) {
            out.push('\n');
        } else {
            out.push_str(Markup::INDENT);
            out.push_str(line);
        }
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
