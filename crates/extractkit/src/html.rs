//! HTML to plain text conversion for fetched pages

use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashSet;
use tracing::debug;

/// Elements whose content never counts as page text
const SKIP_TAGS: &[&str] = &["script", "style", "nav", "footer", "header", "noscript"];

/// Main content candidates, tried in order
const MAIN_CONTENT_SELECTORS: &[&str] = &[
    "main", "article", ".main", "#main", "#content", ".content",
];

/// Convert an HTML page to cleaned visible text
///
/// Drops non-content elements, prefers the first main content region that
/// has text, falls back to `<body>`, and collapses whitespace.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let root = document.root_element();

    for css in MAIN_CONTENT_SELECTORS {
        let Some(selector) = parse_selector(css) else {
            continue;
        };
        let text = selected_text(root, &selector);
        if !text.trim().is_empty() {
            debug!(selector = *css, "Using main content region");
            return collapse_whitespace(&text);
        }
    }

    let body = parse_selector("body").and_then(|selector| root.select(&selector).next());
    let mut text = String::new();
    collect_text(body.unwrap_or(root), &mut text);
    collapse_whitespace(&text)
}

/// Collapse whitespace runs: two or more whitespace characters become one
/// space, single whitespace characters are kept, and the result is trimmed
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut run = String::new();

    for c in s.chars() {
        if c.is_whitespace() {
            run.push(c);
        } else {
            flush_whitespace(&mut result, &mut run);
            result.push(c);
        }
    }
    flush_whitespace(&mut result, &mut run);

    result.trim().to_string()
}

fn flush_whitespace(result: &mut String, run: &mut String) {
    let mut chars = run.chars();
    match (chars.next(), chars.next()) {
        (None, _) => {}
        (Some(c), None) => result.push(c),
        _ => result.push(' '),
    }
    run.clear();
}

fn parse_selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Text of every element matching `selector`, outermost matches only
fn selected_text(root: ElementRef<'_>, selector: &Selector) -> String {
    let matches: Vec<ElementRef<'_>> = root
        .select(selector)
        .filter(|el| !is_inside_skipped(*el))
        .collect();
    let ids: HashSet<_> = matches.iter().map(|el| el.id()).collect();

    let mut text = String::new();
    for el in matches {
        if el.ancestors().any(|ancestor| ids.contains(&ancestor.id())) {
            continue;
        }
        if !text.is_empty() {
            text.push(' ');
        }
        collect_text(el, &mut text);
    }
    text
}

fn is_skipped(name: &str) -> bool {
    SKIP_TAGS.contains(&name)
}

fn is_inside_skipped(el: ElementRef<'_>) -> bool {
    el.ancestors().any(|ancestor| {
        ancestor
            .value()
            .as_element()
            .is_some_and(|e| is_skipped(e.name()))
    })
}

/// Append descendant text, skipping non-content subtrees
fn collect_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                if is_skipped(element.name()) {
                    continue;
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}
