//! HTML → plain text reduction for fetched pages.

use scraper::{Html, Node};

/// Elements whose text is never shown to a reader.
const HIDDEN: &[&str] = &["script", "style", "noscript", "template", "title"];
/// Elements that start a new line of text.
const BLOCKS: &[&str] = &[
    "p", "div", "br", "li", "h1", "h2", "h3", "h4", "h5", "h6", "tr", "section", "article",
    "blockquote", "pre", "table", "ul", "ol", "header", "footer", "main", "nav",
];

/// Visible text of a page, one line per block element, whitespace collapsed.
/// Entities are decoded by the HTML parser.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::with_capacity(html.len() / 2);

    for node in document.tree.root().descendants() {
        match node.value() {
            Node::Element(el) if BLOCKS.contains(&el.name()) => raw.push('\n'),
            Node::Text(text) => {
                let hidden = node.ancestors().any(|a| {
                    matches!(a.value(), Node::Element(el) if HIDDEN.contains(&el.name()))
                });
                if !hidden {
                    raw.push_str(text);
                }
            }
            _ => {}
        }
    }

    raw.lines()
        .map(norm_ws)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn norm_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
