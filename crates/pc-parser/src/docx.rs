//! Word-processor (`.docx`) parser.
//!
//! Reads `word/document.xml` out of the package and keeps the body-level
//! paragraphs in document order. Paragraphs nested in tables or text boxes are
//! not part of the body flow and are skipped.

use anyhow::{anyhow, Context, Result};
use pc_core::types::FileFormat;
use roxmltree::Node;
use std::io::{Cursor, Read};

use crate::traits::DocumentParser;

const DOCUMENT_PART: &str = "word/document.xml";

pub struct DocxParser;

impl DocxParser {
    pub fn new() -> Self { Self }

    /// Non-empty body paragraphs, in order.
    pub fn paragraphs(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).context("not a zip package")?;
        let mut part = archive
            .by_name(DOCUMENT_PART)
            .with_context(|| format!("{DOCUMENT_PART} missing"))?;
        let mut xml = String::new();
        part.read_to_string(&mut xml)
            .with_context(|| format!("cannot read {DOCUMENT_PART}"))?;

        let doc = roxmltree::Document::parse(&xml).context("document.xml parse failed")?;
        let body = doc
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "body")
            .ok_or_else(|| anyhow!("document.xml has no body"))?;

        Ok(body
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "p")
            .map(paragraph_text)
            .filter(|text| !text.is_empty())
            .collect())
    }
}

impl DocumentParser for DocxParser {
    fn format(&self) -> FileFormat {
        FileFormat::Docx
    }

    fn parse_bytes(&self, bytes: &[u8]) -> Result<String> {
        Ok(self.paragraphs(bytes)?.join("\n"))
    }
}

impl Default for DocxParser {
    fn default() -> Self { Self::new() }
}

/// Text of the runs of one `w:p`. Tab stops declared in paragraph
/// properties are also named `tab`, so only nodes inside a run count.
fn paragraph_text(para: Node<'_, '_>) -> String {
    let mut buf = String::new();
    for node in para.descendants().filter(|n| n.is_element() && inside_run(n)) {
        match node.tag_name().name() {
            "t" => {
                if let Some(text) = node.text() {
                    buf.push_str(text);
                }
            }
            "tab" => buf.push('\t'),
            "br" | "cr" => buf.push('\n'),
            _ => {}
        }
    }
    buf
}

fn inside_run(node: &Node<'_, '_>) -> bool {
    node.ancestors()
        .skip(1)
        .take_while(|a| a.tag_name().name() != "p")
        .any(|a| a.tag_name().name() == "r")
}
