//! Plain text parser.

use anyhow::{Context, Result};
use pc_core::types::FileFormat;

use crate::traits::DocumentParser;

/// UTF-8 text, newlines translated to `\n`.
pub struct TextParser;

impl TextParser {
    pub fn new() -> Self { Self }
}

impl DocumentParser for TextParser {
    fn format(&self) -> FileFormat {
        FileFormat::Text
    }

    fn parse_bytes(&self, bytes: &[u8]) -> Result<String> {
        let text = std::str::from_utf8(bytes).context("file is not valid UTF-8")?;
        Ok(translate_newlines(text))
    }
}

impl Default for TextParser {
    fn default() -> Self { Self::new() }
}

/// `\r\n` and lone `\r` become `\n`.
pub fn translate_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
