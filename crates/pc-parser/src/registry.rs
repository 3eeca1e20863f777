//! Extension-based dispatch to the format parsers.

use pc_core::error::{PcError, Result};
use pc_core::types::{Document, DocumentId, FileFormat};
use std::path::Path;
use tracing::debug;

use crate::{DocumentParser, DocxParser, PdfParser, TextParser};

/// Registry of available parsers.
pub struct ParserRegistry {
    parsers: Vec<Box<dyn DocumentParser>>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self {
            parsers: vec![
                Box::new(TextParser::new()),
                Box::new(DocxParser::new()),
                Box::new(PdfParser::new()),
            ],
        }
    }

    pub fn parser_for(&self, format: FileFormat) -> Option<&dyn DocumentParser> {
        self.parsers.iter().find(|p| p.format() == format).map(|p| &**p)
    }

    pub fn supports(&self, path: &Path) -> bool {
        self.parsers.iter().any(|p| p.can_parse(path))
    }

    /// Extract `path`, interpreting it as the declared extension.
    pub fn extract(&self, path: &Path, declared_ext: &str) -> Result<String> {
        let format = FileFormat::from_extension(declared_ext)?;
        let parser = self
            .parser_for(format)
            .ok_or_else(|| PcError::unsupported(format!(".{}", format.extension())))?;
        let text = parser.parse_file(path)?;
        debug!(path = %path.display(), format = format.extension(), chars = text.len(), "extracted");
        Ok(text)
    }

    /// Extract `path` using its own extension.
    pub fn extract_path(&self, path: &Path) -> Result<String> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        self.extract(path, ext)
    }

    /// Load a document identified by its path.
    pub fn load_document(&self, path: &Path) -> Result<Document> {
        let text = self.extract_path(path)?;
        Ok(Document::new(DocumentId::from(path), text))
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
