use pc_core::error::{PcError, Result};
use pc_core::types::FileFormat;
use std::path::Path;

/// Trait for format-specific text extractors.
pub trait DocumentParser: Send + Sync {
    /// Format handled by this parser.
    fn format(&self) -> FileFormat;

    /// Extract the full text from raw file bytes.
    fn parse_bytes(&self, bytes: &[u8]) -> anyhow::Result<String>;

    /// Extract from a file path.
    fn parse_file(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|e| PcError::extraction(path, e))?;
        self.parse_bytes(&bytes).map_err(|e| PcError::extraction(path, format!("{e:#}")))
    }

    /// Supported file extensions.
    fn supported_extensions(&self) -> Vec<String> {
        vec![format!(".{}", self.format().extension())]
    }

    /// Check if a file can be parsed.
    fn can_parse(&self, path: &Path) -> bool {
        FileFormat::from_path(path).is_ok_and(|f| f == self.format())
    }
}
