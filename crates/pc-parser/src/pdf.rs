//! PDF parser.

use anyhow::{anyhow, Result};
use pc_core::types::FileFormat;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::debug;

use crate::traits::DocumentParser;

/// Per-page text concatenated in page order. A page without extractable
/// text contributes an empty string.
pub struct PdfParser;

impl PdfParser {
    pub fn new() -> Self { Self }

    pub fn pages(&self, bytes: &[u8]) -> Result<Vec<String>> {
        // pdf-extract panics on some malformed inputs.
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }));
        match outcome {
            Ok(Ok(pages)) => {
                debug!(pages = pages.len(), "pdf text extracted");
                Ok(pages)
            }
            Ok(Err(e)) => Err(anyhow!("pdf-extract failed: {e}")),
            Err(_) => Err(anyhow!("pdf-extract panicked on malformed input")),
        }
    }
}

impl DocumentParser for PdfParser {
    fn format(&self) -> FileFormat {
        FileFormat::Pdf
    }

    fn parse_bytes(&self, bytes: &[u8]) -> Result<String> {
        Ok(self.pages(bytes)?.concat())
    }
}

impl Default for PdfParser {
    fn default() -> Self { Self::new() }
}
