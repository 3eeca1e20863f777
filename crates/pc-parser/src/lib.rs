//! Text extraction and paragraph segmentation.
//!
//! Extraction turns a stored file (`.txt`, `.docx`, `.pdf`) into one string;
//! segmentation splits that string into the bounded list of paragraphs the
//! comparators work on.

pub mod docx;
pub mod pdf;
pub mod registry;
pub mod segmenter;
pub mod text;
pub mod traits;

pub use docx::DocxParser;
pub use pdf::PdfParser;
pub use registry::ParserRegistry;
pub use segmenter::ParagraphSegmenter;
pub use text::TextParser;
pub use traits::DocumentParser;
