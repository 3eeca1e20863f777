//! Corpus of previously accepted documents.

pub mod directory;
pub mod memory;
pub mod traits;

pub use directory::DirectoryCorpus;
pub use memory::MemoryCorpus;
pub use traits::CorpusRepository;
