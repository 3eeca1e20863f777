//! Upload-directory corpus.
//!
//! Every regular file with a supported extension directly inside the root is a
//! corpus document; its id is the file's path under the root.

use pc_core::error::{PcError, Result};
use pc_core::types::DocumentId;
use pc_parser::ParserRegistry;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::traits::CorpusRepository;

pub struct DirectoryCorpus {
    root: PathBuf,
    registry: ParserRegistry,
}

impl DirectoryCorpus {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), registry: ParserRegistry::new() }
    }

    /// Create the root directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let corpus = Self::new(root);
        fs::create_dir_all(&corpus.root)?;
        Ok(corpus)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn registry(&self) -> &ParserRegistry {
        &self.registry
    }

    /// Id of the file stored as `file_name`.
    pub fn id_for(&self, file_name: &str) -> DocumentId {
        DocumentId::from(self.root.join(file_name).as_path())
    }

    pub fn path_of(&self, id: &DocumentId) -> PathBuf {
        PathBuf::from(id.as_str())
    }

    /// Write `bytes` as `file_name` (temp file + rename) and return its id.
    pub fn store(&self, file_name: &str, bytes: &[u8]) -> Result<DocumentId> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            return Err(PcError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid stored file name: {file_name:?}"),
            )));
        }
        fs::create_dir_all(&self.root)?;
        let path = self.root.join(file_name);
        let tmp_path = self.root.join(format!(".{file_name}.tmp"));
        let result = (|| -> std::io::Result<()> {
            let mut f = fs::File::create(&tmp_path)?;
            f.write_all(bytes)?;
            f.sync_all()?;
            fs::rename(&tmp_path, &path)
        })();
        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        debug!(path = %path.display(), bytes = bytes.len(), "stored corpus document");
        Ok(DocumentId::from(path.as_path()))
    }
}

impl CorpusRepository for DirectoryCorpus {
    fn list(&self, exclude: Option<&DocumentId>) -> Result<Vec<DocumentId>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_file() && self.registry.supports(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths
            .iter()
            .map(|p| DocumentId::from(p.as_path()))
            .filter(|id| Some(id) != exclude)
            .collect())
    }

    fn load(&self, id: &DocumentId) -> Result<String> {
        self.registry.extract_path(&self.path_of(id))
    }
}
