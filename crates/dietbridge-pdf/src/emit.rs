//! Persisting finished documents
//!
//! Emission tries the direct route first: stream the PDF straight to its
//! destination. If that fails, the document is serialized to an in-memory
//! blob and handed to the target's blob save under the same file name. Only
//! when both routes fail does the caller see an error.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::document::ComposedDocument;
use crate::error::{PdfError, Result};
use crate::renderer::PdfRenderer;

/// Somewhere finished documents can be saved
pub trait SaveTarget {
    /// Direct route: render and store the document in one step
    fn save(&self, document: &ComposedDocument, file_name: &str) -> Result<PathBuf>;

    /// Fallback route: store an already serialized PDF
    fn save_blob(&self, blob: &[u8], file_name: &str) -> Result<PathBuf>;
}

impl<T: SaveTarget + ?Sized> SaveTarget for &T {
    fn save(&self, document: &ComposedDocument, file_name: &str) -> Result<PathBuf> {
        (**self).save(document, file_name)
    }

    fn save_blob(&self, blob: &[u8], file_name: &str) -> Result<PathBuf> {
        (**self).save_blob(blob, file_name)
    }
}

/// Which route produced the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitRoute {
    Direct,
    Blob,
}

impl std::fmt::Display for EmitRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmitRoute::Direct => write!(f, "direct"),
            EmitRoute::Blob => write!(f, "blob fallback"),
        }
    }
}

/// Outcome of a successful emission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emitted {
    pub path: PathBuf,
    pub file_name: String,
    pub route: EmitRoute,
}

/// Saves documents through a target, falling back to the blob route
#[derive(Debug, Clone)]
pub struct FileEmitter<S> {
    target: S,
}

impl<S: SaveTarget> FileEmitter<S> {
    pub fn new(target: S) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &S {
        &self.target
    }

    /// Save `document` under its own file name
    pub fn emit(&self, document: &ComposedDocument) -> Result<Emitted> {
        let file_name = document.file_name.as_str();

        let primary = match self.target.save(document, file_name) {
            Ok(path) => return Ok(self.emitted(path, file_name, EmitRoute::Direct)),
            Err(err) => err,
        };
        warn!(file = file_name, error = %primary, "direct save failed, retrying as blob");

        let fallback = PdfRenderer::render_to_bytes(document)
            .and_then(|blob| self.target.save_blob(&blob, file_name));

        match fallback {
            Ok(path) => Ok(self.emitted(path, file_name, EmitRoute::Blob)),
            Err(fallback) => Err(PdfError::Emission {
                file_name: file_name.to_string(),
                primary: Box::new(primary),
                fallback: Box::new(fallback),
            }),
        }
    }

    fn emitted(&self, path: PathBuf, file_name: &str, route: EmitRoute) -> Emitted {
        info!(path = %path.display(), %route, "saved diet plan PDF");
        Emitted {
            path,
            file_name: file_name.to_string(),
            route,
        }
    }
}

/// Saves into a directory on disk
#[derive(Debug, Clone)]
pub struct DirectoryTarget {
    dir: PathBuf,
}

impl DirectoryTarget {
    /// Use `dir`, creating it if needed
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SaveTarget for DirectoryTarget {
    fn save(&self, document: &ComposedDocument, file_name: &str) -> Result<PathBuf> {
        let mut staged = NamedTempFile::new_in(&self.dir)?;
        PdfRenderer::write_to(document, staged.as_file_mut())?;
        self.persist(staged, file_name)
    }

    fn save_blob(&self, blob: &[u8], file_name: &str) -> Result<PathBuf> {
        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(blob)?;
        self.persist(staged, file_name)
    }
}

impl DirectoryTarget {
    /// Move a fully written temp file to its final name
    ///
    /// A staged file that is never persisted is removed on drop, so a failed
    /// save leaves nothing under `file_name`.
    fn persist(&self, staged: NamedTempFile, file_name: &str) -> Result<PathBuf> {
        let path = self.dir.join(file_name);
        staged.as_file().sync_all()?;
        staged.persist(&path).map_err(|e| PdfError::Io(e.error))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io;

    use crate::document::Page;

    #[derive(Default)]
    struct FakeTarget {
        fail_direct: bool,
        fail_blob: bool,
        calls: RefCell<Vec<(&'static str, String)>>,
        blob_header: RefCell<Vec<u8>>,
    }

    impl SaveTarget for FakeTarget {
        fn save(&self, _document: &ComposedDocument, file_name: &str) -> Result<PathBuf> {
            self.calls.borrow_mut().push(("save", file_name.to_string()));
            if self.fail_direct {
                return Err(PdfError::Io(io::Error::other("download blocked")));
            }
            Ok(PathBuf::from(file_name))
        }

        fn save_blob(&self, blob: &[u8], file_name: &str) -> Result<PathBuf> {
            self.calls.borrow_mut().push(("save_blob", file_name.to_string()));
            *self.blob_header.borrow_mut() = blob.iter().take(4).copied().collect();
            if self.fail_blob {
                return Err(PdfError::Io(io::Error::other("disk full")));
            }
            Ok(PathBuf::from(file_name))
        }
    }

    fn document() -> ComposedDocument {
        ComposedDocument {
            title: "Ramadan Plan".to_string(),
            file_name: "Ramadan_Plan_Diet_Plan.pdf".to_string(),
            pages: vec![Page::new(1, 210.0, 297.0)],
        }
    }

    #[test]
    fn test_direct_route() {
        let target = FakeTarget::default();
        let emitted = FileEmitter::new(&target).emit(&document()).unwrap();

        assert_eq!(emitted.route, EmitRoute::Direct);
        assert_eq!(emitted.file_name, "Ramadan_Plan_Diet_Plan.pdf");
        assert_eq!(target.calls.borrow().len(), 1);
    }

    #[test]
    fn test_blob_fallback_uses_same_name() {
        let target = FakeTarget {
            fail_direct: true,
            ..FakeTarget::default()
        };
        let emitted = FileEmitter::new(&target).emit(&document()).unwrap();

        assert_eq!(emitted.route, EmitRoute::Blob);
        assert_eq!(
            *target.calls.borrow(),
            vec![
                ("save", "Ramadan_Plan_Diet_Plan.pdf".to_string()),
                ("save_blob", "Ramadan_Plan_Diet_Plan.pdf".to_string()),
            ]
        );
        assert_eq!(target.blob_header.borrow().as_slice(), b"%PDF");
    }

    #[test]
    fn test_both_routes_failing_is_reported() {
        let target = FakeTarget {
            fail_direct: true,
            fail_blob: true,
            ..FakeTarget::default()
        };
        let err = FileEmitter::new(&target).emit(&document()).unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("Could not generate PDF"), "{message}");
        assert!(message.contains("download blocked"));
        assert!(message.contains("disk full"));
        assert!(matches!(err, PdfError::Emission { .. }));
    }

    #[test]
    fn test_directory_target_writes_both_routes() {
        let dir = tempfile::tempdir().unwrap();
        let target = DirectoryTarget::create(dir.path().join("exports")).unwrap();
        let doc = document();

        let direct = target.save(&doc, "direct.pdf").unwrap();
        assert!(fs::read(&direct).unwrap().starts_with(b"%PDF"));

        let blob = PdfRenderer::render_to_bytes(&doc).unwrap();
        let staged = target.save_blob(&blob, "blob.pdf").unwrap();
        assert_eq!(fs::read(&staged).unwrap(), blob);
    }

    #[test]
    fn test_blob_save_replaces_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = DirectoryTarget::create(dir.path()).unwrap();
        fs::write(dir.path().join("plan.pdf"), b"partial").unwrap();

        let blob = PdfRenderer::render_to_bytes(&document()).unwrap();
        target.save_blob(&blob, "plan.pdf").unwrap();
        assert_eq!(fs::read(dir.path().join("plan.pdf")).unwrap(), blob);
    }

    #[test]
    fn test_failed_direct_save_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = DirectoryTarget::create(dir.path()).unwrap();
        let empty = ComposedDocument {
            pages: Vec::new(),
            ..document()
        };

        let err = target.save(&empty, "plan.pdf").unwrap_err();
        assert!(matches!(err, PdfError::Render(_)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_failed_emission_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = DirectoryTarget::create(dir.path()).unwrap();
        let empty = ComposedDocument {
            pages: Vec::new(),
            ..document()
        };

        let err = FileEmitter::new(&target).emit(&empty).unwrap_err();
        assert!(matches!(err, PdfError::Emission { .. }));
        assert!(!dir.path().join(&empty.file_name).exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
