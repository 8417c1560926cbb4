//! Placement of graded files into per-category folders.
//!
//! Layout under the output root:
//!
//! ```text
//! Graded/
//!   Severe/
//!     Foo.cs
//!     Foo.cs_response.txt
//!   Minimal/
//!     Bar.cs
//! ```
//!
//! Files are copied by base name only, so two inputs with the same name in
//! different subfolders overwrite each other (last write wins).

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use perfsort_core::{Category, CategoryLabels, Grade};
use tracing::debug;

use crate::error::StoreError;

/// Appended to the source file name to form the explanation sidecar.
pub const SIDECAR_SUFFIX: &str = "_response.txt";

/// What was written for one graded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub copied_to: PathBuf,
    pub sidecar: Option<PathBuf>,
}

/// The graded output tree: a root directory with one folder per category label.
pub struct OutputTree {
    root: PathBuf,
    labels: CategoryLabels,
}

impl OutputTree {
    pub fn new(root: PathBuf, labels: CategoryLabels) -> Self {
        Self { root, labels }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the output root if needed.
    pub async fn ensure_root(&self) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(StoreError::io("create", &self.root))
    }

    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.root.join(self.labels.label(category))
    }

    /// Copy `source` into its category folder, plus a sidecar holding the
    /// explanation when the grade carries one.
    ///
    /// Folder creation is idempotent and never removes existing contents.
    /// The copy and the sidecar write are not atomic as a pair.
    pub async fn place(&self, source: &Path, grade: &Grade) -> Result<Placement, StoreError> {
        let file_name = source
            .file_name()
            .ok_or_else(|| StoreError::NoFileName(source.to_path_buf()))?;

        let dir = self.category_dir(grade.category);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(StoreError::io("create", &dir))?;

        let copied_to = dir.join(file_name);
        tokio::fs::copy(source, &copied_to)
            .await
            .map_err(|source_err| StoreError::Copy {
                from: source.to_path_buf(),
                to: copied_to.clone(),
                source: source_err,
            })?;

        let sidecar = match &grade.explanation {
            Some(text) => {
                let mut name = OsString::from(file_name);
                name.push(SIDECAR_SUFFIX);
                let path = dir.join(name);
                tokio::fs::write(&path, text)
                    .await
                    .map_err(StoreError::io("write", &path))?;
                Some(path)
            }
            None => None,
        };

        debug!(
            source = %source.display(),
            dest = %copied_to.display(),
            sidecar = sidecar.is_some(),
            "placed file"
        );
        Ok(Placement { copied_to, sidecar })
    }
}
