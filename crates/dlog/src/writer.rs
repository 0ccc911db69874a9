//! Output path resolution and persistence.
//!
//! Relative output paths are anchored at the generator root, never at the
//! invocation directory. The header is written to a temporary file beside
//! the target and renamed over it, so a failed run leaves the previous
//! header untouched.

use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;

use crate::document::Document;
use crate::error::GenerateError;

/// Result of comparing a rendered header with the file on disk.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Freshness {
    /// The file matches byte for byte.
    UpToDate,
    /// The file exists with different contents.
    Stale,
    /// No file exists at the target path.
    Missing,
}

/// Absolute, normalised destination of the header.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutputTarget {
    path: PathBuf,
}

impl OutputTarget {
    /// Anchors `output` at `root` unless it is already absolute.
    pub fn resolve(root: &Path, output: &Path) -> Result<Self, GenerateError> {
        let joined = root.join(output);
        let absolute =
            std::path::absolute(&joined).map_err(|source| GenerateError::io(&joined, source))?;
        Ok(Self {
            path: normalize(&absolute),
        })
    }

    /// The resolved path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the target with `document`.
    ///
    /// The parent directory must exist. Existing permissions are carried over
    /// to the replacement file.
    pub fn write(&self, document: &Document) -> Result<&Path, GenerateError> {
        let rendered = document.render();
        let parent = self
            .path
            .parent()
            .ok_or_else(|| self.error(io::Error::other("output path has no parent directory")))?;

        let mut staged = NamedTempFile::new_in(parent).map_err(|source| self.error(source))?;
        staged
            .write_all(rendered.as_bytes())
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|source| self.error(source))?;
        if let Some(permissions) = self.permissions()? {
            staged
                .as_file()
                .set_permissions(permissions)
                .map_err(|source| self.error(source))?;
        }
        staged
            .persist(&self.path)
            .map_err(|error| self.error(error.error))?;

        logging::trace_write!(
            path = %self.path.display(),
            bytes = rendered.len(),
            "wrote debug log header"
        );
        Ok(&self.path)
    }

    /// Compares `document` with the current file without modifying it.
    pub fn freshness(&self, document: &Document) -> Result<Freshness, GenerateError> {
        match fs::read(&self.path) {
            Ok(existing) if existing == document.render().into_bytes() => Ok(Freshness::UpToDate),
            Ok(_) => Ok(Freshness::Stale),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(Freshness::Missing),
            Err(error) => Err(self.error(error)),
        }
    }

    fn permissions(&self) -> Result<Option<fs::Permissions>, GenerateError> {
        match fs::metadata(&self.path) {
            Ok(metadata) => Ok(Some(metadata.permissions())),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(default_permissions()),
            Err(error) => Err(self.error(error)),
        }
    }

    fn error(&self, source: io::Error) -> GenerateError {
        GenerateError::io(&self.path, source)
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

/// Removes `.` components and folds `..` into the preceding component
/// without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
