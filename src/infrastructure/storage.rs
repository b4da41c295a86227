use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::stored_file::StoredFileName;

/// Flat directory of uploaded files, keyed by file name
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    /// Open the store, creating the directory if it does not exist yet.
    pub fn open(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, name: &StoredFileName) -> PathBuf {
        self.root.join(name.as_str())
    }

    /// Replace `name` with `bytes`. Readers see the old or the new content,
    /// never a partial write.
    pub fn write(&self, name: &StoredFileName, bytes: &[u8]) -> std::io::Result<PathBuf> {
        let mut staged = tempfile::Builder::new()
            .prefix(".upload-")
            .suffix(".tmp")
            .tempfile_in(&self.root)?;
        staged.write_all(bytes)?;
        staged.as_file().sync_all()?;

        let target = self.path_of(name);
        staged.persist(&target).map_err(|err| err.error)?;
        Ok(target)
    }

    pub fn contains(&self, name: &StoredFileName) -> bool {
        self.path_of(name).is_file()
    }

    /// Names of every entry directly under the root, sorted.
    pub fn list(&self) -> std::io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
