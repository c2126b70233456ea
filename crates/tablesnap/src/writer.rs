use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use tablesnap_core::{Result, SnapError};

use crate::project::Project;

impl Project {
    /// Resolve `path` against the project root.
    ///
    /// A relative root is taken from the current directory. Relative paths are
    /// joined to the root; absolute paths are accepted only when they already
    /// lie inside it. Anything escaping the root through `..` is rejected.
    pub fn resolve_path(&self, path: &Path) -> Result<PathBuf> {
        let root = std::path::absolute(self.root())
            .map_err(|e| SnapError::filesystem(self.root(), e))?;
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        };

        let outside = || SnapError::OutsideProjectRoot(path.to_path_buf());
        let resolved = normalize(&joined).ok_or_else(outside)?;
        let root = normalize(&root).ok_or_else(outside)?;
        if !resolved.starts_with(&root) {
            return Err(outside());
        }
        Ok(resolved)
    }

    /// Write `content` plus a trailing newline, creating or truncating the file.
    ///
    /// Parent directories are not created. Returns the resolved path.
    pub fn write_file(&self, path: impl AsRef<Path>, content: &str) -> Result<PathBuf> {
        let path = self.resolve_path(path.as_ref())?;

        let file = File::create(&path).map_err(|e| SnapError::filesystem(&path, e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(content.as_bytes())
            .and_then(|()| writer.write_all(b"\n"))
            .and_then(|()| writer.flush())
            .map_err(|e| SnapError::filesystem(&path, e))?;

        tracing::debug!(path = %path.display(), bytes = content.len() + 1, "wrote file");
        Ok(path)
    }

    /// Read a file resolved against the project root.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<(PathBuf, String)> {
        let path = self.resolve_path(path.as_ref())?;
        let content = fs::read_to_string(&path).map_err(|e| SnapError::filesystem(&path, e))?;
        Ok((path, content))
    }
}

/// Lexically fold `.` and `..` components. `None` when `..` climbs past the start.
fn normalize(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    let mut depth = 0usize;
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return None;
                }
                out.pop();
                depth -= 1;
            }
            Component::Normal(part) => {
                out.push(part);
                depth += 1;
            }
            Component::RootDir | Component::Prefix(_) => out.push(component.as_os_str()),
        }
    }
    Some(out)
}
