//! Scoped temporary files for uploads parsed from disk

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Upload bytes written to a temporary file
///
/// The file is deleted when the guard drops, whichever way the parse that
/// uses it ends.
#[derive(Debug)]
pub struct StagedFile {
    file: NamedTempFile,
}

impl StagedFile {
    /// Write bytes to a new temporary file in `dir` (or the system temp dir)
    pub fn write(bytes: &[u8], suffix: &str, dir: Option<&Path>) -> std::io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("extractkit-").suffix(suffix);
        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self { file })
    }

    /// Path of the staged file
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
