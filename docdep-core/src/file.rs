use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use eyre::Result;

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the path the file is written to
    fn path(&self) -> &Path;

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file to disk, replacing any existing content
    fn write(&self) -> Result<()> {
        write_file(self.path(), &self.render())?;
        Ok(())
    }
}

/// Write `content` to `path`, truncating an existing file.
///
/// Parent directories are not created. The handle is flushed and closed
/// before this returns, on success and on failure alike.
pub fn write_file(path: &Path, content: &str) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(content.as_bytes())?;
    file.flush()
}
