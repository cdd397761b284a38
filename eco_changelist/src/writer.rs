//! Changelist serialization.

use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::{Command, EcoError};

/// Writes commands one per line, `\n`-terminated.
pub struct ChangelistWriter<W: Write> {
    inner: BufWriter<W>,
    written: usize,
}

impl<W: Write> ChangelistWriter<W> {
    /// Wrap `inner` in a buffered writer.
    pub fn new(inner: W) -> Self {
        Self {
            inner: BufWriter::new(inner),
            written: 0,
        }
    }

    /// Write one command line.
    pub fn write_command(&mut self, command: &Command) -> io::Result<()> {
        writeln!(self.inner, "{command}")?;
        self.written += 1;
        Ok(())
    }

    /// Write every command in order.
    pub fn write_all<'c>(&mut self, commands: impl IntoIterator<Item = &'c Command>) -> io::Result<()> {
        for command in commands {
            self.write_command(command)?;
        }
        Ok(())
    }

    /// Number of commands written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and return the underlying writer.
    pub fn finish(self) -> io::Result<W> {
        self.inner.into_inner().map_err(|e| e.into_error())
    }
}

/// Write `commands` to `path`.
///
/// The text goes to a temporary file in the destination directory which is
/// renamed over `path` only once every command is written, so a failed run
/// never leaves a partial changelist behind.
pub fn write_changelist(path: impl AsRef<Path>, commands: &[Command]) -> Result<(), EcoError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp = NamedTempFile::new_in(dir).map_err(|e| EcoError::output(path, e))?;
    let mut writer = ChangelistWriter::new(temp);
    writer
        .write_all(commands)
        .map_err(|e| EcoError::output(path, e))?;
    let written = writer.written();
    let temp = writer.finish().map_err(|e| EcoError::output(path, e))?;
    temp.persist(path)
        .map_err(|e| EcoError::output(path, e.error))?;

    info!("Wrote {} commands to {}", written, path.display());
    Ok(())
}
