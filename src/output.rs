//! Output assembly for aicat runs.
//!
//! Every included file becomes one block: a blank line, a header naming the
//! file relative to the root, another blank line, then the content as-is.
//! Blocks are written back to back with no other separator.

use std::io::{self, Write};
use std::path::Path;

/// Formats the header that opens a block, including its surrounding blank lines.
pub fn format_header(relative: &Path) -> String {
    format!("\n===== {} =====\n\n", relative.display())
}

/// Sequential block writer over the output handle.
#[derive(Debug)]
pub struct ContextWriter<W: Write> {
    inner: W,
}

impl<W: Write> ContextWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn write_header(&mut self, relative: &Path) -> io::Result<()> {
        self.inner.write_all(format_header(relative).as_bytes())
    }

    pub fn write_content(&mut self, content: &str) -> io::Result<()> {
        self.inner.write_all(content.as_bytes())
    }

    /// Flushes and hands back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
