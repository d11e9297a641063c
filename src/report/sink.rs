//! Report sink: where rendered report lines go.
//!
//! Three destinations: the terminal, an in-memory buffer (engine tests),
//! or a text file. A file sink is validated before any test executes:
//! the path must end in `.txt` and must not already exist, so a prior
//! report is never silently overwritten.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{Result, TestrigError};

use super::TRACE_PREFIX;

/// Visual rule separating report sections.
const SECTION_RULE: &str = "\n________________";

#[derive(Debug)]
enum Sink {
    Stdout(io::Stdout),
    File(BufWriter<File>),
    Buffer(Vec<u8>),
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Stdout(out) => out.write(buf),
            Sink::File(file) => file.write(buf),
            Sink::Buffer(buffer) => buffer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Stdout(out) => out.flush(),
            Sink::File(file) => file.flush(),
            Sink::Buffer(buffer) => buffer.flush(),
        }
    }
}

/// Line-oriented writer the whole pipeline renders through.
#[derive(Debug)]
pub struct ReportWriter {
    sink: Sink,
}

impl ReportWriter {
    /// Report to the terminal.
    pub fn stdout() -> Self {
        Self {
            sink: Sink::Stdout(io::stdout()),
        }
    }

    /// Report into an in-memory buffer, retrievable with
    /// [`ReportWriter::into_string`].
    pub fn buffer() -> Self {
        Self {
            sink: Sink::Buffer(Vec::new()),
        }
    }

    /// Report into a new text file.
    ///
    /// Fails before any test executes when the path does not end in
    /// `.txt` (case-insensitive) or the file already exists.
    pub fn to_file(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        if !display.to_lowercase().ends_with(".txt") {
            return Err(TestrigError::ReportPath(format!(
                "report path \"{}\" should end with \".txt\"",
                display
            )));
        }
        if path.exists() {
            return Err(TestrigError::ReportPath(format!(
                "report file \"{}\" exists and would be overwritten; \
                 delete it or use a different pathname",
                display
            )));
        }
        let file = File::create(path)?;
        Ok(Self {
            sink: Sink::File(BufWriter::new(file)),
        })
    }

    /// Write one line.
    pub fn line(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.sink, "{}", text.as_ref())?;
        Ok(())
    }

    /// Write an empty line.
    pub fn blank(&mut self) -> Result<()> {
        writeln!(self.sink)?;
        Ok(())
    }

    /// Write an engine trace line, prefixed so it is easy to grep for.
    pub fn trace(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.sink, "{}{}", TRACE_PREFIX, text.as_ref())?;
        Ok(())
    }

    /// Write the section separator rule.
    pub fn rule(&mut self) -> Result<()> {
        writeln!(self.sink, "{}", SECTION_RULE)?;
        Ok(())
    }

    /// Flush buffered output (meaningful for the file sink).
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    /// Recover the rendered report from a buffer sink; `None` for the
    /// terminal and file sinks.
    pub fn into_string(self) -> Option<String> {
        match self.sink {
            Sink::Buffer(buffer) => Some(String::from_utf8_lossy(&buffer).into_owned()),
            _ => None,
        }
    }
}
