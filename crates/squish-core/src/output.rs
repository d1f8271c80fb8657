//! JSON output for status reports.
//!
//! Reports go to stdout (or any writer) so that logs on stderr never mix with
//! machine-readable output.

use serde::Serialize;
use std::io::{self, Write};

/// A writer that serializes items as one JSON document per line.
pub struct OutputWriter<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> OutputWriter<W> {
    /// Create a new output writer.
    ///
    /// # Arguments
    ///
    /// * `writer` - The underlying writer (file, stdout, etc.)
    /// * `pretty` - Whether to pretty-print JSON
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
        }
    }

    /// Write a single item followed by a newline.
    pub fn write<T: Serialize>(&mut self, item: &T) -> io::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, item).map_err(io::Error::other)?;
        } else {
            serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CompressTarget, StatusReport, TargetFormat};

    fn report() -> StatusReport {
        StatusReport::new(
            "data.csv",
            TargetFormat::Compressed(CompressTarget::Br),
            1000,
            400,
        )
    }

    #[test]
    fn test_write_compact_report() {
        let mut buffer = Vec::new();
        let mut writer = OutputWriter::new(&mut buffer, false);
        writer.write(&report()).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("\"file_name\":\"data.csv\""));
        assert!(output.contains("\"reduction_percent\":60.0"));
    }

    #[test]
    fn test_write_pretty_report() {
        let mut buffer = Vec::new();
        let mut writer = OutputWriter::new(&mut buffer, true);
        writer.write(&report()).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.lines().count() > 1);
        assert!(output.contains("\"format\": \"br\""));
    }

    #[test]
    fn test_written_report_round_trips() {
        let mut buffer = Vec::new();
        OutputWriter::new(&mut buffer, false).write(&report()).unwrap();
        let back: StatusReport = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(back, report());
    }
}
