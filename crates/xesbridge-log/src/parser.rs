use crate::error::LogError;
use crate::ir::{EVENT_SEPARATOR, Record, TRACE_SEPARATOR, Trace};
use std::fs;
use std::path::Path;

/// A streaming parser for labeled trace files.
///
/// Each input line has the form `<label>\t<event>;<event>;...`. `TraceParser`
/// accepts input incrementally or as a whole and yields exactly one
/// [`Record`] per line, in file order.
pub struct TraceParser {
    buffer: String,
    next_line: usize,
}

impl Default for TraceParser {
    /// Creates a default, empty parser.
    fn default() -> Self {
        Self::new()
    }
}

impl TraceParser {
    /// Creates a new, empty `TraceParser`.
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            next_line: 1,
        }
    }

    /// Appends input to the internal buffer and parses every complete line.
    ///
    /// # Arguments
    ///
    /// * `input` - A slice of the trace file content to append.
    ///
    /// # Returns
    ///
    /// The records for all lines completed by this chunk. A trailing partial
    /// line stays buffered until more input or [`finish`](Self::finish).
    pub fn update(&mut self, input: &str) -> Vec<Record> {
        self.buffer.push_str(input);
        self.process_buffer()
    }

    /// Consumes the parser and flushes a final line that had no newline.
    pub fn finish(mut self) -> Vec<Record> {
        if self.buffer.is_empty() {
            return Vec::new();
        }
        let mut line = std::mem::take(&mut self.buffer);
        // A held-back '\r' was a terminator after all.
        if line.ends_with('\r') {
            line.pop();
        }
        vec![self.emit(&line)]
    }

    /// Parses a complete input in one go.
    pub fn parse(mut self, input: &str) -> Vec<Record> {
        let mut records = self.update(input);
        records.extend(self.finish());
        records
    }

    /// Reads the whole file into memory, then parses it.
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<Record>, LogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records = Self::new().parse(&content);
        log::info!("Parsed {} records from {:?}", records.len(), path);
        Ok(records)
    }

    fn process_buffer(&mut self) -> Vec<Record> {
        let (ranges, consumed) = complete_lines(&self.buffer);
        if consumed == 0 {
            return Vec::new();
        }

        let chunk: String = self.buffer.drain(..consumed).collect();
        ranges
            .into_iter()
            .map(|(start, end)| self.emit(&chunk[start..end]))
            .collect()
    }

    fn emit(&mut self, line: &str) -> Record {
        let record = parse_line(self.next_line, line);
        self.next_line += 1;
        log::info!(
            "line {}: label={:?} trace={:?}",
            record.line,
            record.label,
            record.trace.events
        );
        record
    }
}

/// Finds the complete lines at the front of `buffer`.
///
/// `\n`, `\r\n` and a bare `\r` all end a line. A `\r` in the last byte is
/// left unconsumed since the next chunk may start with its `\n`.
///
/// Returns the line ranges (terminators excluded) and the number of bytes
/// they span including terminators.
fn complete_lines(buffer: &str) -> (Vec<(usize, usize)>, usize) {
    let bytes = buffer.as_bytes();
    let mut ranges = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                ranges.push((start, i));
                i += 1;
                start = i;
            }
            b'\r' => {
                if i + 1 == bytes.len() {
                    break;
                }
                ranges.push((start, i));
                i += if bytes[i + 1] == b'\n' { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }

    (ranges, start)
}

/// Parses a single line (without its terminator) into a [`Record`].
///
/// The line splits on the first tab only. A missing or blank trace segment
/// yields an empty trace rather than a trace holding one empty event.
pub fn parse_line(line_no: usize, line: &str) -> Record {
    let mut fields = line.splitn(2, TRACE_SEPARATOR);
    let label = fields.next().unwrap_or_default().trim().to_string();

    let trace = match fields.next().map(str::trim) {
        None | Some("") => Trace::empty(),
        Some(segment) => segment.split(EVENT_SEPARATOR).collect(),
    };

    Record {
        line: line_no,
        label,
        trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streaming_chunks() {
        let mut parser = TraceParser::new();
        let mut records = parser.update("Y\ta;b");
        assert!(records.is_empty());
        records.extend(parser.update(";c\nN\td"));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].trace, Trace::from_iter(["a", "b", "c"]));

        records.extend(parser.finish());
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].line, 2);
        assert_eq!(records[1].trace, Trace::from_iter(["d"]));
    }

    #[test]
    fn test_carriage_return_line_endings() {
        let records = TraceParser::new().parse("Y\ta\rN\tb\r");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label, "Y");
        assert_eq!(records[0].trace, Trace::from_iter(["a"]));
        assert_eq!(records[1].label, "N");
        assert_eq!(records[1].trace, Trace::from_iter(["b"]));
    }

    #[test]
    fn test_mixed_line_endings() {
        let records = TraceParser::new().parse("Y\ta\r\nN\tb\rY\tc\n\r\r\nN");
        let labels: Vec<&str> = records.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Y", "N", "Y", "", "", "N"]);
        assert_eq!(records[4].line, 5);
        assert!(records[4].trace.is_empty());
    }

    #[test]
    fn test_carriage_return_held_across_chunks() {
        let mut parser = TraceParser::new();
        let records = parser.update("Y\ta\r");
        assert!(records.is_empty());

        // The '\n' completes a CRLF, not a second (empty) line.
        let records = parser.update("\nN\tb\r");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].trace, Trace::from_iter(["a"]));

        let records = parser.finish();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line, 2);
        assert_eq!(records[0].trace, Trace::from_iter(["b"]));
    }

    #[test]
    fn test_lone_carriage_return_is_one_empty_line() {
        let records = TraceParser::new().parse("\r");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "");
        assert!(records[0].trace.is_empty());
    }

    #[test]
    fn test_parse_line_only_first_tab_splits() {
        let record = parse_line(1, "Y\ta;b\tc");
        assert_eq!(record.label, "Y");
        assert_eq!(record.trace, Trace::from_iter(["a", "b\tc"]));
    }

    #[test]
    fn test_parse_line_blank_segment() {
        let record = parse_line(3, "N\t   ");
        assert_eq!(record.line, 3);
        assert!(record.trace.is_empty());
    }
}
