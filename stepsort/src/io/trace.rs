//! JSON-lines step trace.
//!
//! One object per event: `{"seq":1,"step":{"kind":"swap","a":0,"b":1},"sequence":[...]}`.
//! `seq` starts at 1 and matches the event's position in the run.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::core::sink::StepSink;
use crate::core::step::Step;

#[derive(Serialize)]
struct TraceLine<'a, T> {
    seq: u64,
    step: &'a Step<T>,
    sequence: &'a [T],
}

/// Sink that appends every step to a writer.
///
/// The first write error is held and the sink refuses every step from then
/// on; [`TraceWriter::finish`] reports it.
pub struct TraceWriter<W: Write> {
    writer: W,
    written: u64,
    error: Option<std::io::Error>,
}

impl TraceWriter<BufWriter<File>> {
    /// Create (or truncate) a trace file.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).with_context(|| format!("create trace {}", path.display()))?;
        debug!(path = %path.display(), "opened trace file");
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TraceWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            written: 0,
            error: None,
        }
    }

    /// Lines written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush and hand back the writer, or the first error hit while tracing.
    pub fn finish(mut self) -> Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err).context("write trace");
        }
        self.writer.flush().context("flush trace")?;
        Ok(self.writer)
    }

    fn write_line<T: Serialize>(&mut self, step: &Step<T>, sequence: &[T]) -> std::io::Result<()> {
        let line = TraceLine {
            seq: self.written + 1,
            step,
            sequence,
        };
        serde_json::to_writer(&mut self.writer, &line)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }
}

impl<T: Serialize, W: Write> StepSink<T> for TraceWriter<W> {
    fn on_step(&mut self, step: Step<T>, sequence: &[T]) -> bool {
        if self.error.is_some() {
            return false;
        }
        match self.write_line(&step, sequence) {
            Ok(()) => true,
            Err(err) => {
                self.error = Some(err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorts::insertion;
    use serde_json::{Value, json};

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writes_one_line_per_step() {
        let mut trace = TraceWriter::new(Vec::new());
        let outcome = insertion(&[2, 1], &mut trace);
        assert!(outcome.is_completed());
        assert_eq!(trace.written(), outcome.steps);

        let bytes = trace.finish().expect("finish");
        let lines: Vec<Value> = String::from_utf8(bytes)
            .expect("utf8")
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect();
        assert_eq!(
            lines[2],
            json!({"seq": 3, "step": {"kind": "swap", "a": 0, "b": 1}, "sequence": [1, 2]})
        );
        assert_eq!(
            lines.last(),
            Some(&json!({"seq": 5, "step": {"kind": "completed"}, "sequence": [1, 2]}))
        );
    }

    #[test]
    fn write_error_cancels_and_surfaces_on_finish() {
        let mut trace = TraceWriter::new(BrokenPipe);
        let outcome = insertion(&[3, 2, 1], &mut trace);
        assert!(!outcome.is_completed());
        assert_eq!(outcome.steps, 1);
        let err = trace.finish().err().expect("held error");
        assert!(format!("{err:#}").contains("closed"));
    }

    #[test]
    fn create_reports_missing_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("absent").join("trace.jsonl");
        assert!(TraceWriter::create(&path).is_err());
    }
}
