//! Recorded uniform streams.
//!
//! A trace is a text file with one uniform value per line, e.g. the output of
//! an external generator, so a run can be replayed draw for draw.  Blank
//! lines are skipped.  A value that does not parse, or lies outside `[0, 1]`,
//! is an error, as is reading past the last line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::rng::{DrawResult, UniformSource};
use crate::TraceError;

/// A [`UniformSource`] that reads values line by line.
pub struct TraceSource<R> {
    name:   String,
    reader: R,
    line:   u64,
    drawn:  u64,
    buf:    String,
}

impl TraceSource<BufReader<File>> {
    /// Open the trace file at `path`.
    pub fn open(path: &Path) -> Result<Self, TraceError> {
        let name = path.display().to_string();
        let file = File::open(path)
            .map_err(|e| TraceError::Io { trace: name.clone(), message: e.to_string() })?;
        Ok(Self::from_reader(name, BufReader::new(file)))
    }
}

impl<R: BufRead> TraceSource<R> {
    /// Read values from `reader`; `name` labels errors.
    pub fn from_reader(name: impl Into<String>, reader: R) -> Self {
        Self { name: name.into(), reader, line: 0, drawn: 0, buf: String::new() }
    }

    /// Values handed out so far.
    #[inline]
    pub fn drawn(&self) -> u64 {
        self.drawn
    }
}

impl<R: BufRead> UniformSource for TraceSource<R> {
    fn next_uniform(&mut self) -> DrawResult<f64> {
        loop {
            self.buf.clear();
            let read = self.reader.read_line(&mut self.buf).map_err(|e| TraceError::Io {
                trace:   self.name.clone(),
                message: e.to_string(),
            })?;
            if read == 0 {
                return Err(TraceError::Exhausted { trace: self.name.clone(), drawn: self.drawn });
            }
            self.line += 1;

            let text = self.buf.trim();
            if text.is_empty() {
                continue;
            }
            return match text.parse::<f64>() {
                Ok(u) if (0.0..=1.0).contains(&u) => {
                    self.drawn += 1;
                    Ok(u)
                }
                _ => Err(TraceError::Malformed {
                    trace: self.name.clone(),
                    line:  self.line,
                    text:  text.to_owned(),
                }),
            };
        }
    }
}
