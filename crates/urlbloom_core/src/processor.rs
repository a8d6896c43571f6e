//! Line-oriented command processor.
//!
//! Input records are `COMMAND KEY`, one per line. The line is trimmed and split
//! at its first whitespace character; everything after it is the key.
//!
//! | input            | output                                  |
//! |------------------|-----------------------------------------|
//! | `ADD key`        | `Added: key`                            |
//! | `CONTAINS key`   | `URL Existence Check for key: True`     |
//! | `OTHER key`      | `Invalid command: OTHER`                |
//!
//! Lines without a separator are reported and skipped; blank lines are counted
//! and skipped.
use crate::consts::{CMD_ADD, CMD_CONTAINS};
use crate::errors::{BloomError, Result};
use crate::filter::{Bloom, InsertOutcome};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record<'a> {
    Add(&'a str),
    Contains(&'a str),
    Invalid(&'a str),
}

pub fn parse_record(line_no: usize, line: &str) -> Result<Record<'_>> {
    let trimmed = line.trim();
    let Some((cmd, key)) = trimmed.split_once(char::is_whitespace) else {
        return Err(BloomError::MalformedRecord { line_no, line: trimmed.to_string() });
    };
    Ok(match cmd {
        CMD_ADD => Record::Add(key),
        CMD_CONTAINS => Record::Contains(key),
        _ => Record::Invalid(cmd),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response<'a> {
    Added(&'a str),
    Checked { key: &'a str, present: bool },
    Invalid(&'a str),
}

impl fmt::Display for Response<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Added(key) => write!(f, "Added: {key}"),
            Response::Checked { key, present } => {
                let v = if *present { "True" } else { "False" };
                write!(f, "URL Existence Check for {key}: {v}")
            }
            Response::Invalid(cmd) => write!(f, "Invalid command: {cmd}"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessStats {
    pub added: u64,
    pub saturated: u64,
    pub queried: u64,
    pub hits: u64,
    pub invalid: u64,
    pub malformed: u64,
    pub blank: u64,
}

impl fmt::Display for ProcessStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "added={} saturated={} queried={} hits={} invalid={} malformed={} blank={}",
            self.added, self.saturated, self.queried, self.hits, self.invalid, self.malformed,
            self.blank
        )
    }
}

/// Drives a borrowed filter from a stream of records.
pub struct LineProcessor<'f> {
    filter: &'f mut Bloom,
    stats: ProcessStats,
}

impl<'f> LineProcessor<'f> {
    pub fn new(filter: &'f mut Bloom) -> Self {
        Self { filter, stats: ProcessStats::default() }
    }

    pub fn stats(&self) -> ProcessStats { self.stats }

    pub fn apply<'a>(&mut self, record: Record<'a>) -> Response<'a> {
        match record {
            Record::Add(key) => {
                self.stats.added += 1;
                if let InsertOutcome::Saturated = self.filter.insert(key.as_bytes()) {
                    self.stats.saturated += 1;
                    warn!(key, "bloom filter is full, cannot add key");
                }
                Response::Added(key)
            }
            Record::Contains(key) => {
                let present = self.filter.contains(key.as_bytes());
                self.stats.queried += 1;
                if present { self.stats.hits += 1; }
                Response::Checked { key, present }
            }
            Record::Invalid(cmd) => {
                self.stats.invalid += 1;
                Response::Invalid(cmd)
            }
        }
    }

    pub fn handle_line<'a>(&mut self, line_no: usize, line: &'a str) -> Result<Response<'a>> {
        let record = parse_record(line_no, line)?;
        debug!(line_no, ?record, "record");
        Ok(self.apply(record))
    }

    /// Processes every line of `reader`, writing one response line per
    /// well-formed record. Bad records are counted and skipped.
    pub fn run<R: BufRead, W: Write>(&mut self, mut reader: R, mut writer: W) -> Result<ProcessStats> {
        let mut buf = Vec::new();
        let mut line_no = 0usize;
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;
            let Ok(line) = std::str::from_utf8(&buf) else {
                self.stats.malformed += 1;
                error!(line_no, "record is not valid UTF-8, skipping");
                continue;
            };
            if line.trim().is_empty() {
                self.stats.blank += 1;
                debug!(line_no, "blank line, skipping");
                continue;
            }
            match self.handle_line(line_no, line) {
                Ok(resp) => writeln!(writer, "{resp}")?,
                Err(e @ BloomError::MalformedRecord { .. }) => {
                    self.stats.malformed += 1;
                    error!("{e}, skipping");
                }
                Err(e) => return Err(e),
            }
        }
        writer.flush()?;
        info!(lines = line_no, stats = %self.stats, "input processed");
        Ok(self.stats)
    }
}

/// Opens `input` before touching `output`, so a missing source leaves no
/// output file behind.
pub fn process_file(filter: &mut Bloom, input: &Path, output: &Path) -> Result<ProcessStats> {
    let src = File::open(input)
        .map_err(|source| BloomError::SourceUnavailable { path: input.to_path_buf(), source })?;
    let dst = File::create(output)?;
    LineProcessor::new(filter).run(BufReader::new(src), BufWriter::new(dst))
}
