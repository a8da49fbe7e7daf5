//! Rolled file naming
//!
//! Turns a base log path such as `logs/app-.log` into concrete file names
//! for each checkpoint, and supplies the patterns a sink uses to recognize
//! files it rolled earlier. Nothing here touches the filesystem.

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{Error, Result};
use crate::rolling::{CalendarInstant, FormatDescriptor, Granularity};

/// Width of the zero-padded sequence suffix
const SEQUENCE_WIDTH: usize = 3;

/// Builds file names for rolled log files
#[derive(Debug, Clone)]
pub struct RollingFileNamer {
    /// Directory holding the log files
    directory: PathBuf,
    /// File name up to the period token
    prefix: String,
    /// Extension including the leading dot, possibly empty
    extension: String,
    /// Rotation granularity
    granularity: Granularity,
    /// Token and pattern for the granularity
    format: FormatDescriptor,
}

impl RollingFileNamer {
    /// Create a namer for `path` rolling at `granularity`
    pub fn new<P: AsRef<Path>>(path: P, granularity: Granularity) -> Result<Self> {
        let path = path.as_ref();

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                Error::config(format!("Log path has no usable file name: {:?}", path))
            })?;

        let (prefix, extension) = match file_name.rfind('.') {
            Some(dot) if dot > 0 => (&file_name[..dot], &file_name[dot..]),
            _ => (file_name, ""),
        };

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(Self {
            directory,
            prefix: prefix.to_string(),
            extension: extension.to_string(),
            granularity,
            format: granularity.format(),
        })
    }

    /// Directory holding the log files
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File name text preceding the period token
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Extension including the leading dot
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Rotation granularity
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// File name for the period starting at `checkpoint`.
    ///
    /// `sequence` numbers additional files within one period, for sinks that
    /// also roll on size.
    pub fn file_name<I: CalendarInstant>(
        &self,
        checkpoint: Option<&I>,
        sequence: Option<u32>,
    ) -> String {
        let period = checkpoint
            .map(|instant| self.format.render(instant))
            .unwrap_or_default();

        let mut name = String::with_capacity(
            self.prefix.len() + period.len() + self.extension.len() + SEQUENCE_WIDTH + 1,
        );
        name.push_str(&self.prefix);
        name.push_str(&period);
        if let Some(sequence) = sequence {
            name.push_str(&format!("_{:0width$}", sequence, width = SEQUENCE_WIDTH));
        }
        name.push_str(&self.extension);
        name
    }

    /// Full path for the period starting at `checkpoint`
    pub fn path<I: CalendarInstant>(
        &self,
        checkpoint: Option<&I>,
        sequence: Option<u32>,
    ) -> PathBuf {
        self.directory.join(self.file_name(checkpoint, sequence))
    }

    /// Glob selecting candidate files in the directory
    pub fn search_pattern(&self) -> String {
        format!("{}*{}", self.prefix, self.extension)
    }

    /// Regex matching whole file names produced by this namer.
    ///
    /// Captures the period text as `period` and the sequence suffix, when
    /// present, as `sequence`.
    pub fn matcher(&self) -> Result<Regex> {
        let pattern = format!(
            r"^{}(?P<period>{})(?P<sequence>_\d{{{},}})?{}$",
            regex::escape(&self.prefix),
            self.format.pattern(),
            SEQUENCE_WIDTH,
            regex::escape(&self.extension),
        );
        Regex::new(&pattern).map_err(Error::from)
    }

    /// Check whether `file_name` looks like a file this namer produced
    pub fn matches(&self, file_name: &str) -> Result<bool> {
        Ok(self.matcher()?.is_match(file_name))
    }
}
