//! Compression of rotated log files.
//!
//! The daily roller writes `<prefix>.<YYYY-MM-DD>.log` and never touches a
//! file again once its day is over. Every such file dated before the current
//! UTC day is gzipped to `<name>.gz` and the plain file is removed.

use chrono::{NaiveDate, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::TelemetryResult;
use crate::logging::LoggingConfig;

const LOG_SUFFIX: &str = "log";
const ARCHIVE_EXTENSION: &str = "gz";

/// Date of a rotated file named `<prefix>.<YYYY-MM-DD>.log`.
fn rotated_date(file_name: &str, prefix: &str) -> Option<NaiveDate> {
    let date = file_name
        .strip_prefix(prefix)?
        .strip_prefix('.')?
        .strip_suffix(LOG_SUFFIX)?
        .strip_suffix('.')?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

fn gzip_file(source: &Path) -> io::Result<PathBuf> {
    let mut target = source.as_os_str().to_owned();
    target.push(".");
    target.push(ARCHIVE_EXTENSION);
    let target = PathBuf::from(target);

    let mut reader = BufReader::new(File::open(source)?);
    let mut encoder = GzEncoder::new(BufWriter::new(File::create(&target)?), Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?.into_inner().map_err(|e| e.into_error())?.sync_all()?;

    fs::remove_file(source)?;
    Ok(target)
}

/// Gzip every rotated log in `directory` dated before `today`.
///
/// A missing directory is not an error. The file for `today` is left alone
/// since the roller is still appending to it.
///
/// # Returns
/// Number of files compressed.
pub fn compress_rotated_logs(directory: &Path, prefix: &str, today: NaiveDate) -> TelemetryResult<usize> {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };

    let mut compressed = 0;
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let Some(date) = name.to_str().and_then(|n| rotated_date(n, prefix)) else {
            continue;
        };
        if date >= today || !entry.file_type()?.is_file() {
            continue;
        }

        let archive = gzip_file(&entry.path())?;
        debug!(archive = %archive.display(), "Compressed rotated log");
        compressed += 1;
    }
    Ok(compressed)
}

/// Compresses rotated logs once per UTC day.
#[derive(Debug, Clone)]
pub struct LogArchiver {
    directory: PathBuf,
    prefix: String,
    last_run: Option<NaiveDate>,
}

impl LogArchiver {
    pub fn new(config: &LoggingConfig) -> Self {
        Self {
            directory: config.directory.clone(),
            prefix: config.file_prefix.clone(),
            last_run: None,
        }
    }

    /// Compress outstanding files if the day changed since the last run.
    ///
    /// Failures are logged and retried on the next call.
    pub fn on_day(&mut self, today: NaiveDate) -> usize {
        if self.last_run == Some(today) {
            return 0;
        }
        match compress_rotated_logs(&self.directory, &self.prefix, today) {
            Ok(count) => {
                self.last_run = Some(today);
                count
            }
            Err(e) => {
                warn!(directory = %self.directory.display(), error = %e, "Failed to compress rotated logs");
                0
            }
        }
    }

    /// `on_day` for the current UTC date (the roller's rotation clock).
    pub fn tick(&mut self) -> usize {
        self.on_day(Utc::now().date_naive())
    }
}
