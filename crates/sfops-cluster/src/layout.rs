use crate::error::ClusterResult;
use chrono::{DateTime, Local, TimeZone};
use std::path::{Path, PathBuf};
use tracing::debug;

/// `strftime` pattern used for per-job log file names.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y_%m_%d-%H:%M:%S";

/// Directory holding one timestamped log file per submitted job.
///
/// Default layout is `<project>/logs/<YYYY_MM_DD-HH:MM:SS>.log`
#[derive(Debug, Clone)]
pub struct JobLogDir {
    root: PathBuf,
}

impl JobLogDir {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn log_path_at<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> PathBuf
    where
        Tz::Offset: std::fmt::Display,
    {
        self.root.join(format!("{}.log", at.format(LOG_TIMESTAMP_FORMAT)))
    }

    /// Log path for a job submitted now, in local time.
    #[must_use]
    pub fn new_log_path(&self) -> PathBuf {
        self.log_path_at(&Local::now())
    }

    pub fn ensure(&self) -> ClusterResult<()> {
        debug!(path = %self.root.display(), "ensuring job log directory");
        std::fs::create_dir_all(&self.root)?;
        Ok(())
    }
}
