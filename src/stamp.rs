//! Month-year keys for output names.
//!
//! One run per month is the expected cadence, so artifacts are keyed by
//! `MM-YY` and a rerun in the same month overwrites them.

use anyhow::{Context, Result};
use time::macros::format_description;
use time::OffsetDateTime;

pub const README_FILE_NAME: &str = "README-Reinstall.md";
pub const MANIFEST_FILE_NAME: &str = "MANIFEST.md";
pub const DIRECTORY_MAP_FILE_NAME: &str = "directory_map.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStamp {
    month_key: String,
    month_title: String,
}

impl RunStamp {
    /// Stamp for the current local month (UTC if the offset is unknown).
    pub fn now() -> Result<Self> {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        Self::from_datetime(now)
    }

    pub fn from_datetime(at: OffsetDateTime) -> Result<Self> {
        let month_key = at
            .format(format_description!("[month]-[year repr:last_two]"))
            .context("formatting month key")?;
        let month_title = at
            .format(format_description!("[month repr:long] [year]"))
            .context("formatting report title date")?;
        Ok(Self {
            month_key,
            month_title,
        })
    }

    /// `MM-YY`, e.g. `10-26`.
    pub fn month_key(&self) -> &str {
        &self.month_key
    }

    /// Long form for titles, e.g. `October 2026`.
    pub fn month_title(&self) -> &str {
        &self.month_title
    }

    pub fn report_file_name(&self) -> String {
        format!("installed_apps-{}.txt", self.month_key)
    }

    pub fn brewfile_name(&self) -> String {
        format!("Brewfile-{}", self.month_key)
    }

    pub fn snapshot_dir_name(&self) -> String {
        format!("snapshot-{}", self.month_key)
    }
}
