//! Last-update stamp at the top of the status file.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Asia::Seoul;
use log::info;
use std::fmt::Display;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Stamp line for the given time, including the trailing newline.
pub fn stamp_line<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format!("## 🕒 마지막 업데이트: {} (KST)\n", now.format(TIME_FORMAT))
}

/// Replace the first line of `path` with a stamp for the current Seoul time.
pub fn stamp_status_file(path: &Path) -> Result<()> {
    stamp_status_file_at(path, &Utc::now().with_timezone(&Seoul))
}

/// Replace the first line of `path` with a stamp for `now`.
///
/// All other lines are kept byte-for-byte. An empty file ends up holding
/// only the stamp line.
pub fn stamp_status_file_at<Tz: TimeZone>(path: &Path, now: &DateTime<Tz>) -> Result<()>
where
    Tz::Offset: Display,
{
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    let mut stamped = stamp_line(now);
    stamped.extend(content.split_inclusive('\n').skip(1));

    fs::write(path, stamped).map_err(|e| Error::io(path, e))?;
    info!("[Stamp] Updated {}", path.display());
    Ok(())
}
