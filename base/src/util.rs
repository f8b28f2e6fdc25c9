use eyre::{eyre, Result};
use std::fs::create_dir_all;
use std::io;
use std::path::Path;
use time::OffsetDateTime;

pub fn path_to_str(path: &Path) -> Result<String> {
    Ok(String::from(path.to_str().ok_or_else(|| {
        eyre!("Could not convert path to string: {:?}", path)
    })?))
}

pub fn dedup<T: Ord>(mut vec: Vec<T>) -> Vec<T> {
    vec.sort_unstable();
    vec.dedup();
    vec
}

pub fn mkdirp<P: AsRef<Path>>(path: P) -> io::Result<()> {
    if let Err(e) = create_dir_all(path) {
        if e.kind() != io::ErrorKind::AlreadyExists {
            return Err(e);
        }
    }
    Ok(())
}

/// Timestamps are persisted in UTC with whole-second precision so that
/// backends storing them as text still compare them chronologically.
pub fn whole_seconds(time: OffsetDateTime) -> OffsetDateTime {
    let utc = time.to_offset(time::UtcOffset::UTC);
    utc.replace_nanosecond(0).unwrap_or(utc)
}

pub fn utc_now() -> OffsetDateTime {
    whole_seconds(OffsetDateTime::now_utc())
}
