//! JSON snapshot persistence.
//!
//! The snapshot is an ordered JSON array of history records, oldest first.
//! It is rewritten wholesale: serialized to a sibling temp file, then renamed
//! over the previous snapshot.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use sentiment_types::HistoryRecord;
use tracing::{debug, error, info};

use crate::error::HistoryError;

/// Read the snapshot at `path`.
///
/// A missing file is an empty history, not an error.
pub fn read_snapshot(path: &Path) -> Result<Vec<HistoryRecord>, HistoryError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let bytes = fs::read(path).map_err(|e| HistoryError::io(path, e))?;
    let records: Vec<HistoryRecord> = serde_json::from_slice(&bytes)?;
    Ok(records)
}

/// Load the newest `capacity` records from `path`.
///
/// Never fails: an unreadable or unparseable snapshot is logged and treated
/// as empty so startup can continue.
pub fn load_or_empty(path: &Path, capacity: usize) -> VecDeque<HistoryRecord> {
    match read_snapshot(path) {
        Ok(mut records) => {
            if records.len() > capacity {
                let excess = records.len() - capacity;
                records.drain(..excess);
                info!(dropped = excess, "Trimmed history snapshot to capacity");
            }
            info!(records = records.len(), "Loaded history records from {:?}", path);
            records.into()
        }
        Err(e) => {
            error!("Failed to load history from {:?}: {}", path, e);
            VecDeque::new()
        }
    }
}

/// Rewrite the snapshot at `path` with `records`.
pub fn write_snapshot<'a, I>(path: &Path, records: I) -> Result<(), HistoryError>
where
    I: IntoIterator<Item = &'a HistoryRecord>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| HistoryError::io(parent, e))?;
    }

    let records: Vec<&HistoryRecord> = records.into_iter().collect();
    let bytes = serde_json::to_vec_pretty(&records)?;

    let tmp_path = temp_path(path);
    fs::write(&tmp_path, &bytes).map_err(|e| HistoryError::io(&tmp_path, e))?;
    fs::rename(&tmp_path, path).map_err(|e| HistoryError::io(path, e))?;

    debug!(records = records.len(), "Wrote history snapshot to {:?}", path);
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
