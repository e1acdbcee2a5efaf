//! Save files: a versioned envelope around the core snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use dr_core::GameSession;

pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub seed: u64,
    pub state: serde_json::Value,
}

/// Write the session's state to `path`, replacing any previous save.
///
/// The file is written next to the target first and renamed into place,
/// so a crash never leaves a half-written save.
pub fn write(path: &Path, session: &GameSession) -> Result<(), String> {
    let blob = session.save().map_err(|e| e.to_string())?;
    let state: serde_json::Value = serde_json::from_str(&blob).map_err(|e| e.to_string())?;
    let file = SaveFile {
        version: SAVE_VERSION,
        saved_at: Utc::now(),
        seed: session.config().seed,
        state,
    };
    let json = serde_json::to_string_pretty(&file).map_err(|e| e.to_string())?;

    let tmp = temp_path(path);
    fs::write(&tmp, json).map_err(|e| format!("cannot write {}: {e}", tmp.display()))?;
    fs::rename(&tmp, path).map_err(|e| format!("cannot replace {}: {e}", path.display()))?;
    info!(path = %path.display(), "save written");
    Ok(())
}

/// Read the snapshot blob stored at `path`.
///
/// Anything that is not a save envelope is handed to the core as a raw
/// snapshot, which loads it as leniently as it can.
pub fn read(path: &Path) -> Result<String, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    match serde_json::from_str::<SaveFile>(&text) {
        Ok(file) => {
            if file.version != SAVE_VERSION {
                warn!(version = file.version, "save file version differs, loading anyway");
            }
            Ok(file.state.to_string())
        }
        Err(err) => {
            warn!(%err, "not a save envelope, loading as a raw snapshot");
            Ok(text)
        }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
