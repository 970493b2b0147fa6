//! Session files: the stream state saved as JSON between invocations.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use chance_core::StreamState;
use tracing::debug;

/// Reads the saved state. A missing file is not an error.
pub fn load(path: &Path) -> Result<Option<StreamState>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to read session file: {}", path.display()));
        }
    };

    let state: StreamState = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse session file: {}", path.display()))?;
    debug!(path = %path.display(), %state, "loaded session");
    Ok(Some(state))
}

/// Writes `state`, creating parent directories as needed.
pub fn save(path: &Path, state: StreamState) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(&state)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write session file: {}", path.display()))?;
    debug!(path = %path.display(), %state, "saved session");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        assert!(load(&dir.path().join("absent.json")).unwrap().is_none());
    }

    #[test]
    fn saved_state_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");

        save(&path, StreamState::new(42, 17)).unwrap();

        assert_eq!(load(&path).unwrap(), Some(StreamState::new(42, 17)));
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{\"seed\": 1, \"position\": -4}").unwrap();

        let err = load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse session file"));
    }
}
