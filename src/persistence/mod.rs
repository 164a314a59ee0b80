//! JSON file persistence shared by tuning, settings and the leaderboard
//!
//! Writes go to a sibling `.tmp` file first and are renamed into place so a
//! crash mid-write never leaves a truncated file behind.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ConfigError;

/// Read and decode a JSON file
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode a value as pretty JSON and write it atomically
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("tmp");
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    fs::write(&tmp, json).map_err(write_err)?;
    fs::rename(&tmp, path).map_err(write_err)
}

/// Load a JSON file, falling back to `T::default()` when it is missing or malformed
pub fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path, what: &str) -> T {
    match load_json(path) {
        Ok(value) => {
            log::info!("Loaded {} from {}", what, path.display());
            value
        }
        Err(ConfigError::Read { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No {} at {}, using defaults", what, path.display());
            T::default()
        }
        Err(e) => {
            log::warn!("{}; using default {}", e, what);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        value: u32,
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("voxel_vault_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        let loaded: Sample = load_json_or_default(&path, "sample");
        assert_eq!(loaded, Sample::default());
    }

    #[test]
    fn test_malformed_file_is_default() {
        let path = temp_path("malformed");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_json::<Sample>(&path),
            Err(ConfigError::Parse { .. })
        ));
        let loaded: Sample = load_json_or_default(&path, "sample");
        assert_eq!(loaded, Sample::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("saved");
        save_json(&path, &Sample { value: 7 }).unwrap();
        let loaded: Sample = load_json(&path).unwrap();
        assert_eq!(loaded.value, 7);
        let _ = fs::remove_file(&path);
    }
}
