use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` with `data` via a sibling tempfile, so a reader never
/// sees a half-written engagement.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent)?;
            parent
        }
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&data)?)
}

pub fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let data = serde_yaml::to_string(value)?;
    atomic_write(path, data.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/acme.yaml");
        atomic_write(&path, b"id: acme").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "id: acme");
    }

    #[test]
    fn yaml_round_trip_through_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        let mut cfg = Config::default();
        cfg.forecast.at_risk_window_days = 21;
        write_yaml(&path, &cfg).unwrap();
        let back: Config = read_yaml(&path).unwrap();
        assert_eq!(back, cfg);
    }
}
