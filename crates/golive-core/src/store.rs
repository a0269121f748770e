use crate::config::Config;
use crate::engagement::Engagement;
use crate::error::{GoliveError, Result};
use crate::portfolio::SkippedEngagement;
use crate::{io, paths};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// EngagementSource
// ---------------------------------------------------------------------------

/// Engagements read in one pass, plus the records that could not be decoded.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub engagements: Vec<Engagement>,
    pub rejected: Vec<SkippedEngagement>,
}

/// Supplies the immutable engagement snapshot the forecaster runs on.
///
/// An `Err` means the source itself is unavailable; per-record problems
/// belong in [`Snapshot::rejected`].
pub trait EngagementSource {
    fn snapshot(&self) -> Result<Snapshot>;
}

// ---------------------------------------------------------------------------
// YamlEngagementStore
// ---------------------------------------------------------------------------

/// One `<id>.yaml` file per engagement under `.golive/engagements/`.
#[derive(Debug, Clone)]
pub struct YamlEngagementStore {
    root: PathBuf,
}

impl YamlEngagementStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the `.golive/` tree and a default config. Idempotent.
    pub fn init(root: &Path) -> Result<Self> {
        std::fs::create_dir_all(paths::engagements_dir(root))?;
        if !paths::config_path(root).exists() {
            Config::default().save(root)?;
            tracing::debug!(root = %root.display(), "seeded default config");
        }
        Ok(Self::new(root))
    }

    /// Open an initialized project; `NotInitialized` when `.golive/` is absent.
    pub fn open(root: &Path) -> Result<Self> {
        if !paths::golive_dir(root).is_dir() {
            return Err(GoliveError::NotInitialized);
        }
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn load(&self, id: &str) -> Result<Engagement> {
        paths::validate_id(id)?;
        let file = paths::engagement_file(&self.root, id);
        if !file.exists() {
            return Err(GoliveError::EngagementNotFound(id.to_string()));
        }
        let engagement: Engagement = io::read_yaml(&file)?;
        if engagement.id != id {
            return Err(GoliveError::malformed(
                id,
                format!("file holds engagement '{}'", engagement.id),
            ));
        }
        Ok(engagement)
    }

    pub fn save(&self, engagement: &Engagement) -> Result<()> {
        paths::validate_id(&engagement.id)?;
        let file = paths::engagement_file(&self.root, &engagement.id);
        io::write_yaml(&file, engagement)
    }

    pub fn create(&self, engagement: &Engagement) -> Result<()> {
        paths::validate_id(&engagement.id)?;
        if paths::engagement_file(&self.root, &engagement.id).exists() {
            return Err(GoliveError::EngagementExists(engagement.id.clone()));
        }
        self.save(engagement)
    }

    /// Every decodable engagement, sorted by id.
    pub fn list(&self) -> Result<Vec<Engagement>> {
        Ok(self.snapshot()?.engagements)
    }
}

impl EngagementSource for YamlEngagementStore {
    fn snapshot(&self) -> Result<Snapshot> {
        let dir = paths::engagements_dir(&self.root);
        if !dir.exists() {
            return Ok(Snapshot::default());
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some(paths::ENGAGEMENT_EXT) {
                files.push(path);
            }
        }
        files.sort();

        let mut snapshot = Snapshot::default();
        for file in files {
            let stem = file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            match decode(&file, &stem) {
                Ok(engagement) => snapshot.engagements.push(engagement),
                Err(reason) => {
                    tracing::warn!(file = %file.display(), %reason, "unreadable engagement");
                    snapshot.rejected.push(SkippedEngagement {
                        engagement_id: stem,
                        reason,
                    });
                }
            }
        }
        snapshot.engagements.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(snapshot)
    }
}

/// Read one engagement file. The `Err` is the reason it is rejected.
fn decode(file: &Path, stem: &str) -> std::result::Result<Engagement, String> {
    let data = std::fs::read_to_string(file).map_err(|e| e.to_string())?;
    let engagement: Engagement = serde_yaml::from_str(&data).map_err(|e| e.to_string())?;
    if engagement.id != stem {
        return Err(format!(
            "id '{}' does not match file name '{stem}'",
            engagement.id
        ));
    }
    Ok(engagement)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engagement::PhaseRecord;
    use crate::types::PhaseStatus;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> YamlEngagementStore {
        YamlEngagementStore::init(dir.path()).unwrap()
    }

    #[test]
    fn init_is_idempotent() {
        let dir = TempDir::new().unwrap();
        store(&dir);
        store(&dir);
        assert!(dir.path().join(".golive/engagements").is_dir());
        assert!(dir.path().join(".golive/config.yaml").exists());
    }

    #[test]
    fn open_requires_init() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            YamlEngagementStore::open(dir.path()),
            Err(GoliveError::NotInitialized)
        ));
        store(&dir);
        YamlEngagementStore::open(dir.path()).unwrap();
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let mut e = Engagement::new("acme", "Acme DE", "Acme Ltd", "design");
        e.target_go_live_date = NaiveDate::from_ymd_opt(2026, 11, 30);
        e.phases
            .push(PhaseRecord::new("design", PhaseStatus::InProgress));
        s.save(&e).unwrap();
        assert_eq!(s.load("acme").unwrap(), e);
    }

    #[test]
    fn create_rejects_duplicates() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let e = Engagement::new("acme", "Acme DE", "Acme Ltd", "design");
        s.create(&e).unwrap();
        assert!(matches!(
            s.create(&e),
            Err(GoliveError::EngagementExists(_))
        ));
    }

    #[test]
    fn load_missing_and_invalid_ids() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        assert!(matches!(
            s.load("nobody"),
            Err(GoliveError::EngagementNotFound(_))
        ));
        assert!(matches!(s.load("../x"), Err(GoliveError::InvalidId(_))));
    }

    #[test]
    fn missing_directory_is_an_empty_snapshot() {
        let dir = TempDir::new().unwrap();
        let snapshot = YamlEngagementStore::new(dir.path()).snapshot().unwrap();
        assert!(snapshot.engagements.is_empty());
        assert!(snapshot.rejected.is_empty());
    }

    #[test]
    fn undecodable_file_is_rejected_not_fatal() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        s.save(&Engagement::new("good", "Good", "Good Co", "kickoff"))
            .unwrap();
        std::fs::write(
            paths::engagement_file(dir.path(), "bad-date"),
            "id: bad-date\nname: Bad\ncurrent_phase: kickoff\ntarget_go_live_date: next tuesday\n",
        )
        .unwrap();
        std::fs::write(dir.path().join(".golive/engagements/notes.txt"), "ignored").unwrap();

        let snapshot = s.snapshot().unwrap();
        assert_eq!(snapshot.engagements.len(), 1);
        assert_eq!(snapshot.rejected.len(), 1);
        assert_eq!(snapshot.rejected[0].engagement_id, "bad-date");
    }

    #[test]
    fn non_utf8_file_is_rejected_not_fatal() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        s.save(&Engagement::new("good", "Good", "Good Co", "kickoff"))
            .unwrap();
        std::fs::write(
            paths::engagement_file(dir.path(), "binary"),
            [0xff, 0xfe, b'i', b'd'],
        )
        .unwrap();

        let snapshot = s.snapshot().unwrap();
        assert_eq!(snapshot.engagements.len(), 1);
        assert_eq!(snapshot.engagements[0].id, "good");
        assert_eq!(snapshot.rejected.len(), 1);
        assert_eq!(snapshot.rejected[0].engagement_id, "binary");
    }

    #[test]
    fn id_must_match_file_name() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        s.save(&Engagement::new("acme", "Acme", "Acme Ltd", "design"))
            .unwrap();
        std::fs::copy(
            paths::engagement_file(dir.path(), "acme"),
            paths::engagement_file(dir.path(), "acme-copy"),
        )
        .unwrap();

        let snapshot = s.snapshot().unwrap();
        let ids: Vec<&str> = snapshot.engagements.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["acme"]);
        assert_eq!(snapshot.rejected.len(), 1);
        assert_eq!(snapshot.rejected[0].engagement_id, "acme-copy");
        assert!(snapshot.rejected[0].reason.contains("does not match"));
        assert!(matches!(
            s.load("acme-copy"),
            Err(GoliveError::MalformedEngagement { .. })
        ));
    }

    #[test]
    fn unreadable_directory_is_a_source_failure() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".golive")).unwrap();
        std::fs::write(dir.path().join(".golive/engagements"), "not a directory").unwrap();
        assert!(YamlEngagementStore::new(dir.path()).snapshot().is_err());
    }

    #[test]
    fn list_is_sorted_by_id() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        for id in ["zeta", "alpha", "mid"] {
            s.save(&Engagement::new(id, id, id, "handover")).unwrap();
        }
        let ids: Vec<String> = s.list().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["alpha", "mid", "zeta"]);
    }
}
