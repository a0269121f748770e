use crate::error::{GoliveError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const GOLIVE_DIR: &str = ".golive";
pub const ENGAGEMENTS_DIR: &str = ".golive/engagements";
pub const CONFIG_FILE: &str = ".golive/config.yaml";

pub const ENGAGEMENT_EXT: &str = "yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn golive_dir(root: &Path) -> PathBuf {
    root.join(GOLIVE_DIR)
}

pub fn engagements_dir(root: &Path) -> PathBuf {
    root.join(ENGAGEMENTS_DIR)
}

pub fn engagement_file(root: &Path, id: &str) -> PathBuf {
    engagements_dir(root).join(format!("{id}.{ENGAGEMENT_EXT}"))
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// Id validation
// ---------------------------------------------------------------------------

static ID_RE: OnceLock<Regex> = OnceLock::new();

fn id_re() -> &'static Regex {
    ID_RE.get_or_init(|| {
        Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").expect("static id pattern")
    })
}

/// Engagement ids double as file names, so they are restricted to slugs.
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() || id.len() > 64 || !id_re().is_match(id) {
        return Err(GoliveError::InvalidId(id.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
