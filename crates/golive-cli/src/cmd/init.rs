use anyhow::Context;
use golive_core::{paths, store::YamlEngagementStore};
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    let existed = paths::golive_dir(root).is_dir();
    YamlEngagementStore::init(root).context("failed to initialize .golive/")?;

    if existed {
        println!("Already initialized: {}", paths::golive_dir(root).display());
    } else {
        println!("Initialized {}", paths::golive_dir(root).display());
        println!("Add engagements with: golive engagement add <id> --name <name> --company <company>");
    }
    Ok(())
}
