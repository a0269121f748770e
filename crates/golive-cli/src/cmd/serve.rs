use anyhow::Context;
use golive_core::store::YamlEngagementStore;
use std::path::Path;

pub fn run(root: &Path, port: u16) -> anyhow::Result<()> {
    YamlEngagementStore::open(root).context("cannot serve predictions")?;

    let rt = tokio::runtime::Runtime::new()?;
    let root_buf = root.to_path_buf();
    rt.block_on(async move {
        let addr = format!("0.0.0.0:{port}");
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        golive_server::serve_on(root_buf, listener).await
    })
}
