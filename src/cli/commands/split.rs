use crate::storage::local::LocalStorageBackend;
use crate::App;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Execute split command
pub async fn execute_split(source: PathBuf, out_dir: PathBuf) -> Result<()> {
    println!("✂️  Splitting {} by publication year", source.display());

    let app = App::new(Arc::new(LocalStorageBackend::new()));
    let written = app
        .split(&source.to_string_lossy(), &out_dir.to_string_lossy())
        .await?;

    for partition in &written {
        println!("   - {}: {} rows → {}", partition.year, partition.rows, partition.id);
    }
    println!("✅ {} partitions written to {}", written.len(), out_dir.display());
    Ok(())
}
