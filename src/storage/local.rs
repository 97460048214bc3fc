use super::{StorageBackend, StorageItem};
use crate::file_scanner::FileScanner;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// ローカルファイルシステム用のストレージバックエンド
#[derive(Clone, Debug)]
pub struct LocalStorageBackend;

impl Default for LocalStorageBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorageBackend {
    pub fn new() -> Self {
        Self
    }

    fn path_to_storage_item(path: &Path) -> Result<StorageItem> {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("メタデータ取得失敗: {}", path.display()))?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();

        let extension = if metadata.is_file() {
            path.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_string())
        } else {
            None
        };

        Ok(StorageItem {
            id: path.to_string_lossy().to_string(),
            name,
            size: metadata.len(),
            is_directory: metadata.is_dir(),
            extension,
        })
    }
}

#[async_trait]
impl StorageBackend for LocalStorageBackend {
    async fn list_items(&self, prefix: &str) -> Result<Vec<StorageItem>> {
        let root = PathBuf::from(prefix);

        // walkdir は同期APIなのでブロッキングスレッドで走査する
        let paths = tokio::task::spawn_blocking(move || FileScanner::scan_entries(&root))
            .await
            .context("ディレクトリ走査タスクの失敗")??;

        // 読めないエントリを黙って落とすとパーティションが欠ける
        paths
            .iter()
            .map(|path| Self::path_to_storage_item(path))
            .collect()
    }

    async fn read_item(&self, id: &str) -> Result<Vec<u8>> {
        tokio::fs::read(Path::new(id))
            .await
            .with_context(|| format!("ファイル読み込み失敗: {id}"))
    }

    async fn write_item(&self, id: &str, data: Vec<u8>) -> Result<()> {
        let path = Path::new(id);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("ディレクトリ作成失敗: {}", parent.display()))?;
        }
        tokio::fs::write(path, data)
            .await
            .with_context(|| format!("ファイル書き込み失敗: {id}"))
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        Ok(tokio::fs::try_exists(Path::new(id)).await.unwrap_or(false))
    }

    async fn delete_item(&self, id: &str) -> Result<()> {
        let path = Path::new(id);
        if path.is_file() {
            tokio::fs::remove_file(path)
                .await
                .with_context(|| format!("ファイル削除失敗: {id}"))?;
        } else {
            anyhow::bail!("ディレクトリは delete_item で削除できません: {id}");
        }
        Ok(())
    }
}
