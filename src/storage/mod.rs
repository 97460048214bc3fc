use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

pub mod local;

/// ストレージ内のアイテム
#[derive(Debug, Clone)]
pub struct StorageItem {
    /// アイテムの識別子（ローカルならパス）
    pub id: String,
    /// ファイル名
    pub name: String,
    /// サイズ（バイト）
    pub size: u64,
    pub is_directory: bool,
    pub extension: Option<String>,
}

/// パーティションファイルを読み書きするストレージバックエンド
#[automock]
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// 直下のアイテムをリストする（再帰しない）
    async fn list_items(&self, prefix: &str) -> Result<Vec<StorageItem>>;

    /// アイテムのデータを読み込む
    async fn read_item(&self, id: &str) -> Result<Vec<u8>>;

    /// アイテムを書き込む（既存なら上書き）
    async fn write_item(&self, id: &str, data: Vec<u8>) -> Result<()>;

    /// アイテムが存在するかチェック
    async fn exists(&self, id: &str) -> Result<bool>;

    /// アイテムを削除する
    async fn delete_item(&self, id: &str) -> Result<()>;

    /// CSVパーティションかどうかを判定
    fn is_partition_file(&self, item: &StorageItem) -> bool {
        if item.is_directory {
            return false;
        }

        item.extension
            .as_deref()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
    }
}

#[async_trait]
impl StorageBackend for Box<dyn StorageBackend> {
    async fn list_items(&self, prefix: &str) -> Result<Vec<StorageItem>> {
        self.as_ref().list_items(prefix).await
    }

    async fn read_item(&self, id: &str) -> Result<Vec<u8>> {
        self.as_ref().read_item(id).await
    }

    async fn write_item(&self, id: &str, data: Vec<u8>) -> Result<()> {
        self.as_ref().write_item(id, data).await
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        self.as_ref().exists(id).await
    }

    async fn delete_item(&self, id: &str) -> Result<()> {
        self.as_ref().delete_item(id).await
    }

    fn is_partition_file(&self, item: &StorageItem) -> bool {
        self.as_ref().is_partition_file(item)
    }
}
