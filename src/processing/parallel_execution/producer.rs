// Producer - パーティション配信

use crate::core::error::VacancyResult;
use tokio::sync::mpsc;

/// 作業単位: (パーティション番号, 識別子)
pub type WorkItem = (usize, String);

/// Producer: パーティションを番号付きで配信
pub fn spawn_producer(
    partitions: Vec<String>,
    work_tx: mpsc::Sender<WorkItem>,
) -> tokio::task::JoinHandle<VacancyResult<()>> {
    tokio::spawn(async move {
        for item in partitions.into_iter().enumerate() {
            if work_tx.send(item).await.is_err() {
                // 受信側が閉じた（中断された）場合は静かに終了
                break;
            }
        }
        Ok(())
    })
}
