// 並列実行機能
// Producer-Consumer パターンによるパーティション集計とオーケストレーション

pub mod collector;
pub mod consumer;
pub mod engine;
pub mod pipeline;
pub mod producer;

pub use collector::{spawn_result_collector, CollectedPartials};
pub use consumer::{spawn_consumers, spawn_single_consumer, WorkerContext};
pub use engine::PartitionScheduler;
pub use pipeline::PartitionPipeline;
pub use producer::{spawn_producer, WorkItem};
