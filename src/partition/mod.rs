// 年別パーティションファイルの作成

pub mod splitter;

pub use splitter::{partition_file_name, SplitPartition, YearSplitter};
