// 表形式の問い合わせ（フィルタ・ソート・範囲・列）

pub mod row;
pub mod table_query;

pub use row::{format_row, truncate_cell, MAX_CELL_CHARS};
pub use table_query::{TableQuery, TableView};
