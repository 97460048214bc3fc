// RecordParser - 生の行を検証済みレコードへ変換する

pub mod normalize;
pub mod record_parser;

pub use normalize::{normalize_cell, strip_bom};
pub use record_parser::{ParsedTable, RawRecord, RecordParser, PUBLISHED_AT_FORMAT};
