// ReportProjector - レンダラー向けのデータ契約

pub mod projector;

pub use projector::{ReportProjector, ReportTables, YearRow};
