pub mod split;
pub mod stats;
pub mod table;

pub use split::*;
pub use stats::*;
pub use table::*;
