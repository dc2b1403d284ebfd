pub mod csvfile;
pub mod spec;
pub mod table;
pub mod workbook;

pub use spec::{ColumnType, FeedKind, FeedSpec};
pub use table::{Cell, Record, SheetTable};
