pub mod entry;
pub mod report_row;
pub mod schema;

pub use entry::{EntryForm, LogEntry};
pub use report_row::ReportRow;
pub use schema::SchemaVersion;
