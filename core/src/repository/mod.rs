pub mod file;
pub mod period;
pub mod traits;

// Re-export
pub use file::FileRecordSource;
pub use period::SalesPeriod;
pub use traits::RecordSource;
