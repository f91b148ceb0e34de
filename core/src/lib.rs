pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod timestamp;
pub mod usecase;

pub use error::{AnalyticsError, ParseError, TimestampError};
pub use model::record::{DailyEntry, SalesRecord};
pub use repository::{FileRecordSource, RecordSource, SalesPeriod};
pub use input::parse_record_line;
pub use timestamp::TimestampKeys;
pub use service::analytics_service::AnalyticsService;
pub use service::dto::{DayTotal, PeakHour, ProductTotal, Report, StaffVolume};
pub use usecase::period_report::{LoadFailure, PeriodReport, PeriodReportUseCase};
