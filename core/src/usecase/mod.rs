pub mod period_report;
