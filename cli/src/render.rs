use monieshop_core::{LoadFailure, PeriodReport, Report};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Table,
    Json,
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Date")]
    date: String,
}

#[derive(Tabled)]
struct StaffRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Staff ID")]
    staff_id: String,
    #[tabled(rename = "Volume")]
    volume: u64,
}

pub fn render(result: &PeriodReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(&result.report)),
        OutputFormat::Table => Ok(render_table(&result.report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
    }
}

pub fn format_hour(hour: u32) -> String {
    format!("{:02}:00", hour)
}

pub fn render_text(report: &Report) -> String {
    let mut out = format!(
        "\nAnalytics Report:\n\
         - Highest sales volume in a day: {} on {}\n\
         - Highest sales value in a day: {} on {}\n\
         - Most sold product ID by volume: {}\n\
         - Highest hour of the day by average transaction volume: {}\n\
         \nHighest sales staff ID for each month:\n",
        report.highest_volume_day.total,
        report.highest_volume_day.date,
        report.highest_value_day.total,
        report.highest_value_day.date,
        report.most_sold_product_id(),
        format_hour(report.peak_hour.hour),
    );

    for (month, top) in &report.top_staff_by_month {
        out.push_str(&format!("- {}: Staff ID: {} (Volume: {})\n", month, top.staff_id, top.volume));
    }

    out
}

/// One line per day that could not be loaded.
pub fn render_failures(failures: &[LoadFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("Error reading file for date: {} - {}\n", f.date, f.reason))
        .collect()
}

pub fn render_table(report: &Report) -> String {
    let product_total = report
        .most_sold_product
        .as_ref()
        .map(|p| format!("{} ({})", p.product_id, p.quantity))
        .unwrap_or_else(|| "None".to_string());

    let metrics = vec![
        MetricRow {
            metric: "Highest sales volume",
            value: report.highest_volume_day.total.to_string(),
            date: dash_if_empty(&report.highest_volume_day.date),
        },
        MetricRow {
            metric: "Highest sales value",
            value: report.highest_value_day.total.to_string(),
            date: dash_if_empty(&report.highest_value_day.date),
        },
        MetricRow {
            metric: "Most sold product",
            value: product_total,
            date: "-".to_string(),
        },
        MetricRow {
            metric: "Peak hour",
            value: format!("{} ({} txns)", format_hour(report.peak_hour.hour), report.peak_hour.transactions),
            date: "-".to_string(),
        },
        MetricRow {
            metric: "Days processed",
            value: format!("{} ({} missing)", report.days_processed, report.days_missing),
            date: "-".to_string(),
        },
    ];

    let staff: Vec<StaffRow> = report
        .top_staff_by_month
        .iter()
        .map(|(month, top)| StaffRow {
            month: month.clone(),
            staff_id: top.staff_id.clone(),
            volume: top.volume,
        })
        .collect();

    let mut metrics_table = Table::new(metrics);
    metrics_table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));

    let mut staff_table = Table::new(staff);
    staff_table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));

    format!("{}\n\nTop staff by month\n{}", metrics_table, staff_table)
}

fn dash_if_empty(s: &str) -> String {
    if s.is_empty() { "-".to_string() } else { s.to_string() }
}
