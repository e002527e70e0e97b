use crate::services::forecast_report::{ForecastPercentile, ForecastReport};

pub fn format_forecast_report(report: &ForecastReport) -> String {
    let mut lines = Vec::new();
    lines.push("Forecast Report".to_string());
    lines.push(format!("Data source: {}", report.data_source));
    if let Some(start_date) = &report.start_date {
        lines.push(format!("Start date: {start_date}"));
    }
    lines.push(format!("Trials: {}", report.trials));
    lines.push(format!("History used: {}", report.history_used));
    lines.push(format!("Backlog size: {}", report.backlog_size));
    lines.push(String::new());

    let labels: Vec<String> = report
        .rows
        .first()
        .map(|row| {
            row.percentiles
                .iter()
                .map(|entry| format!("P{}", entry.percentile))
                .collect()
        })
        .unwrap_or_default();

    let mut header = vec!["Position".to_string()];
    header.extend(labels.iter().cloned());
    lines.push(header.join(" | "));
    let separator: Vec<String> = header.iter().map(|label| "-".repeat(label.len())).collect();
    lines.push(separator.join("|"));

    for row in &report.rows {
        let mut cells = vec![row.position.to_string()];
        cells.extend(row.percentiles.iter().map(format_cell));
        lines.push(cells.join(" | "));
    }

    lines.join("\n")
}

fn format_cell(entry: &ForecastPercentile) -> String {
    match &entry.date {
        Some(date) => format!("{:.2} ({date})", entry.days),
        None => format!("{:.2}", entry.days),
    }
}
