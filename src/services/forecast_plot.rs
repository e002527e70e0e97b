use plotters::prelude::*;
use thiserror::Error;

use crate::domain::forecast::ForecastTable;

#[derive(Error, Debug)]
pub enum ForecastPlotError {
    #[error("failed to render forecast plot: {0}")]
    Plot(String),
}

/// Draws one curve per requested percentile over backlog position.
pub fn write_forecast_plot_png(
    output_path: &str,
    table: &ForecastTable,
) -> Result<(), ForecastPlotError> {
    if table.rows.is_empty() {
        return Ok(());
    }

    let max_position = table.rows.len() as i32;
    let max_y = y_axis_limit(table);

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ForecastPlotError::Plot(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(
            "Forecasted Delivery Time per Backlog Position",
            ("sans-serif", 30),
        )
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(0..(max_position + 1), 0.0..max_y)
        .map_err(|e| ForecastPlotError::Plot(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Backlog Position")
        .y_desc("Days")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .draw()
        .map_err(|e| ForecastPlotError::Plot(e.to_string()))?;

    for (index, percentile) in table.percentiles.iter().enumerate() {
        let color = Palette99::pick(index).to_rgba();
        let points = (1_i32..).zip(table.curve(*percentile));
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))
            .map_err(|e| ForecastPlotError::Plot(e.to_string()))?
            .label(format!("P{percentile}"))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| ForecastPlotError::Plot(e.to_string()))?;

    root.present()
        .map_err(|e| ForecastPlotError::Plot(e.to_string()))?;
    Ok(())
}

fn y_axis_limit(table: &ForecastTable) -> f64 {
    let max_value = table
        .rows
        .iter()
        .flat_map(|row| row.values.iter().map(|entry| entry.value))
        .fold(0.0_f64, f64::max);
    if max_value > 0.0 { max_value * 1.05 } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forecast::{ForecastRow, PercentileValue};

    fn table(values: &[f64]) -> ForecastTable {
        ForecastTable {
            percentiles: vec![50],
            rows: values
                .iter()
                .enumerate()
                .map(|(index, value)| ForecastRow {
                    position: index + 1,
                    values: vec![PercentileValue {
                        percentile: 50,
                        value: *value,
                    }],
                })
                .collect(),
        }
    }

    #[test]
    fn y_axis_limit_leaves_headroom_above_the_largest_value() {
        assert!((y_axis_limit(&table(&[2.0, 20.0, 10.0])) - 21.0).abs() < 1e-9);
    }

    #[test]
    fn y_axis_limit_has_a_floor_for_all_zero_tables() {
        assert_eq!(y_axis_limit(&table(&[0.0, 0.0])), 1.0);
    }

    #[test]
    fn write_forecast_plot_png_skips_empty_tables() {
        assert!(write_forecast_plot_png("unused-forecast.png", &table(&[])).is_ok());
    }
}
