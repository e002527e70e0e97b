use plotters::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistogramError {
    #[error("failed to render histogram: {0}")]
    Render(String),
}

/// Plots the simulated cumulative times of one backlog position.
pub fn write_histogram_png(
    output_path: &str,
    position: usize,
    results: &[f64],
) -> Result<(), HistogramError> {
    if results.is_empty() {
        return Ok(());
    }

    let bins = histogram_bins(results);
    let max_count = bins.counts.iter().copied().max().unwrap_or(1);
    let bin_count = i32::try_from(bins.counts.len()).unwrap_or(i32::MAX);
    let min_bucket = -1;
    let max_bucket = bin_count.saturating_add(1);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let caption = format!("Simulated Delivery Time for Position {position}");
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(caption, ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(min_bucket..max_bucket, 0..(max_count + 1))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Days")
        .y_desc("Frequency")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_label_formatter(&|bucket| format!("{:.2}", bins.lower_edge(*bucket)))
        .draw()
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let bar_color = RGBColor(30, 122, 204);
    let bar_style = ShapeStyle::from(&bar_color).filled();
    chart
        .draw_series((0..bin_count).zip(bins.counts.iter()).map(|(bucket, count)| {
            Rectangle::new([(bucket, 0), (bucket + 1, *count)], bar_style)
        }))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| HistogramError::Render(e.to_string()))?;
    Ok(())
}

struct HistogramBins {
    min_value: f64,
    bin_width: f64,
    counts: Vec<usize>,
}

impl HistogramBins {
    fn lower_edge(&self, bucket: i32) -> f64 {
        self.min_value + f64::from(bucket) * self.bin_width
    }
}

/// Square-root choice of bins, counted from the smallest value. A constant
/// sample gets a single unit-wide bin.
fn histogram_bins(results: &[f64]) -> HistogramBins {
    let min_value = results.iter().copied().fold(f64::INFINITY, f64::min);
    let max_value = results.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max_value - min_value;
    let bin_count = if range > 0.0 {
        ((results.len() as f64).sqrt().ceil() as usize).max(1)
    } else {
        1
    };
    let bin_width = if range > 0.0 {
        range / bin_count as f64
    } else {
        1.0
    };

    let mut counts = vec![0usize; bin_count];
    let last_bin = bin_count - 1;
    for value in results {
        let offset = ((*value - min_value) / bin_width).floor();
        let bucket = if offset.is_finite() && offset > 0.0 {
            (offset as usize).min(last_bin)
        } else {
            0
        };
        counts[bucket] += 1;
    }
    HistogramBins {
        min_value,
        bin_width,
        counts,
    }
}
