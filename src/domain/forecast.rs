use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PercentileValue {
    pub percentile: u32,
    pub value: f64,
}

/// Forecast for the first `position` backlog items.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ForecastRow {
    pub position: usize,
    pub values: Vec<PercentileValue>,
}

impl ForecastRow {
    pub fn value_for(&self, percentile: u32) -> Option<f64> {
        self.values
            .iter()
            .find(|entry| entry.percentile == percentile)
            .map(|entry| entry.value)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ForecastTable {
    pub percentiles: Vec<u32>,
    pub rows: Vec<ForecastRow>,
}

impl ForecastTable {
    /// Values of one percentile ordered by position, as plotted per curve.
    pub fn curve(&self, percentile: u32) -> Vec<f64> {
        self.rows
            .iter()
            .filter_map(|row| row.value_for(percentile))
            .collect()
    }
}
