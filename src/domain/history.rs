use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HistoryError {
    #[error("cycle time at row {index} is not a finite non-negative number: {value}")]
    InvalidValue { index: usize, value: f64 },
}

/// Observed cycle times in their original order.
///
/// Every value is finite and non-negative. An empty sample can be built so
/// that the engine is the one rejecting it as insufficient data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistorySample {
    values: Vec<f64>,
}

impl HistorySample {
    pub fn new(values: Vec<f64>) -> Result<Self, HistoryError> {
        if let Some((index, value)) = values
            .iter()
            .copied()
            .enumerate()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(HistoryError::InvalidValue { index, value });
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The most recent `last` values, or the whole sample when it is not
    /// longer than that. A window of zero keeps the whole sample.
    pub fn window(&self, last: Option<usize>) -> &[f64] {
        match last {
            Some(last) if last > 0 && last < self.values.len() => {
                &self.values[self.values.len() - last..]
            }
            _ => &self.values,
        }
    }
}
