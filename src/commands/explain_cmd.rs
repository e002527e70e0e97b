use std::process::ExitCode;

pub const EXPLANATION: &str = "\
Monte Carlo Simulation for Delivery Forecasting

What it's for:
Predicts how long it will take to deliver each item in a backlog, based on
historical cycle times.

How it works:
1. Load past cycle times from a CSV or YAML file.
2. Choose how many backlog positions to forecast (N).
3. For each trial:
   - Pick N cycle times at random from the history (with replacement).
   - Sum them cumulatively to simulate sequential delivery.
     For example:
         Sample:     [6, 8, 7, 5, 9]
         Cumulative: [6, 14, 21, 26, 35]
4. Repeat this 10,000 to 30,000 times.
5. For each backlog position (1 to N), compute percentiles:
   - P50: median delivery time
   - P80: 80% confidence the item is done by this time
   - P90: an even safer forecast

How to read the results:
- Position 1, P80 = 7.3: 80% chance it is done within 7.3 days
- Position 5, P90 = 35.1: 90% chance the first 5 items are done within 35.1 days
";

pub fn explain_command() -> ExitCode {
    println!("{EXPLANATION}");
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explanation_contains_worked_example() {
        assert!(EXPLANATION.contains("Sample:     [6, 8, 7, 5, 9]"));
        assert!(EXPLANATION.contains("Cumulative: [6, 14, 21, 26, 35]"));
    }
}
