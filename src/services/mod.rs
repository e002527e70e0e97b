pub mod forecast_plot;
pub mod forecast_report;
pub mod histogram;
pub mod history_loader;
pub mod percentiles;
pub mod sampler;
pub mod settings_yaml;
pub mod simulation;
pub mod simulation_config;
pub mod tracing_setup;
