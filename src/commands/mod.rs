pub mod base_commands;
pub mod completions_cmd;
pub mod explain_cmd;
pub mod forecast_cmd;
pub mod report_format;
