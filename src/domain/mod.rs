pub mod forecast;
pub mod history;
