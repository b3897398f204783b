//! External API integrations

pub mod forecast;

pub use forecast::ForecastClient;
