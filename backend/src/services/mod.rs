//! Business logic services for the Travel Timing Recommendation Platform

pub mod forecast;
pub mod highlight;
pub mod ranking;
pub mod scoring;
pub mod season;

pub use forecast::ForecastService;
pub use highlight::HighlightService;
pub use ranking::RankingService;
pub use scoring::ScoreService;
pub use season::SeasonCalendar;
