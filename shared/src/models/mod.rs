//! Data models for the Travel Timing Recommendation Platform

pub mod destination;
pub mod forecast;
pub mod ranking;
pub mod score;
pub mod signals;

pub use destination::*;
pub use forecast::*;
pub use ranking::*;
pub use score::*;
pub use signals::*;
