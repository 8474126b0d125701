#![forbid(unsafe_code)]

pub mod countdown;
pub mod error;
pub mod model;
pub mod series;
pub mod time;

pub use countdown::{AutoAdvance, DEFAULT_COUNTDOWN_SECONDS, TickOutcome};
pub use error::Error;
pub use series::{Series, SeriesProgress};
pub use time::Clock;
