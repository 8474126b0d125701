mod player;
mod queries;

// Public API of the series-navigation subsystem.
pub use crate::error::{NavigatorError, PlayerError};
pub use player::{PlayerConfig, PlayerService};
pub use queries::SeriesQueries;
