pub mod config;
pub mod error;
pub mod fixtures;
pub mod handler;
pub mod ical;
pub mod model;
pub mod standings;

pub use error::{FixtureError, SchedulingConfigError, StandingsError};
pub use fixtures::{FixtureConfig, generate_fixtures, generate_grouped_fixtures};
pub use standings::{StandingsOptions, Tiebreaker, calculate_standings};
