pub mod fixture;
pub mod standing;
pub mod team;

pub use fixture::{Match, MatchStatus, Round, Schedule};
pub use standing::{FormResult, Standing};
pub use team::{Team, TeamId};
