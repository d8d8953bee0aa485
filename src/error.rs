use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixtureError {
    #[error("insufficient teams{}: found {found}, need at least 2", group_suffix(.group))]
    InsufficientTeams { group: Option<String>, found: usize },

    #[error("duplicate team id: {0}")]
    DuplicateTeam(String),

    #[error("scheduling config error: {0}")]
    SchedulingConfig(#[from] SchedulingConfigError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingConfigError {
    #[error("invalid kickoff time {0:?}, expected HH:MM")]
    InvalidKickoffTime(String),

    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },

    #[error("not enough qualifying days between {start} and {limit} for {needed} match days")]
    NotEnoughQualifyingDays { start: NaiveDate, limit: NaiveDate, needed: usize },

    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("kickoff {0} does not exist in the configured timezone")]
    NonexistentKickoff(NaiveDateTime),

    #[error("max_matches_per_day must be at least 1")]
    ZeroMatchesPerDay,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StandingsError {
    #[error("match {match_id} has team {team_id} on both sides")]
    SelfMatch { match_id: String, team_id: String },

    #[error("duplicate team id: {0}")]
    DuplicateTeam(String),

    #[error("totals for team {team_id} overflow")]
    Overflow { team_id: String },
}

fn group_suffix(group: &Option<String>) -> String {
    match group {
        Some(g) => format!(" in group {}", g),
        None => String::new(),
    }
}
