//! Round-robin fixture generation.
//!
//! Pairings come from [`circle::single_leg`]; the optional second leg
//! replays the same rounds with home and away swapped. Dates are stamped by
//! walking qualifying days forward from the configured start date, one day
//! per round unless a per-day cap forces a round to spill over.

pub mod calendar;
pub mod circle;
pub mod conflicts;

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::error::FixtureError;
use crate::model::{Match, MatchStatus, Round, Schedule, Team};

use calendar::KickoffPlan;
use circle::Pairing;

pub use conflicts::{Conflict, detect_conflicts};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureConfig {
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Local time of day, "HH:MM".
    pub kickoff_time: String,
    #[serde(default)]
    pub weekends_only: bool,
    #[serde(default)]
    pub double_leg: bool,
    #[serde(default)]
    pub venue: Option<String>,
    /// IANA zone the kickoff time is local to; UTC when absent.
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub max_matches_per_day: Option<usize>,
}

impl FixtureConfig {
    pub fn starting(start_date: NaiveDate, kickoff_time: &str) -> Self {
        Self {
            start_date,
            end_date: None,
            kickoff_time: kickoff_time.to_string(),
            weekends_only: false,
            double_leg: false,
            venue: None,
            timezone: None,
            max_matches_per_day: None,
        }
    }
}

/// Schedule for one group. `result` fails independently of other groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupFixtures {
    pub group: Option<String>,
    pub result: Result<Schedule, FixtureError>,
}

/// Generate an ungrouped round-robin over `teams` in the given order.
pub fn generate_fixtures(teams: &[Team], config: &FixtureConfig) -> Result<Schedule, FixtureError> {
    generate_group_fixtures(None, teams, config)
}

/// Generate the schedule for one schedulable unit. Round numbers are local to it.
#[instrument(level = "info", skip(teams, config), fields(teams = teams.len(), double_leg = config.double_leg))]
pub fn generate_group_fixtures(group: Option<&str>, teams: &[Team], config: &FixtureConfig) -> Result<Schedule, FixtureError> {
    if teams.len() < 2 {
        return Err(FixtureError::InsufficientTeams {
            group: group.map(str::to_string),
            found: teams.len(),
        });
    }
    let mut seen = HashSet::with_capacity(teams.len());
    if let Some(dup) = teams.iter().find(|t| !seen.insert(t.id.as_str())) {
        return Err(FixtureError::DuplicateTeam(dup.id.clone()));
    }

    let plan = KickoffPlan::from_config(config)?;

    let first_leg = circle::single_leg(teams.len());
    let mut legs: Vec<(u8, Vec<Vec<Pairing>>)> = vec![(1, first_leg.clone())];
    if config.double_leg {
        let reversed = first_leg
            .iter()
            .map(|round| round.iter().map(|p| Pairing { home: p.away, away: p.home }).collect())
            .collect();
        legs.push((2, reversed));
    }

    let round_sizes: Vec<usize> = legs.iter().flat_map(|(_, rounds)| rounds.iter().map(Vec::len)).collect();
    let kickoffs = plan.stamp(&round_sizes)?;

    let mut schedule = Schedule::default();
    let mut round_number = 0u32;
    let mut kickoff_iter = kickoffs.into_iter();
    for (leg, rounds) in legs {
        for pairings in rounds {
            round_number += 1;
            let round_kickoffs = kickoff_iter.next().unwrap_or_default();
            schedule.rounds.push(Round {
                number: round_number,
                leg,
                name: round_name(group, round_number),
                group: group.map(str::to_string),
            });
            for (index, (pairing, kickoff)) in pairings.iter().zip(round_kickoffs).enumerate() {
                schedule.matches.push(Match {
                    id: match_id(group, leg, round_number, index + 1),
                    round: round_number,
                    leg,
                    group: group.map(str::to_string),
                    home_team_id: teams[pairing.home].id.clone(),
                    away_team_id: teams[pairing.away].id.clone(),
                    kickoff,
                    venue: config.venue.clone(),
                    home_score: None,
                    away_score: None,
                    status: MatchStatus::Scheduled,
                });
            }
        }
    }

    info!(
        group = group.unwrap_or("-"),
        rounds = schedule.rounds.len(),
        matches = schedule.matches.len(),
        "Generated fixtures"
    );
    Ok(schedule)
}

/// Run the generator once per group. Teams without a group share one unnamed unit.
///
/// An empty team list has no unit to schedule and fails as a whole; past
/// that, each group succeeds or fails on its own.
#[instrument(level = "info", skip(teams, config), fields(teams = teams.len()))]
pub fn generate_grouped_fixtures(teams: &[Team], config: &FixtureConfig) -> Result<Vec<GroupFixtures>, FixtureError> {
    Ok(schedulable_units(teams)?
        .into_iter()
        .map(|(group, members)| schedule_unit(group, &members, config))
        .collect())
}

/// Generate one group and log its failure, if any.
pub fn schedule_unit(group: Option<String>, members: &[Team], config: &FixtureConfig) -> GroupFixtures {
    let result = generate_group_fixtures(group.as_deref(), members, config);
    if let Err(e) = &result {
        warn!(group = group.as_deref().unwrap_or("-"), error = %e, "Group fixture generation failed");
    }
    GroupFixtures { group, result }
}

/// [`partition_by_group`], rejecting an empty team list.
pub fn schedulable_units(teams: &[Team]) -> Result<Vec<(Option<String>, Vec<Team>)>, FixtureError> {
    if teams.is_empty() {
        return Err(FixtureError::InsufficientTeams { group: None, found: 0 });
    }
    Ok(partition_by_group(teams))
}

/// Split teams by group in first-appearance order, keeping team order within each group.
pub fn partition_by_group(teams: &[Team]) -> Vec<(Option<String>, Vec<Team>)> {
    let mut groups: Vec<(Option<String>, Vec<Team>)> = Vec::new();
    for team in teams {
        match groups.iter_mut().find(|(g, _)| *g == team.group) {
            Some((_, members)) => members.push(team.clone()),
            None => groups.push((team.group.clone(), vec![team.clone()])),
        }
    }
    groups
}

fn round_name(group: Option<&str>, number: u32) -> String {
    match group {
        Some(g) => format!("{} Round {}", g, number),
        None => format!("Round {}", number),
    }
}

fn match_id(group: Option<&str>, leg: u8, round: u32, index: usize) -> String {
    match group {
        Some(g) => format!("{}-L{}-R{}-M{}", g, leg, round, index),
        None => format!("L{}-R{}-M{}", leg, round, index),
    }
}
