use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use icalendar::{Calendar, Component, Event, EventLike};
use tracing::{info, instrument};

use crate::model::{Match, Team};

/// iCalendar view of a fixture list.
#[derive(Debug, Clone)]
pub struct FixtureCalendar {
    pub calendar: Calendar,
    kickoffs: Vec<DateTime<Utc>>,
}

impl FixtureCalendar {
    /// One VEVENT per match, lasting `match_minutes` from kickoff.
    #[instrument(level = "info", skip(teams, matches), fields(matches = matches.len()))]
    pub fn from_schedule(name: &str, teams: &[Team], matches: &[Match], match_minutes: i64) -> Self {
        let names: HashMap<&str, &str> = teams.iter().map(|t| (t.id.as_str(), t.name.as_str())).collect();
        let name_of = |id: &str| names.get(id).copied().unwrap_or(id).to_string();

        let mut calendar = Calendar::new();
        calendar.name(name);
        for m in matches {
            let mut event = Event::new();
            event
                .uid(&m.id)
                .summary(&format!("{} vs {}", name_of(&m.home_team_id), name_of(&m.away_team_id)))
                .starts(m.kickoff)
                .ends(m.kickoff + Duration::minutes(match_minutes))
                .description(&describe(m));
            if let Some(venue) = m.venue.as_deref() {
                event.location(venue);
            }
            calendar.push(event.done());
        }
        info!(events = matches.len(), "Built fixture calendar");
        Self {
            calendar: calendar.done(),
            kickoffs: matches.iter().map(|m| m.kickoff).collect(),
        }
    }

    pub fn to_ics(&self) -> String {
        self.calendar.to_string()
    }

    /// One-line summary of the last fixture date after `cutoff`.
    pub fn summary(&self, cutoff: NaiveDateTime) -> String {
        let latest = self.kickoffs.iter().map(|k| k.naive_utc()).filter(|start| *start > cutoff).max();
        match latest {
            Some(dt) => format!("Fixtures scheduled until {}.", dt.date()),
            None => "No upcoming fixtures.".to_string(),
        }
    }
}

fn describe(m: &Match) -> String {
    let mut s = match m.group.as_deref() {
        Some(g) => format!("{} Round {} (leg {})", g, m.round, m.leg),
        None => format!("Round {} (leg {})", m.round, m.leg),
    };
    s.push_str(" - ");
    s.push_str(m.status.as_str());
    if let Some((h, a)) = m.final_score() {
        s.push_str(&format!(" {}-{}", h, a));
    }
    s
}
