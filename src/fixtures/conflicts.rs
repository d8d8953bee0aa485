use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::Match;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Conflict {
    /// Two matches booked on the same venue at the same kickoff.
    Venue {
        venue: String,
        kickoff: DateTime<Utc>,
        match_ids: (String, String),
    },
    /// A team booked into two matches at the same kickoff.
    Team {
        team_id: String,
        kickoff: DateTime<Utc>,
        match_ids: (String, String),
    },
}

/// Advisory clash report over any set of matches. Never alters the schedule.
pub fn detect_conflicts(matches: &[Match]) -> Vec<Conflict> {
    let mut by_venue: BTreeMap<(&str, DateTime<Utc>), Vec<&Match>> = BTreeMap::new();
    let mut by_team: BTreeMap<(&str, DateTime<Utc>), Vec<&Match>> = BTreeMap::new();

    for m in matches {
        if let Some(venue) = m.venue.as_deref() {
            by_venue.entry((venue, m.kickoff)).or_default().push(m);
        }
        by_team.entry((m.home_team_id.as_str(), m.kickoff)).or_default().push(m);
        by_team.entry((m.away_team_id.as_str(), m.kickoff)).or_default().push(m);
    }

    let mut conflicts = Vec::new();
    for ((venue, kickoff), booked) in &by_venue {
        for (a, b) in clashing_pairs(booked) {
            conflicts.push(Conflict::Venue {
                venue: venue.to_string(),
                kickoff: *kickoff,
                match_ids: (a.id.clone(), b.id.clone()),
            });
        }
    }
    for ((team_id, kickoff), booked) in &by_team {
        for (a, b) in clashing_pairs(booked) {
            conflicts.push(Conflict::Team {
                team_id: team_id.to_string(),
                kickoff: *kickoff,
                match_ids: (a.id.clone(), b.id.clone()),
            });
        }
    }

    if !conflicts.is_empty() {
        warn!(count = conflicts.len(), "Detected scheduling conflicts");
    }
    conflicts
}

fn clashing_pairs<'a>(booked: &[&'a Match]) -> Vec<(&'a Match, &'a Match)> {
    let mut pairs = Vec::new();
    for (i, a) in booked.iter().enumerate() {
        for b in &booked[i + 1..] {
            pairs.push((*a, *b));
        }
    }
    pairs
}
