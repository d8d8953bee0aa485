//! League table computation from match results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::StandingsError;
use crate::model::{FormResult, Match, Standing, Team};

const FORM_LENGTH: usize = 5;

// Head-to-head always scores 3/1/0, independent of the table weights.
const H2H_WIN: i64 = 3;
const H2H_DRAW: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tiebreaker {
    #[serde(rename = "POINTS")]
    Points,
    #[serde(rename = "GD")]
    GoalDifference,
    #[serde(rename = "GF")]
    GoalsFor,
    #[serde(rename = "H2H")]
    HeadToHead,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandingsOptions {
    pub points_win: i64,
    pub points_draw: i64,
    pub points_loss: i64,
    pub tiebreakers: Vec<Tiebreaker>,
}

impl Default for StandingsOptions {
    fn default() -> Self {
        Self {
            points_win: 3,
            points_draw: 1,
            points_loss: 0,
            tiebreakers: vec![
                Tiebreaker::Points,
                Tiebreaker::GoalDifference,
                Tiebreaker::GoalsFor,
                Tiebreaker::HeadToHead,
            ],
        }
    }
}

/// Compute the ranked table for `teams` from the completed matches in `matches`.
///
/// Every team gets a row. Matches naming a team outside `teams` are skipped.
/// Positions are strictly increasing: the last resort orders by name, then id.
#[instrument(level = "info", skip_all, fields(teams = teams.len(), matches = matches.len()))]
pub fn calculate_standings(teams: &[Team], matches: &[Match], options: &StandingsOptions) -> Result<Vec<Standing>, StandingsError> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(teams.len());
    for (i, team) in teams.iter().enumerate() {
        if index.insert(team.id.as_str(), i).is_some() {
            return Err(StandingsError::DuplicateTeam(team.id.clone()));
        }
    }
    if let Some(m) = matches.iter().find(|m| m.home_team_id == m.away_team_id) {
        return Err(StandingsError::SelfMatch {
            match_id: m.id.clone(),
            team_id: m.home_team_id.clone(),
        });
    }

    let mut completed: Vec<(&Match, (u32, u32))> = matches
        .iter()
        .filter_map(|m| m.final_score().map(|score| (m, score)))
        .collect();
    // Chronological, so form reads in the order results happened.
    completed.sort_by_key(|(m, _)| m.kickoff);

    let mut table = Table {
        rows: teams.iter().map(|t| Standing::empty(&t.id, &t.name)).collect(),
        head_to_head: HashMap::new(),
    };

    let mut skipped = 0usize;
    for (m, (home_goals, away_goals)) in completed.iter().copied() {
        let (Some(&home), Some(&away)) = (index.get(m.home_team_id.as_str()), index.get(m.away_team_id.as_str())) else {
            warn!(match_id = %m.id, home = %m.home_team_id, away = %m.away_team_id, "Skipping match with unknown team");
            skipped += 1;
            continue;
        };
        table.record(home, away, home_goals, away_goals, options)?;
    }
    debug!(completed = completed.len(), skipped, "Aggregated results");

    let mut order = Vec::with_capacity(teams.len());
    table.refine((0..teams.len()).collect(), &options.tiebreakers, &mut order);

    let mut rows: Vec<Option<Standing>> = table.rows.into_iter().map(Some).collect();
    let standings = order
        .into_iter()
        .enumerate()
        .filter_map(|(pos, i)| {
            rows[i].take().map(|mut row| {
                row.position = pos as u32 + 1;
                row
            })
        })
        .collect();
    Ok(standings)
}

struct Table {
    rows: Vec<Standing>,
    /// (a, b) -> head-to-head points `a` took off `b`.
    head_to_head: HashMap<(usize, usize), i64>,
}

impl Table {
    fn record(&mut self, home: usize, away: usize, home_goals: u32, away_goals: u32, options: &StandingsOptions) -> Result<(), StandingsError> {
        let (home_result, away_result) = match home_goals.cmp(&away_goals) {
            std::cmp::Ordering::Greater => (FormResult::W, FormResult::L),
            std::cmp::Ordering::Less => (FormResult::L, FormResult::W),
            std::cmp::Ordering::Equal => (FormResult::D, FormResult::D),
        };
        self.apply(home, home_goals, away_goals, home_result, options)?;
        self.apply(away, away_goals, home_goals, away_result, options)?;
        *self.head_to_head.entry((home, away)).or_default() += h2h_points(home_result);
        *self.head_to_head.entry((away, home)).or_default() += h2h_points(away_result);
        Ok(())
    }

    fn apply(&mut self, team: usize, scored: u32, conceded: u32, result: FormResult, options: &StandingsOptions) -> Result<(), StandingsError> {
        let row = &mut self.rows[team];
        let weight = match result {
            FormResult::W => options.points_win,
            FormResult::D => options.points_draw,
            FormResult::L => options.points_loss,
        };
        let overflow = || StandingsError::Overflow { team_id: row.team_id.clone() };
        let goals_for = row.goals_for.checked_add(u64::from(scored)).ok_or_else(overflow)?;
        let goals_against = row.goals_against.checked_add(u64::from(conceded)).ok_or_else(overflow)?;
        let goal_difference = row
            .goal_difference
            .checked_add(i64::from(scored) - i64::from(conceded))
            .ok_or_else(overflow)?;
        let points = row.points.checked_add(weight).ok_or_else(overflow)?;

        row.played += 1;
        row.goals_for = goals_for;
        row.goals_against = goals_against;
        row.goal_difference = goal_difference;
        row.points = points;
        match result {
            FormResult::W => row.won += 1,
            FormResult::D => row.drawn += 1,
            FormResult::L => row.lost += 1,
        }
        row.form.insert(0, result);
        row.form.truncate(FORM_LENGTH);
        Ok(())
    }

    fn key(&self, tiebreaker: Tiebreaker, team: usize, tied: &[usize]) -> i64 {
        let row = &self.rows[team];
        match tiebreaker {
            Tiebreaker::Points => row.points,
            Tiebreaker::GoalDifference => row.goal_difference,
            Tiebreaker::GoalsFor => i64::try_from(row.goals_for).unwrap_or(i64::MAX),
            Tiebreaker::HeadToHead => tied
                .iter()
                .filter(|&&other| other != team)
                .filter_map(|&other| self.head_to_head.get(&(team, other)))
                .sum(),
        }
    }

    /// Order `tied` by the first criterion, then break each run of equal
    /// keys with the remaining ones. Head-to-head is always evaluated among
    /// the teams still tied at that point.
    fn refine(&self, mut tied: Vec<usize>, criteria: &[Tiebreaker], out: &mut Vec<usize>) {
        if tied.len() <= 1 {
            out.extend(tied);
            return;
        }
        let Some((&first, rest)) = criteria.split_first() else {
            tied.sort_by(|&a, &b| {
                let (ra, rb) = (&self.rows[a], &self.rows[b]);
                ra.team_name.cmp(&rb.team_name).then_with(|| ra.team_id.cmp(&rb.team_id))
            });
            out.extend(tied);
            return;
        };

        let mut keyed: Vec<(i64, usize)> = tied.iter().map(|&t| (self.key(first, t, &tied), t)).collect();
        keyed.sort_by(|a, b| b.0.cmp(&a.0));
        for run in keyed.chunk_by(|a, b| a.0 == b.0) {
            self.refine(run.iter().map(|&(_, t)| t).collect(), rest, out);
        }
    }
}

fn h2h_points(result: FormResult) -> i64 {
    match result {
        FormResult::W => H2H_WIN,
        FormResult::D => H2H_DRAW,
        FormResult::L => 0,
    }
}
