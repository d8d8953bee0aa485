use serde::{Deserialize, Serialize};

use crate::model::team::TeamId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormResult {
    W,
    D,
    L,
}

/// One row of a league table. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub position: u32,
    pub team_id: TeamId,
    pub team_name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u64,
    pub goals_against: u64,
    pub goal_difference: i64,
    pub points: i64,
    /// Most recent first, at most five entries.
    pub form: Vec<FormResult>,
}

impl Standing {
    pub(crate) fn empty(team_id: &str, team_name: &str) -> Self {
        Self {
            position: 0,
            team_id: team_id.to_string(),
            team_name: team_name.to_string(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
            form: Vec::new(),
        }
    }

    pub fn form_string(&self) -> String {
        self.form
            .iter()
            .map(|r| match r {
                FormResult::W => 'W',
                FormResult::D => 'D',
                FormResult::L => 'L',
            })
            .collect()
    }
}
