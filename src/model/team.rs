use serde::{Deserialize, Serialize};

pub type TeamId = String;

/// A registered team as handed over by the tournament CRUD layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub group: Option<String>,
    // Eligibility attributes; carried through untouched.
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub sub_county: Option<String>,
    #[serde(default)]
    pub ward: Option<String>,
}

impl Team {
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            group: None,
            county: None,
            sub_county: None,
            ward: None,
        }
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}
