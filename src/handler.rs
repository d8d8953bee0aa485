use std::sync::OnceLock;

use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::config::HostConfig;
use crate::fixtures::{self, Conflict, FixtureConfig, GroupFixtures};
use crate::ical::FixtureCalendar;
use crate::model::{Match, Round, Standing, Team};
use crate::standings::{self, StandingsOptions};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Request {
    GenerateFixtures {
        teams: Vec<Team>,
        config: FixtureConfig,
        #[serde(default)]
        check_conflicts: bool,
    },
    CalculateStandings {
        teams: Vec<Team>,
        matches: Vec<Match>,
        #[serde(default)]
        options: StandingsOptions,
    },
    ExportCalendar {
        teams: Vec<Team>,
        matches: Vec<Match>,
        #[serde(default)]
        calendar_name: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Response {
    GenerateFixtures {
        groups: Vec<GroupResponse>,
        #[serde(default)]
        conflicts: Vec<Conflict>,
    },
    CalculateStandings { standings: Vec<Standing> },
    ExportCalendar { ics: String, summary: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupResponse {
    pub group: Option<String>,
    pub rounds: Vec<Round>,
    pub matches: Vec<Match>,
    #[serde(default)]
    pub error: Option<String>,
}

impl From<GroupFixtures> for GroupResponse {
    fn from(g: GroupFixtures) -> Self {
        match g.result {
            Ok(schedule) => GroupResponse {
                group: g.group,
                rounds: schedule.rounds,
                matches: schedule.matches,
                ..Default::default()
            },
            Err(e) => GroupResponse { group: g.group, error: Some(e.to_string()), ..Default::default() },
        }
    }
}

fn host_config() -> &'static HostConfig {
    static CONFIG: OnceLock<HostConfig> = OnceLock::new();
    CONFIG.get_or_init(HostConfig::from_env)
}

#[instrument(skip(event))]
pub async fn handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    process(event.payload, host_config()).await
}

/// Run one request against explicit host settings.
pub async fn process(request: Request, host: &HostConfig) -> Result<Response, Error> {
    match request {
        Request::GenerateFixtures { teams, mut config, check_conflicts } => {
            if config.timezone.is_none() {
                config.timezone = host.default_timezone.clone();
            }
            let groups = generate_groups(teams, config).await?;
            // Venue and team clashes span groups.
            let conflicts = if check_conflicts {
                let all: Vec<Match> = groups.iter().flat_map(|g| g.matches.iter().cloned()).collect();
                fixtures::detect_conflicts(&all)
            } else {
                Vec::new()
            };
            Ok(Response::GenerateFixtures { groups, conflicts })
        }
        Request::CalculateStandings { teams, matches, options } => {
            let standings = standings::calculate_standings(&teams, &matches, &options).map_err(|e| {
                error!(error = %e, "Standings calculation rejected input");
                e
            })?;
            Ok(Response::CalculateStandings { standings })
        }
        Request::ExportCalendar { teams, matches, calendar_name } => {
            let name = calendar_name.unwrap_or_else(|| "Fixtures".to_string());
            let calendar = FixtureCalendar::from_schedule(&name, &teams, &matches, host.match_minutes);
            let summary = calendar.summary(chrono::Utc::now().naive_utc());
            Ok(Response::ExportCalendar { ics: calendar.to_ics(), summary })
        }
    }
}

/// Each group is an independent unit, so each gets its own blocking task.
async fn generate_groups(teams: Vec<Team>, config: FixtureConfig) -> Result<Vec<GroupResponse>, Error> {
    let units = fixtures::schedulable_units(&teams).map_err(|e| {
        error!(error = %e, "Fixture request rejected");
        e
    })?;

    let mut handles: Vec<tokio::task::JoinHandle<GroupResponse>> = Vec::with_capacity(units.len());
    for (group, members) in units {
        // spawn_blocking needs 'static inputs, so each task owns its config copy
        let config = config.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            GroupResponse::from(fixtures::schedule_unit(group, &members, &config))
        }));
    }

    let mut groups = Vec::with_capacity(handles.len());
    for h in handles {
        groups.push(h.await?);
    }
    info!(groups = groups.len(), "Fixture generation finished");
    Ok(groups)
}
