use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, TimeZone, Utc};

use fixture_standings_lambda_rust::error::{FixtureError, SchedulingConfigError};
use fixture_standings_lambda_rust::fixtures::{
    detect_conflicts, generate_fixtures, generate_grouped_fixtures, Conflict, FixtureConfig,
};
use fixture_standings_lambda_rust::model::{MatchStatus, Team};

fn teams(names: &[&str]) -> Vec<Team> {
    names.iter().map(|n| Team::new(n.to_lowercase(), *n)).collect()
}

fn config() -> FixtureConfig {
    FixtureConfig::starting(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), "15:00")
}

fn pair(a: &str, b: &str) -> (String, String) {
    if a < b { (a.to_string(), b.to_string()) } else { (b.to_string(), a.to_string()) }
}

#[test]
fn four_teams_single_leg() {
    let schedule = generate_fixtures(&teams(&["A", "B", "C", "D"]), &config()).expect("schedule");

    assert_eq!(schedule.rounds.len(), 3);
    assert_eq!(schedule.matches.len(), 6);
    for round in &schedule.rounds {
        assert_eq!(round.leg, 1);
        assert_eq!(round.name, format!("Round {}", round.number));
        let in_round: Vec<_> = schedule.matches_in_round(round.number).collect();
        assert_eq!(in_round.len(), 2);
        let mut playing = HashSet::new();
        for m in in_round {
            assert!(playing.insert(m.home_team_id.clone()), "team twice in round {}", round.number);
            assert!(playing.insert(m.away_team_id.clone()), "team twice in round {}", round.number);
        }
    }

    let pairs: HashSet<_> = schedule.matches.iter().map(|m| pair(&m.home_team_id, &m.away_team_id)).collect();
    assert_eq!(pairs.len(), 6);
    assert!(schedule.matches.iter().all(|m| m.status == MatchStatus::Scheduled && m.home_score.is_none()));
}

#[test]
fn rounds_take_consecutive_days_at_kickoff_time() {
    let schedule = generate_fixtures(&teams(&["A", "B", "C", "D"]), &config()).expect("schedule");
    for m in &schedule.matches {
        let expected = Utc.with_ymd_and_hms(2025, 3, m.round, 15, 0, 0).unwrap();
        assert_eq!(m.kickoff, expected, "match {}", m.id);
    }
}

#[test]
fn two_teams_double_leg() {
    let mut cfg = config();
    cfg.double_leg = true;
    let schedule = generate_fixtures(&teams(&["Home", "Away"]), &cfg).expect("schedule");

    assert_eq!(schedule.rounds.len(), 2);
    assert_eq!(schedule.matches.len(), 2);
    let (first, second) = (&schedule.matches[0], &schedule.matches[1]);
    assert_eq!((first.round, first.leg), (1, 1));
    assert_eq!((second.round, second.leg), (2, 2));
    assert_eq!(first.home_team_id, second.away_team_id);
    assert_eq!(first.away_team_id, second.home_team_id);
    assert_eq!(first.id, "L1-R1-M1");
    assert_eq!(second.id, "L2-R2-M1");
}

#[test]
fn fewer_than_two_teams_is_an_error() {
    assert_eq!(
        generate_fixtures(&[], &config()),
        Err(FixtureError::InsufficientTeams { group: None, found: 0 })
    );
    assert_eq!(
        generate_fixtures(&teams(&["Solo"]), &config()),
        Err(FixtureError::InsufficientTeams { group: None, found: 1 })
    );
}

#[test]
fn duplicate_team_ids_are_rejected() {
    let mut list = teams(&["A", "B", "C"]);
    list[2].id = "a".to_string();
    assert_eq!(generate_fixtures(&list, &config()), Err(FixtureError::DuplicateTeam("a".to_string())));
}

#[test]
fn weekends_only_uses_saturdays_and_sundays() {
    let mut cfg = FixtureConfig::starting(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), "10:30");
    cfg.weekends_only = true;
    let schedule = generate_fixtures(&teams(&["A", "B", "C", "D"]), &cfg).expect("schedule");

    let days: Vec<_> = schedule.matches.iter().map(|m| m.kickoff).collect();
    let sat_4 = Utc.with_ymd_and_hms(2025, 1, 4, 10, 30, 0).unwrap();
    let sun_5 = Utc.with_ymd_and_hms(2025, 1, 5, 10, 30, 0).unwrap();
    let sat_11 = Utc.with_ymd_and_hms(2025, 1, 11, 10, 30, 0).unwrap();
    assert_eq!(days, vec![sat_4, sat_4, sun_5, sun_5, sat_11, sat_11]);
}

#[test]
fn kickoff_is_local_to_configured_timezone() {
    let mut cfg = config();
    cfg.timezone = Some("Africa/Nairobi".to_string());
    let schedule = generate_fixtures(&teams(&["A", "B"]), &cfg).expect("schedule");
    assert_eq!(schedule.matches[0].kickoff, Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap());
}

#[test]
fn malformed_date_config_is_rejected() {
    let mut cfg = config();
    cfg.end_date = Some(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
    assert!(matches!(
        generate_fixtures(&teams(&["A", "B"]), &cfg),
        Err(FixtureError::SchedulingConfig(SchedulingConfigError::EndBeforeStart { .. }))
    ));

    let mut cfg = config();
    cfg.kickoff_time = "half past three".to_string();
    assert!(matches!(
        generate_fixtures(&teams(&["A", "B"]), &cfg),
        Err(FixtureError::SchedulingConfig(SchedulingConfigError::InvalidKickoffTime(_)))
    ));

    let mut cfg = config();
    cfg.timezone = Some("Mars/Olympus_Mons".to_string());
    assert!(matches!(
        generate_fixtures(&teams(&["A", "B"]), &cfg),
        Err(FixtureError::SchedulingConfig(SchedulingConfigError::UnknownTimezone(_)))
    ));
}

#[test]
fn weekend_window_without_weekend_days_fails() {
    // Monday to Friday
    let mut cfg = FixtureConfig::starting(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(), "18:00");
    cfg.end_date = Some(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
    cfg.weekends_only = true;
    assert!(matches!(
        generate_fixtures(&teams(&["A", "B"]), &cfg),
        Err(FixtureError::SchedulingConfig(SchedulingConfigError::NotEnoughQualifyingDays { .. }))
    ));
}

#[test]
fn venue_is_stamped_on_every_match() {
    let mut cfg = config();
    cfg.venue = Some("Kasarani".to_string());
    let schedule = generate_fixtures(&teams(&["A", "B", "C"]), &cfg).expect("schedule");
    assert!(schedule.matches.iter().all(|m| m.venue.as_deref() == Some("Kasarani")));
}

#[test]
fn odd_team_count_gives_one_bye_each() {
    let list = teams(&["A", "B", "C", "D", "E"]);
    let schedule = generate_fixtures(&list, &config()).expect("schedule");
    assert_eq!(schedule.rounds.len(), 5);
    assert_eq!(schedule.matches.len(), 10);
    for team in &list {
        let played: HashSet<u32> = schedule.matches.iter().filter(|m| m.involves(&team.id)).map(|m| m.round).collect();
        assert_eq!(played.len(), 4, "team {} should sit out one round", team.id);
    }
}

#[test]
fn home_and_away_are_balanced() {
    for n in 2..=12 {
        let names: Vec<String> = (0..n).map(|i| format!("T{:02}", i)).collect();
        let list: Vec<Team> = names.iter().map(|s| Team::new(s.clone(), s.clone())).collect();
        let schedule = generate_fixtures(&list, &config()).expect("schedule");
        let mut balance: HashMap<&str, i32> = HashMap::new();
        for m in &schedule.matches {
            *balance.entry(&m.home_team_id).or_default() += 1;
            *balance.entry(&m.away_team_id).or_default() -= 1;
        }
        assert!(balance.values().all(|b| b.abs() <= 1), "n={} balance={:?}", n, balance);
    }
}

#[test]
fn generation_is_deterministic() {
    let list = teams(&["A", "B", "C", "D", "E", "F", "G"]);
    let mut cfg = config();
    cfg.double_leg = true;
    assert_eq!(generate_fixtures(&list, &cfg), generate_fixtures(&list, &cfg));
}

#[test]
fn groups_are_scheduled_independently() {
    let list = vec![
        Team::new("a1", "A1").in_group("A"),
        Team::new("b1", "B1").in_group("B"),
        Team::new("a2", "A2").in_group("A"),
        Team::new("a3", "A3").in_group("A"),
        Team::new("a4", "A4").in_group("A"),
    ];
    let groups = generate_grouped_fixtures(&list, &config()).expect("at least one unit");
    assert_eq!(groups.len(), 2);

    assert_eq!(groups[0].group.as_deref(), Some("A"));
    let a = groups[0].result.as_ref().expect("group A schedules");
    assert_eq!(a.rounds.len(), 3);
    assert_eq!(a.rounds[0].number, 1);
    assert_eq!(a.rounds[0].name, "A Round 1");
    assert!(a.matches.iter().all(|m| m.group.as_deref() == Some("A") && m.id.starts_with("A-L1-")));

    assert_eq!(groups[1].group.as_deref(), Some("B"));
    assert_eq!(
        groups[1].result,
        Err(FixtureError::InsufficientTeams { group: Some("B".to_string()), found: 1 })
    );
}

#[test]
fn grouped_generation_without_teams_is_an_error() {
    assert_eq!(
        generate_grouped_fixtures(&[], &config()),
        Err(FixtureError::InsufficientTeams { group: None, found: 0 })
    );
}

#[test]
fn per_day_cap_moves_overflow_to_next_day() {
    let mut cfg = config();
    cfg.max_matches_per_day = Some(1);
    let schedule = generate_fixtures(&teams(&["A", "B", "C", "D"]), &cfg).expect("schedule");
    let kickoffs: HashSet<_> = schedule.matches.iter().map(|m| m.kickoff).collect();
    assert_eq!(kickoffs.len(), 6);
    assert_eq!(
        schedule.matches.last().map(|m| m.kickoff),
        Some(Utc.with_ymd_and_hms(2025, 3, 6, 15, 0, 0).unwrap())
    );
}

#[test]
fn conflicts_flag_shared_venue_and_double_booked_team() {
    let mut cfg = config();
    cfg.venue = Some("Nyayo".to_string());
    let a = generate_fixtures(&teams(&["A", "B"]), &cfg).expect("schedule");
    let mut b = generate_fixtures(&teams(&["C", "D"]), &cfg).expect("schedule");
    b.matches[0].id = "other".to_string();
    b.matches[0].away_team_id = "a".to_string();

    let all: Vec<_> = a.matches.iter().chain(b.matches.iter()).cloned().collect();
    let conflicts = detect_conflicts(&all);
    assert!(conflicts.iter().any(|c| matches!(c, Conflict::Venue { venue, .. } if venue == "Nyayo")));
    assert!(conflicts.iter().any(|c| matches!(c, Conflict::Team { team_id, .. } if team_id == "a")));

    assert!(detect_conflicts(&a.matches).is_empty());
}
