use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

use crate::error::SchedulingConfigError;
use crate::fixtures::FixtureConfig;

/// Upper bound on the qualifying-day walk when no end date is given.
pub const SCAN_LIMIT_DAYS: u64 = 3660;

/// Resolved date/time rules for one generation run.
#[derive(Debug, Clone)]
pub(crate) struct KickoffPlan {
    start: NaiveDate,
    limit: NaiveDate,
    kickoff_time: NaiveTime,
    timezone: Tz,
    weekends_only: bool,
    max_matches_per_day: Option<usize>,
}

impl KickoffPlan {
    pub(crate) fn from_config(config: &FixtureConfig) -> Result<Self, SchedulingConfigError> {
        let kickoff_time = parse_kickoff_time(&config.kickoff_time)?;

        let timezone = match config.timezone.as_deref() {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|_| SchedulingConfigError::UnknownTimezone(name.to_string()))?,
            None => chrono_tz::UTC,
        };

        let limit = match config.end_date {
            Some(end) if end < config.start_date => {
                return Err(SchedulingConfigError::EndBeforeStart { start: config.start_date, end });
            }
            Some(end) => end,
            None => config
                .start_date
                .checked_add_days(Days::new(SCAN_LIMIT_DAYS))
                .unwrap_or(NaiveDate::MAX),
        };

        if config.max_matches_per_day == Some(0) {
            return Err(SchedulingConfigError::ZeroMatchesPerDay);
        }

        Ok(Self {
            start: config.start_date,
            limit,
            kickoff_time,
            timezone,
            weekends_only: config.weekends_only,
            max_matches_per_day: config.max_matches_per_day,
        })
    }

    fn qualifies(&self, day: NaiveDate) -> bool {
        !self.weekends_only || matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Match days a round of `match_count` matches occupies.
    fn days_for_round(&self, match_count: usize) -> usize {
        match self.max_matches_per_day {
            Some(per_day) => match_count.div_ceil(per_day).max(1),
            None => 1,
        }
    }

    /// Kickoff instants for every match, grouped like `round_sizes`.
    ///
    /// Rounds consume qualifying days in order. Without a per-day cap a whole
    /// round shares one day; with a cap the overflow spills onto the next
    /// qualifying day.
    pub(crate) fn stamp(&self, round_sizes: &[usize]) -> Result<Vec<Vec<DateTime<Utc>>>, SchedulingConfigError> {
        let needed: usize = round_sizes.iter().map(|&n| self.days_for_round(n)).sum();
        let days = self.qualifying_days(needed)?;

        let mut day_iter = days.into_iter();
        let mut out = Vec::with_capacity(round_sizes.len());
        for &size in round_sizes {
            let per_day = self.max_matches_per_day.unwrap_or(size.max(1));
            let mut kickoffs = Vec::with_capacity(size);
            for _ in 0..self.days_for_round(size) {
                // `needed` already counted this day
                let Some(day) = day_iter.next() else { break };
                let instant = self.localize(day)?;
                let remaining = size - kickoffs.len();
                kickoffs.extend(std::iter::repeat_n(instant, remaining.min(per_day)));
            }
            out.push(kickoffs);
        }
        Ok(out)
    }

    fn qualifying_days(&self, needed: usize) -> Result<Vec<NaiveDate>, SchedulingConfigError> {
        let mut days = Vec::with_capacity(needed);
        let mut day = self.start;
        while days.len() < needed {
            if day > self.limit {
                return Err(SchedulingConfigError::NotEnoughQualifyingDays {
                    start: self.start,
                    limit: self.limit,
                    needed,
                });
            }
            if self.qualifies(day) {
                days.push(day);
            }
            day = match day.succ_opt() {
                Some(next) => next,
                None => {
                    return Err(SchedulingConfigError::NotEnoughQualifyingDays {
                        start: self.start,
                        limit: self.limit,
                        needed,
                    });
                }
            };
        }
        Ok(days)
    }

    fn localize(&self, day: NaiveDate) -> Result<DateTime<Utc>, SchedulingConfigError> {
        let naive = day.and_time(self.kickoff_time);
        self.timezone
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or(SchedulingConfigError::NonexistentKickoff(naive))
    }
}

pub(crate) fn parse_kickoff_time(s: &str) -> Result<NaiveTime, SchedulingConfigError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| SchedulingConfigError::InvalidKickoffTime(s.to_string()))
}
