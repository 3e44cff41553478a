//! Periodic maintenance triggers
//!
//! Three independent triggers run on their own tokio tasks, in local time:
//! - Monday 06:00: sweep, then a weekly refresh
//! - Tuesday to Sunday 06:00: daily refresh
//! - every day 03:00: sweep
//!
//! A failed run is logged and the trigger simply waits for its next slot.
//! Triggers may race with request-driven refreshes; a duplicate refresh is
//! accepted rather than coordinated.

use chrono::{Datelike, Duration, Local, NaiveDateTime, NaiveTime, Weekday};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::error::CacheResult;
use crate::event_cache::EventCache;
use crate::types::SearchType;

/// A scheduled maintenance job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Sweep plus weekly refresh
    WeeklyRefresh,
    /// Daily refresh on the days without a weekly one
    DailyRefresh,
    /// Retention sweep only
    DailySweep,
}

impl Trigger {
    pub const ALL: [Trigger; 3] = [
        Trigger::WeeklyRefresh,
        Trigger::DailyRefresh,
        Trigger::DailySweep,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Trigger::WeeklyRefresh => "weekly-refresh",
            Trigger::DailyRefresh => "daily-refresh",
            Trigger::DailySweep => "daily-sweep",
        }
    }

    /// Local time of day the trigger fires
    pub fn time_of_day(self) -> NaiveTime {
        let hour = match self {
            Trigger::WeeklyRefresh | Trigger::DailyRefresh => 6,
            Trigger::DailySweep => 3,
        };
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default()
    }

    /// Whether the trigger fires on `weekday`
    pub fn fires_on(self, weekday: Weekday) -> bool {
        match self {
            Trigger::WeeklyRefresh => weekday == Weekday::Mon,
            Trigger::DailyRefresh => weekday != Weekday::Mon,
            Trigger::DailySweep => true,
        }
    }

    /// First firing strictly after `now`
    pub fn next_after(self, now: NaiveDateTime) -> NaiveDateTime {
        let mut day = now.date();
        // At most a week ahead for any trigger.
        for _ in 0..8 {
            let candidate = day.and_time(self.time_of_day());
            if candidate > now && self.fires_on(day.weekday()) {
                return candidate;
            }
            day += Duration::days(1);
        }
        now + Duration::days(1)
    }

    /// Run the trigger's job once
    pub async fn run(self, cache: &EventCache, now: NaiveDateTime) -> CacheResult<()> {
        let today = now.date();
        match self {
            Trigger::WeeklyRefresh => {
                cache.sweep(today).await?;
                cache.refresh(SearchType::Weekly).await?;
            }
            Trigger::DailyRefresh => {
                cache.refresh(SearchType::Daily).await?;
            }
            Trigger::DailySweep => {
                cache.sweep(today).await?;
            }
        }
        Ok(())
    }
}

async fn run_forever(trigger: Trigger, cache: EventCache) {
    loop {
        let now = Local::now().naive_local();
        let next = trigger.next_after(now);
        let wait = (next - now).to_std().unwrap_or_default();
        info!(trigger = trigger.name(), next = %next, "trigger scheduled");
        tokio::time::sleep(wait).await;

        let fired_at = Local::now().naive_local();
        match trigger.run(&cache, fired_at).await {
            Ok(()) => info!(trigger = trigger.name(), "trigger finished"),
            Err(e) => error!(trigger = trigger.name(), error = %e, "trigger failed, waiting for next slot"),
        }
    }
}

/// Spawn all triggers; abort the handles to stop them
pub fn spawn_all(cache: &EventCache) -> Vec<JoinHandle<()>> {
    Trigger::ALL
        .iter()
        .map(|&trigger| tokio::spawn(run_forever(trigger, cache.clone())))
        .collect()
}
