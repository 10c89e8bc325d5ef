use chrono::{DateTime, TimeDelta, Utc};

use super::progress::{Progress, MAX_PERCENT};

/// Hours in the rolling session rate-limit window.
const SESSION_WINDOW_HOURS: i64 = 5;
/// Days in the weekly rate-limit window.
const WEEKLY_WINDOW_DAYS: i64 = 7;

pub fn session_window() -> TimeDelta {
    TimeDelta::hours(SESSION_WINDOW_HOURS)
}

pub fn weekly_window() -> TimeDelta {
    TimeDelta::days(WEEKLY_WINDOW_DAYS)
}

/// Utilization of one rate-limit window plus when it resets.
///
/// `resets_at == None` means the window was never fetched, which is not the
/// same thing as a fetched window at 0%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageWindow {
    utilization: Progress,
    resets_at: Option<DateTime<Utc>>,
    window_duration: TimeDelta,
}

impl UsageWindow {
    pub fn new(utilization: i64, resets_at: Option<DateTime<Utc>>, window_duration: TimeDelta) -> Self {
        Self {
            utilization: Progress::clamp_percent(utilization),
            resets_at,
            window_duration,
        }
    }

    pub fn session(utilization: i64, resets_at: Option<DateTime<Utc>>) -> Self {
        Self::new(utilization, resets_at, session_window())
    }

    pub fn weekly(utilization: i64, resets_at: Option<DateTime<Utc>>) -> Self {
        Self::new(utilization, resets_at, weekly_window())
    }

    /// A window that was never fetched.
    pub fn unfetched(window_duration: TimeDelta) -> Self {
        Self::new(0, None, window_duration)
    }

    pub fn utilization(&self) -> Progress {
        self.utilization
    }

    #[cfg(test)]
    pub fn resets_at(&self) -> Option<DateTime<Utc>> {
        self.resets_at
    }

    #[cfg(test)]
    pub fn window_duration(&self) -> TimeDelta {
        self.window_duration
    }

    /// True iff a reset timestamp was supplied.
    pub fn is_valid(&self) -> bool {
        self.resets_at.is_some()
    }

    /// Expected utilization given how much of the window has elapsed at `now`.
    ///
    /// Integer arithmetic on milliseconds, floored. A missing reset time is
    /// treated as already passed.
    pub fn cursor_position(&self, now: DateTime<Utc>) -> u8 {
        let total = self.window_duration.num_milliseconds();
        if total <= 0 {
            return 0;
        }
        let remaining = match self.resets_at {
            Some(resets_at) => (resets_at - now).num_milliseconds(),
            None => return MAX_PERCENT,
        };
        if remaining <= 0 {
            return MAX_PERCENT;
        }
        if remaining >= total {
            return 0;
        }
        let elapsed = i128::from(total - remaining);
        (elapsed * i128::from(MAX_PERCENT) / i128::from(total)) as u8
    }

    /// Consumption is not ahead of the elapsed share of the window.
    pub fn is_on_track(&self, now: DateTime<Utc>) -> bool {
        self.utilization.percent() <= self.cursor_position(now)
    }
}
