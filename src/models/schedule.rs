use chrono::{NaiveDateTime, NaiveTime};

/// Polling schedule for the e-paper device.
///
/// During the day window the device polls at a fixed interval; outside
/// it, the next poll is deferred until the window opens again so the
/// panel sleeps through the night.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WakeSchedule {
    /// Hour (0-23) the day window opens.
    pub day_start_hour: u32,
    /// Hour (0-23) the day window closes.
    pub day_end_hour: u32,
    /// Poll interval in seconds inside the day window.
    pub day_interval_secs: u64,
}

impl Default for WakeSchedule {
    fn default() -> Self {
        Self {
            day_start_hour: 8,
            day_end_hour: 20,
            day_interval_secs: 3600,
        }
    }
}

impl WakeSchedule {
    /// Seconds until the device should poll again, evaluated at `now`
    /// (local wall-clock time).
    ///
    /// Inside the `[day_start, day_end)` window this is the fixed day
    /// interval. Outside it, it is the number of seconds until the next
    /// window start — later today if the window has not opened yet,
    /// otherwise tomorrow.
    pub fn interval_at(&self, now: NaiveDateTime) -> u64 {
        let start = NaiveTime::from_hms_opt(self.day_start_hour, 0, 0).unwrap_or(NaiveTime::MIN);
        let end = NaiveTime::from_hms_opt(self.day_end_hour, 0, 0).unwrap_or(NaiveTime::MIN);
        let time = now.time();

        if start <= time && time < end {
            return self.day_interval_secs;
        }

        let next_start = if time < start {
            now.date().and_time(start)
        } else {
            (now.date() + chrono::Days::new(1)).and_time(start)
        };

        // Sub-second remainders truncate; never tell the device to sleep 0s
        (next_start - now).num_seconds().max(1) as u64
    }
}
