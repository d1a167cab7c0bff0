use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Fixed lead applied to every reservation: bookings start two hours from
/// the moment the request is composed. Business rule baked into the client,
/// not configurable.
pub const LEAD_HOURS: i64 = 2;

/// Duration bounds for a single reservation, in whole hours. Zero counts as
/// "no duration chosen" when deciding whether a submission is allowed.
pub const MIN_DURATION_HOURS: i64 = 0;
pub const MAX_DURATION_HOURS: i64 = 24;

/// Clock seam so view logic can be tested with a fixed time.
pub trait Clock: Send + Sync {
    /// Get current UTC time
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Production implementation using system clock
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Test clock implementation for deterministic time control
#[derive(Debug, Clone)]
pub struct TestClock {
    current_time: Arc<Mutex<DateTime<Utc>>>,
}

impl TestClock {
    pub fn new(initial_time: DateTime<Utc>) -> Self {
        Self {
            current_time: Arc::new(Mutex::new(initial_time)),
        }
    }

    /// Advance the clock by a specific duration
    pub async fn advance(&self, duration: Duration) {
        let mut time = self.current_time.lock().await;
        *time = *time + duration;
    }

    /// Set the clock to a specific time
    pub async fn set_time(&self, new_time: DateTime<Utc>) {
        let mut time = self.current_time.lock().await;
        *time = new_time;
    }
}

impl Clock for TestClock {
    fn now_utc(&self) -> DateTime<Utc> {
        // Blocking accessor so the trait stays sync-callable from view code
        futures::executor::block_on(async { *self.current_time.lock().await })
    }
}

/// Wall-clock start and end times for a reservation composed at `now`:
/// start = now + lead, end = now + duration + lead. Both are formatted as
/// the backend expects (`HH:MM:SS`, 24-hour, zero-padded); dates are not
/// carried on the wire, so times past midnight simply wrap.
pub fn reservation_window(now: DateTime<Utc>, duration_hours: i64) -> (String, String) {
    let start = now + Duration::hours(LEAD_HOURS);
    let end = now + Duration::hours(duration_hours + LEAD_HOURS);
    (format_wire_time(start), format_wire_time(end))
}

/// Format a timestamp as the backend's `HH:MM:SS` wire time.
pub fn format_wire_time(time: DateTime<Utc>) -> String {
    time.format("%H:%M:%S").to_string()
}

/// Clamp a requested duration to the supported range of whole hours.
pub fn clamp_duration(hours: i64) -> i64 {
    hours.clamp(MIN_DURATION_HOURS, MAX_DURATION_HOURS)
}
