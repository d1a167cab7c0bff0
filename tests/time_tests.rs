use chrono::{DateTime, Duration, Utc};
use parkki_apuri::time::*;

fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .unwrap()
        .with_timezone(&Utc)
}

#[test]
fn window_applies_two_hour_lead() {
    // Composed at 10:00:00 with a 3 hour duration
    let (start, end) = reservation_window(at("2024-01-01T10:00:00Z"), 3);
    assert_eq!(start, "12:00:00");
    assert_eq!(end, "15:00:00");
}

#[test]
fn window_is_zero_padded() {
    let (start, end) = reservation_window(at("2024-01-01T05:07:09Z"), 1);
    assert_eq!(start, "07:07:09");
    assert_eq!(end, "08:07:09");
}

#[test]
fn window_preserves_minutes_and_seconds() {
    let (start, end) = reservation_window(at("2024-06-15T14:31:45Z"), 8);
    assert_eq!(start, "16:31:45");
    assert_eq!(end, "00:31:45");
}

#[test]
fn window_wraps_past_midnight() {
    // 23:00 + 2h lead crosses into the next day; only the time-of-day is
    // carried on the wire
    let (start, end) = reservation_window(at("2024-01-01T23:00:00Z"), 4);
    assert_eq!(start, "01:00:00");
    assert_eq!(end, "05:00:00");
}

#[test]
fn window_end_tracks_duration_exactly() {
    let now = at("2024-03-10T08:15:30Z");
    for hours in 1..=24 {
        let (start, end) = reservation_window(now, hours);
        assert_eq!(start, format_wire_time(now + Duration::hours(LEAD_HOURS)));
        assert_eq!(
            end,
            format_wire_time(now + Duration::hours(hours + LEAD_HOURS))
        );
    }
}

#[test]
fn duration_clamping_bounds() {
    assert_eq!(clamp_duration(-1), 0);
    assert_eq!(clamp_duration(0), 0);
    assert_eq!(clamp_duration(12), 12);
    assert_eq!(clamp_duration(24), 24);
    assert_eq!(clamp_duration(25), 24);
    assert_eq!(clamp_duration(i64::MAX), 24);
    assert_eq!(clamp_duration(i64::MIN), 0);
}

#[tokio::test]
async fn test_clock_is_deterministic() {
    let clock = TestClock::new(at("2024-01-01T10:00:00Z"));
    assert_eq!(format_wire_time(clock.now_utc()), "10:00:00");

    clock.advance(Duration::minutes(90)).await;
    assert_eq!(format_wire_time(clock.now_utc()), "11:30:00");

    clock.set_time(at("2024-01-02T00:00:00Z")).await;
    assert_eq!(format_wire_time(clock.now_utc()), "00:00:00");
}
