// Clock and greeting text
use chrono::{DateTime, Local, Timelike};

/// Greeting for an hour of day (0-23)
///
/// Thresholds: before 12 is morning, before 18 is afternoon, the rest
/// of the day is evening.
pub fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

/// Greeting for the given moment, optionally addressed to a name
pub fn greeting(now: DateTime<Local>, name: Option<&str>) -> String {
    let base = greeting_for_hour(now.hour());
    match name {
        Some(name) if !name.is_empty() => format!("{}, {}", base, name),
        _ => base.to_string(),
    }
}

/// The clock line, re-rendered every second by the UI
pub fn clock_text(now: DateTime<Local>) -> String {
    now.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_greeting_thresholds() {
        assert_eq!(greeting_for_hour(0), "Good morning");
        assert_eq!(greeting_for_hour(11), "Good morning");
        assert_eq!(greeting_for_hour(12), "Good afternoon");
        assert_eq!(greeting_for_hour(17), "Good afternoon");
        assert_eq!(greeting_for_hour(18), "Good evening");
        assert_eq!(greeting_for_hour(23), "Good evening");
    }

    #[test]
    fn test_greeting_with_name() {
        let morning = Local.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        assert_eq!(greeting(morning, Some("Ada")), "Good morning, Ada");
        assert_eq!(greeting(morning, Some("")), "Good morning");
        assert_eq!(greeting(morning, None), "Good morning");
    }

    #[test]
    fn test_clock_text_is_hours_minutes() {
        let now = Local.with_ymd_and_hms(2024, 6, 1, 7, 5, 59).unwrap();
        assert_eq!(clock_text(now), "07:05");
    }
}
