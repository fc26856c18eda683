//! Notification channel implementations.

pub mod log;
pub mod webhook;

use chrono::TimeDelta;

/// Render how long an incident has been open, at minute resolution.
///
/// Anything under a minute, including clock skew, reads as "just now".
pub(crate) fn format_age(age: TimeDelta) -> String {
    let minutes = age.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }

    let days = age.num_days();
    let hours = age.num_hours() % 24;
    let minutes = minutes % 60;

    let parts: Vec<String> = [(days, "d"), (hours, "h"), (minutes, "m")]
        .into_iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect();
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::format_age;
    use chrono::TimeDelta;

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(TimeDelta::seconds(42)), "just now");
        assert_eq!(format_age(TimeDelta::seconds(-5)), "just now");
        assert_eq!(format_age(TimeDelta::minutes(15)), "15m");
        assert_eq!(format_age(TimeDelta::seconds(930)), "15m");
        assert_eq!(format_age(TimeDelta::hours(2)), "2h");
        assert_eq!(format_age(TimeDelta::minutes(90)), "1h 30m");
        assert_eq!(format_age(TimeDelta::minutes(26 * 60 + 5)), "1d 2h 5m");
    }
}
