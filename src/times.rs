//! Twelve-hour clock parsing and the Iqama offset helper.
//!
//! Times are carried as display strings of the form `H:MM AM|PM` throughout
//! the schedule documents. Everything here is total: degenerate input renders
//! the placeholder instead of failing, so a half-typed form never crashes a
//! caller.

use std::fmt;

/// Rendered when a time cannot be computed or parsed.
pub const TIME_PLACEHOLDER: &str = "--:--";

const MINUTES_PER_DAY: i64 = 24 * 60;

/// A wall-clock time of day, stored as minutes past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockTime {
    minute_of_day: u32,
}

impl ClockTime {
    /// Parses `H:MM AM|PM` (hours 1-12, minutes 00-59, case-insensitive
    /// meridiem, optional whitespace before it). Anything else is `None`.
    pub fn parse(raw: &str) -> Option<ClockTime> {
        let raw = raw.trim();
        let (hour_part, rest) = raw.split_once(':')?;
        if hour_part.is_empty()
            || hour_part.len() > 2
            || !hour_part.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let hour: u32 = hour_part.parse().ok()?;
        if !(1..=12).contains(&hour) {
            return None;
        }
        if rest.len() < 2 || !rest.is_char_boundary(2) {
            return None;
        }
        let (minute_part, meridiem_part) = rest.split_at(2);
        if !minute_part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let minute: u32 = minute_part.parse().ok()?;
        if minute > 59 {
            return None;
        }
        let hour24 = match meridiem_part.trim().to_ascii_uppercase().as_str() {
            "AM" => {
                if hour == 12 {
                    0
                } else {
                    hour
                }
            }
            "PM" => {
                if hour == 12 {
                    12
                } else {
                    hour + 12
                }
            }
            _ => return None,
        };
        Some(ClockTime {
            minute_of_day: hour24 * 60 + minute,
        })
    }

    /// Minutes past midnight, in `0..1440`.
    pub fn minute_of_day(&self) -> u32 {
        self.minute_of_day
    }

    /// Adds a (possibly negative) minute offset, wrapping at 24 hours.
    pub fn plus_minutes(&self, offset: i64) -> ClockTime {
        let total = self.minute_of_day as i64 + offset;
        let wrapped = total.rem_euclid(MINUTES_PER_DAY);
        ClockTime {
            minute_of_day: wrapped as u32,
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hour24 = self.minute_of_day / 60;
        let minute = self.minute_of_day % 60;
        let meridiem = if hour24 >= 12 { "PM" } else { "AM" };
        let display_hour = match hour24 {
            0 => 12,
            h if h > 12 => h - 12,
            h => h,
        };
        write!(f, "{}:{:02} {}", display_hour, minute, meridiem)
    }
}

/// Derives an Iqama time from an Adhan time plus a minute offset.
///
/// A zero offset means "no derivation configured" and yields the placeholder,
/// as does an unparseable base time. Display helper, not a validator.
pub fn offset_time(base: &str, offset_minutes: i64) -> String {
    if offset_minutes == 0 {
        return TIME_PLACEHOLDER.to_string();
    }
    match ClockTime::parse(base) {
        Some(time) => time.plus_minutes(offset_minutes).to_string(),
        None => TIME_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_canonicalizes() {
        let time = ClockTime::parse(" 5:07 pm ").expect("valid time");
        assert_eq!(time.to_string(), "5:07 PM");
        assert_eq!(time.minute_of_day(), 17 * 60 + 7);
    }

    #[test]
    fn noon_and_midnight_map_correctly() {
        assert_eq!(ClockTime::parse("12:00 AM").unwrap().minute_of_day(), 0);
        assert_eq!(
            ClockTime::parse("12:00 PM").unwrap().minute_of_day(),
            12 * 60
        );
        assert_eq!(ClockTime::parse("12:00 AM").unwrap().to_string(), "12:00 AM");
    }

    #[test]
    fn rejects_out_of_pattern_input() {
        for raw in [
            "", "13:00 PM", "0:30 AM", "5:60 AM", "5:3 AM", "5:30", "5-30 AM", "not-a-time",
            "5:30 XM", "123:00 AM",
        ] {
            assert!(ClockTime::parse(raw).is_none(), "accepted {raw:?}");
        }
    }

    #[test]
    fn offset_rolls_over_midnight() {
        assert_eq!(offset_time("11:50 PM", 15), "12:05 AM");
    }

    #[test]
    fn zero_offset_yields_placeholder() {
        assert_eq!(offset_time("12:00 PM", 0), TIME_PLACEHOLDER);
    }

    #[test]
    fn unparseable_base_yields_placeholder() {
        assert_eq!(offset_time("not-a-time", 15), TIME_PLACEHOLDER);
    }

    #[test]
    fn negative_offsets_wrap_backwards() {
        assert_eq!(offset_time("12:05 AM", -15), "11:50 PM");
    }

    #[test]
    fn offset_round_trips_for_typical_range() {
        for minute_of_day in (0..24 * 60).step_by(7) {
            let base = ClockTime {
                minute_of_day: minute_of_day as u32,
            }
            .to_string();
            for offset in (1..=120).step_by(13) {
                let shifted = offset_time(&base, offset);
                let restored = offset_time(&shifted, -offset);
                assert_eq!(restored, base, "offset {offset} from {base}");
            }
        }
    }
}
