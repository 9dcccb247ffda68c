//! Daily prayer schedule: Adhan and Iqama times for the five prayers.
//!
//! The schedule is an explicit record keyed by the closed [`Prayer`]
//! enumeration rather than string-built field names, so every lookup is
//! checked at compile time and edits are validated at the boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoreError;
use crate::times::{offset_time, ClockTime, TIME_PLACEHOLDER};

/// Largest accepted Adhan-to-Iqama offset, in minutes.
pub const MAX_IQAMA_OFFSET_MINUTES: u16 = 120;

/// The five daily prayers, in day order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Prayer {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    pub const ALL: [Prayer; 5] = [
        Prayer::Fajr,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Prayer::Fajr => "fajr",
            Prayer::Dhuhr => "dhuhr",
            Prayer::Asr => "asr",
            Prayer::Maghrib => "maghrib",
            Prayer::Isha => "isha",
        }
    }

    pub fn parse(raw: &str) -> Option<Prayer> {
        Prayer::ALL
            .into_iter()
            .find(|prayer| prayer.name().eq_ignore_ascii_case(raw.trim()))
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The editable fields of a prayer entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Adhan,
    Iqama,
    IqamaType,
    IqamaOffset,
}

impl TimeField {
    pub fn parse(raw: &str) -> Option<TimeField> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "adhan" => Some(TimeField::Adhan),
            "iqama" => Some(TimeField::Iqama),
            "iqama_type" => Some(TimeField::IqamaType),
            "iqama_offset" => Some(TimeField::IqamaOffset),
            _ => None,
        }
    }
}

/// How the Iqama time for a prayer is determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IqamaRule {
    /// A staff-entered time string.
    Fixed { time: String },
    /// Derived from the Adhan by a minute offset.
    Offset { minutes: u16 },
}

impl Default for IqamaRule {
    fn default() -> Self {
        IqamaRule::Fixed {
            time: String::new(),
        }
    }
}

/// Adhan time plus the Iqama rule for one prayer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerEntry {
    pub adhan: String,
    #[serde(default)]
    pub iqama: IqamaRule,
}

impl PrayerEntry {
    pub fn fixed(adhan: &str, iqama: &str) -> PrayerEntry {
        PrayerEntry {
            adhan: adhan.to_string(),
            iqama: IqamaRule::Fixed {
                time: iqama.to_string(),
            },
        }
    }

    /// The Iqama time to display: the stored string re-encoded canonically,
    /// or the Adhan shifted by the configured offset. Degenerate state
    /// renders the placeholder.
    pub fn effective_iqama(&self) -> String {
        match &self.iqama {
            IqamaRule::Fixed { time } => match ClockTime::parse(time) {
                Some(parsed) => parsed.to_string(),
                None => TIME_PLACEHOLDER.to_string(),
            },
            IqamaRule::Offset { minutes } => offset_time(&self.adhan, *minutes as i64),
        }
    }
}

/// The prayer-times document persisted for the mobile app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerSchedule {
    pub fajr: PrayerEntry,
    pub dhuhr: PrayerEntry,
    pub asr: PrayerEntry,
    pub maghrib: PrayerEntry,
    pub isha: PrayerEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDate>,
}

impl Default for PrayerSchedule {
    fn default() -> Self {
        PrayerSchedule {
            fajr: PrayerEntry::fixed("5:30 AM", "5:45 AM"),
            dhuhr: PrayerEntry::fixed("12:45 PM", "1:00 PM"),
            asr: PrayerEntry::fixed("4:15 PM", "4:30 PM"),
            maghrib: PrayerEntry::fixed("7:20 PM", "7:25 PM"),
            isha: PrayerEntry::fixed("8:45 PM", "9:00 PM"),
            last_updated: None,
        }
    }
}

impl PrayerSchedule {
    pub fn entry(&self, prayer: Prayer) -> &PrayerEntry {
        match prayer {
            Prayer::Fajr => &self.fajr,
            Prayer::Dhuhr => &self.dhuhr,
            Prayer::Asr => &self.asr,
            Prayer::Maghrib => &self.maghrib,
            Prayer::Isha => &self.isha,
        }
    }

    pub fn entry_mut(&mut self, prayer: Prayer) -> &mut PrayerEntry {
        match prayer {
            Prayer::Fajr => &mut self.fajr,
            Prayer::Dhuhr => &mut self.dhuhr,
            Prayer::Asr => &mut self.asr,
            Prayer::Maghrib => &mut self.maghrib,
            Prayer::Isha => &mut self.isha,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Prayer, &PrayerEntry)> {
        Prayer::ALL
            .into_iter()
            .map(move |prayer| (prayer, self.entry(prayer)))
    }

    /// Applies one field edit, validating the raw value first.
    pub fn apply_field(
        &mut self,
        prayer: Prayer,
        field: TimeField,
        value: &str,
    ) -> Result<(), CoreError> {
        let entry = self.entry_mut(prayer);
        match field {
            TimeField::Adhan => {
                let parsed = ClockTime::parse(value).ok_or_else(|| {
                    CoreError::Invalid(format!("{prayer} adhan time `{value}` is not H:MM AM/PM"))
                })?;
                entry.adhan = parsed.to_string();
            }
            TimeField::Iqama => {
                let parsed = ClockTime::parse(value).ok_or_else(|| {
                    CoreError::Invalid(format!("{prayer} iqama time `{value}` is not H:MM AM/PM"))
                })?;
                entry.iqama = IqamaRule::Fixed {
                    time: parsed.to_string(),
                };
            }
            TimeField::IqamaType => match value.trim().to_ascii_lowercase().as_str() {
                "fixed" => {
                    if !matches!(entry.iqama, IqamaRule::Fixed { .. }) {
                        let current = entry.effective_iqama();
                        let time = if current == TIME_PLACEHOLDER {
                            String::new()
                        } else {
                            current
                        };
                        entry.iqama = IqamaRule::Fixed { time };
                    }
                }
                "offset" => {
                    if !matches!(entry.iqama, IqamaRule::Offset { .. }) {
                        entry.iqama = IqamaRule::Offset { minutes: 0 };
                    }
                }
                other => {
                    return Err(CoreError::Invalid(format!(
                        "iqama type must be `fixed` or `offset`, got `{other}`"
                    )))
                }
            },
            TimeField::IqamaOffset => {
                let minutes: u16 = value.trim().parse().map_err(|_| {
                    CoreError::Invalid(format!("iqama offset `{value}` is not a whole minute count"))
                })?;
                if minutes > MAX_IQAMA_OFFSET_MINUTES {
                    return Err(CoreError::Invalid(format!(
                        "iqama offset {minutes} exceeds {MAX_IQAMA_OFFSET_MINUTES} minutes"
                    )));
                }
                entry.iqama = IqamaRule::Offset { minutes };
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_parses_cleanly() {
        let schedule = PrayerSchedule::default();
        for (prayer, entry) in schedule.iter() {
            assert!(
                ClockTime::parse(&entry.adhan).is_some(),
                "{prayer} adhan unparseable"
            );
            assert_ne!(entry.effective_iqama(), TIME_PLACEHOLDER);
        }
    }

    #[test]
    fn apply_field_canonicalizes_adhan() {
        let mut schedule = PrayerSchedule::default();
        schedule
            .apply_field(Prayer::Fajr, TimeField::Adhan, "5:05 am")
            .expect("valid edit");
        assert_eq!(schedule.fajr.adhan, "5:05 AM");
    }

    #[test]
    fn apply_field_rejects_bad_time() {
        let mut schedule = PrayerSchedule::default();
        let err = schedule
            .apply_field(Prayer::Isha, TimeField::Iqama, "25:00 PM")
            .expect_err("invalid time must be rejected");
        assert!(format!("{err}").contains("isha"));
    }

    #[test]
    fn offset_rule_derives_iqama_from_adhan() {
        let mut schedule = PrayerSchedule::default();
        schedule
            .apply_field(Prayer::Dhuhr, TimeField::IqamaOffset, "20")
            .expect("valid offset");
        assert_eq!(schedule.dhuhr.effective_iqama(), "1:05 PM");
    }

    #[test]
    fn offset_above_cap_is_rejected() {
        let mut schedule = PrayerSchedule::default();
        assert!(schedule
            .apply_field(Prayer::Asr, TimeField::IqamaOffset, "121")
            .is_err());
    }

    #[test]
    fn zero_offset_renders_placeholder() {
        let mut schedule = PrayerSchedule::default();
        schedule
            .apply_field(Prayer::Asr, TimeField::IqamaType, "offset")
            .expect("switch to offset");
        assert_eq!(schedule.asr.effective_iqama(), TIME_PLACEHOLDER);
    }

    #[test]
    fn switching_back_to_fixed_keeps_effective_time() {
        let mut schedule = PrayerSchedule::default();
        schedule
            .apply_field(Prayer::Maghrib, TimeField::IqamaOffset, "10")
            .expect("offset");
        schedule
            .apply_field(Prayer::Maghrib, TimeField::IqamaType, "fixed")
            .expect("back to fixed");
        assert_eq!(
            schedule.maghrib.iqama,
            IqamaRule::Fixed {
                time: "7:30 PM".to_string()
            }
        );
    }
}
