use chrono_tz::Tz;

use crate::core::clock::Clock;
use crate::domain::jumuah::JumuahSchedule;
use crate::domain::prayer::{IqamaRule, PrayerSchedule, MAX_IQAMA_OFFSET_MINUTES};
use crate::storage::{self, DocumentId, StorageBackend};
use crate::times::ClockTime;

use super::{ServiceError, ServiceResult};

/// Loads, validates, and persists the prayer and Jumuah schedule documents.
pub struct ScheduleService;

impl ScheduleService {
    pub fn load_prayer_schedule(backend: &dyn StorageBackend) -> ServiceResult<PrayerSchedule> {
        Ok(storage::load_document(backend, DocumentId::PrayerTimes)?)
    }

    /// Validates, stamps `last_updated` with the zone-local date, and saves.
    pub fn save_prayer_schedule(
        backend: &dyn StorageBackend,
        clock: &dyn Clock,
        tz: Tz,
        schedule: &mut PrayerSchedule,
    ) -> ServiceResult<()> {
        Self::validate_prayer_schedule(schedule)?;
        schedule.last_updated = Some(clock.today_in(tz));
        storage::save_document(backend, DocumentId::PrayerTimes, schedule)?;
        tracing::info!("prayer schedule saved");
        Ok(())
    }

    pub fn validate_prayer_schedule(schedule: &PrayerSchedule) -> ServiceResult<()> {
        for (prayer, entry) in schedule.iter() {
            if ClockTime::parse(&entry.adhan).is_none() {
                return Err(ServiceError::Invalid(format!(
                    "{prayer} adhan time `{}` is not H:MM AM/PM",
                    entry.adhan
                )));
            }
            match &entry.iqama {
                IqamaRule::Fixed { time } => {
                    // An empty fixed time is "not yet entered" and renders
                    // as the placeholder; anything else must parse.
                    if !time.is_empty() && ClockTime::parse(time).is_none() {
                        return Err(ServiceError::Invalid(format!(
                            "{prayer} iqama time `{time}` is not H:MM AM/PM"
                        )));
                    }
                }
                IqamaRule::Offset { minutes } => {
                    if *minutes > MAX_IQAMA_OFFSET_MINUTES {
                        return Err(ServiceError::Invalid(format!(
                            "{prayer} iqama offset {minutes} exceeds {MAX_IQAMA_OFFSET_MINUTES} minutes"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn load_jumuah_schedule(backend: &dyn StorageBackend) -> ServiceResult<JumuahSchedule> {
        Ok(storage::load_document(backend, DocumentId::JumuahTimes)?)
    }

    pub fn save_jumuah_schedule(
        backend: &dyn StorageBackend,
        clock: &dyn Clock,
        tz: Tz,
        schedule: &mut JumuahSchedule,
    ) -> ServiceResult<()> {
        Self::validate_jumuah_schedule(schedule)?;
        schedule.last_updated = Some(clock.today_in(tz));
        storage::save_document(backend, DocumentId::JumuahTimes, schedule)?;
        tracing::info!("jumuah schedule saved");
        Ok(())
    }

    pub fn validate_jumuah_schedule(schedule: &JumuahSchedule) -> ServiceResult<()> {
        let sessions = [
            ("first khutbah", &schedule.first.khutbah),
            ("first prayer", &schedule.first.prayer),
            ("second khutbah", &schedule.second.khutbah),
            ("second prayer", &schedule.second.prayer),
        ];
        for (label, time) in sessions {
            if ClockTime::parse(time).is_none() {
                return Err(ServiceError::Invalid(format!(
                    "{label} time `{time}` is not H:MM AM/PM"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prayer::{Prayer, TimeField};

    #[test]
    fn default_schedules_validate() {
        assert!(ScheduleService::validate_prayer_schedule(&PrayerSchedule::default()).is_ok());
        assert!(ScheduleService::validate_jumuah_schedule(&JumuahSchedule::default()).is_ok());
    }

    #[test]
    fn garbled_adhan_fails_validation() {
        let mut schedule = PrayerSchedule::default();
        schedule.fajr.adhan = "soon".to_string();
        let err = ScheduleService::validate_prayer_schedule(&schedule)
            .expect_err("garbled time must fail");
        assert!(format!("{err}").contains("fajr"));
    }

    #[test]
    fn empty_fixed_iqama_is_tolerated() {
        let mut schedule = PrayerSchedule::default();
        schedule.isha.iqama = IqamaRule::Fixed {
            time: String::new(),
        };
        assert!(ScheduleService::validate_prayer_schedule(&schedule).is_ok());
    }

    #[test]
    fn offset_edits_stay_within_cap() {
        let mut schedule = PrayerSchedule::default();
        schedule
            .apply_field(Prayer::Fajr, TimeField::IqamaOffset, "15")
            .expect("valid offset");
        assert!(ScheduleService::validate_prayer_schedule(&schedule).is_ok());
    }

    #[test]
    fn bad_jumuah_session_is_named_in_error() {
        let mut schedule = JumuahSchedule::default();
        schedule.second.prayer = "2:75 PM".to_string();
        let err = ScheduleService::validate_jumuah_schedule(&schedule)
            .expect_err("invalid session must fail");
        assert!(format!("{err}").contains("second prayer"));
    }
}
