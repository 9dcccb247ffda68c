use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Displayable, Identifiable};
use crate::errors::CoreError;

/// Event categories offered by the app's event feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Lecture,
    Community,
    Youth,
    Women,
    Education,
    Charity,
    Other,
}

impl Default for EventCategory {
    fn default() -> Self {
        EventCategory::Other
    }
}

impl EventCategory {
    pub fn parse(raw: &str) -> Option<EventCategory> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "lecture" => Some(EventCategory::Lecture),
            "community" => Some(EventCategory::Community),
            "youth" => Some(EventCategory::Youth),
            "women" => Some(EventCategory::Women),
            "education" => Some(EventCategory::Education),
            "charity" => Some(EventCategory::Charity),
            "other" => Some(EventCategory::Other),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::Lecture => "lecture",
            EventCategory::Community => "community",
            EventCategory::Youth => "youth",
            EventCategory::Women => "women",
            EventCategory::Education => "education",
            EventCategory::Charity => "charity",
            EventCategory::Other => "other",
        }
    }
}

/// A mosque event published to the mobile app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    /// Start time as a display string, e.g. `7:00 PM`.
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub category: EventCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub rsvp_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsvp_limit: Option<u32>,
    #[serde(default)]
    pub rsvp_count: u32,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Event {
    pub fn new(title: &str, date: NaiveDate, time: &str, category: EventCategory) -> Event {
        Event {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            date,
            time: time.to_string(),
            location: None,
            category,
            speaker: None,
            image_url: None,
            rsvp_enabled: false,
            rsvp_limit: None,
            rsvp_count: 0,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    /// Registers one attendee, enforcing the RSVP limit when one is set.
    pub fn register_rsvp(&mut self) -> Result<u32, CoreError> {
        if !self.rsvp_enabled {
            return Err(CoreError::Invalid(format!(
                "RSVP is not enabled for `{}`",
                self.title
            )));
        }
        if let Some(limit) = self.rsvp_limit {
            if self.rsvp_count >= limit {
                return Err(CoreError::Invalid(format!(
                    "`{}` is full ({limit} attendees)",
                    self.title
                )));
            }
        }
        self.rsvp_count += 1;
        Ok(self.rsvp_count)
    }
}

impl Identifiable for Event {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Event {
    fn display_label(&self) -> String {
        format!("{} ({} {})", self.title, self.date, self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> Event {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        Event::new("Friday Lecture", date, "7:00 PM", EventCategory::Lecture)
    }

    #[test]
    fn rsvp_respects_limit() {
        let mut event = sample_event();
        event.rsvp_enabled = true;
        event.rsvp_limit = Some(2);
        assert_eq!(event.register_rsvp().unwrap(), 1);
        assert_eq!(event.register_rsvp().unwrap(), 2);
        assert!(event.register_rsvp().is_err());
        assert_eq!(event.rsvp_count, 2);
    }

    #[test]
    fn rsvp_requires_enablement() {
        let mut event = sample_event();
        assert!(event.register_rsvp().is_err());
        assert_eq!(event.rsvp_count, 0);
    }

    #[test]
    fn unlimited_rsvp_keeps_counting() {
        let mut event = sample_event();
        event.rsvp_enabled = true;
        for expected in 1..=5 {
            assert_eq!(event.register_rsvp().unwrap(), expected);
        }
    }
}
