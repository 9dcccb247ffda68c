use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One Friday congregation: khutbah start and prayer start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumuahSession {
    pub khutbah: String,
    pub prayer: String,
}

impl JumuahSession {
    pub fn new(khutbah: &str, prayer: &str) -> JumuahSession {
        JumuahSession {
            khutbah: khutbah.to_string(),
            prayer: prayer.to_string(),
        }
    }
}

/// The Jumuah-times document: two sessions, as published in the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumuahSchedule {
    pub first: JumuahSession,
    pub second: JumuahSession,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDate>,
}

impl Default for JumuahSchedule {
    fn default() -> Self {
        JumuahSchedule {
            first: JumuahSession::new("12:30 PM", "1:00 PM"),
            second: JumuahSession::new("1:45 PM", "2:15 PM"),
            last_updated: None,
        }
    }
}

impl JumuahSchedule {
    pub fn session(&self, index: usize) -> Option<&JumuahSession> {
        match index {
            0 => Some(&self.first),
            1 => Some(&self.second),
            _ => None,
        }
    }

    pub fn session_mut(&mut self, index: usize) -> Option<&mut JumuahSession> {
        match index {
            0 => Some(&mut self.first),
            1 => Some(&mut self.second),
            _ => None,
        }
    }
}
