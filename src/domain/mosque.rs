use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::NamedEntity;

/// Basic mosque metadata shown in the mobile app.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MosqueProfile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imam: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDate>,
}

impl NamedEntity for MosqueProfile {
    fn name(&self) -> &str {
        &self.name
    }
}
