//! Document persistence: fixed-id JSON documents with timestamped backups.

pub mod json_backend;

pub use json_backend::DocumentStore;

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::CoreError;

pub type Result<T> = std::result::Result<T, CoreError>;

/// The fixed set of documents the dashboard edits, mirroring the
/// original store's one-document-per-collection layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentId {
    PrayerTimes,
    JumuahTimes,
    MosqueProfile,
    Events,
    Campaigns,
    DonationSettings,
}

impl DocumentId {
    pub const ALL: [DocumentId; 6] = [
        DocumentId::PrayerTimes,
        DocumentId::JumuahTimes,
        DocumentId::MosqueProfile,
        DocumentId::Events,
        DocumentId::Campaigns,
        DocumentId::DonationSettings,
    ];

    pub fn file_stem(&self) -> &'static str {
        match self {
            DocumentId::PrayerTimes => "prayer_times",
            DocumentId::JumuahTimes => "jumuah_times",
            DocumentId::MosqueProfile => "mosque_profile",
            DocumentId::Events => "events",
            DocumentId::Campaigns => "campaigns",
            DocumentId::DonationSettings => "donation_settings",
        }
    }
}

/// Trait that abstracts interaction with the persistence layer.
pub trait StorageBackend: Send + Sync {
    /// Raw JSON for a document, `None` when it has never been saved.
    fn load_raw(&self, id: DocumentId) -> Result<Option<String>>;
    fn save_raw(&self, id: DocumentId, json: &str) -> Result<()>;
    /// Creates a timestamped backup, returning the backup file name.
    fn backup(&self, id: DocumentId, note: Option<&str>) -> Result<String>;
    /// Backup file names, newest first.
    fn list_backups(&self, id: DocumentId) -> Result<Vec<String>>;
    fn restore(&self, id: DocumentId, backup_name: &str) -> Result<()>;
}

/// Loads a typed document, falling back to its default when absent.
pub fn load_document<T>(backend: &dyn StorageBackend, id: DocumentId) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    match backend.load_raw(id)? {
        Some(data) => Ok(serde_json::from_str(&data)?),
        None => Ok(T::default()),
    }
}

/// Serializes and saves a typed document.
pub fn save_document<T>(backend: &dyn StorageBackend, id: DocumentId, document: &T) -> Result<()>
where
    T: Serialize,
{
    let json = serde_json::to_string_pretty(document)?;
    backend.save_raw(id, &json)
}
