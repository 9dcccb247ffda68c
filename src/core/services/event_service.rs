use uuid::Uuid;

use crate::core::clock::Clock;
use crate::domain::event::Event;
use crate::storage::{self, DocumentId, StorageBackend};
use crate::times::ClockTime;

use super::{ServiceError, ServiceResult};

/// CRUD over the events document.
pub struct EventService;

impl EventService {
    /// All events, soonest first.
    pub fn list(backend: &dyn StorageBackend) -> ServiceResult<Vec<Event>> {
        let mut events: Vec<Event> = storage::load_document(backend, DocumentId::Events)?;
        events.sort_by(|a, b| {
            let a_time = ClockTime::parse(&a.time);
            let b_time = ClockTime::parse(&b.time);
            (a.date, a_time).cmp(&(b.date, b_time))
        });
        Ok(events)
    }

    /// Inserts or replaces an event by id, stamping `updated_at`.
    pub fn upsert(
        backend: &dyn StorageBackend,
        clock: &dyn Clock,
        mut event: Event,
    ) -> ServiceResult<Event> {
        Self::validate(&event)?;
        let now = clock.now();
        event.updated_at = Some(now);
        if event.created_at.is_none() {
            event.created_at = Some(now);
        }
        let mut events: Vec<Event> = storage::load_document(backend, DocumentId::Events)?;
        match events.iter_mut().find(|existing| existing.id == event.id) {
            Some(existing) => *existing = event.clone(),
            None => events.push(event.clone()),
        }
        storage::save_document(backend, DocumentId::Events, &events)?;
        tracing::info!(event = %event.title, "event saved");
        Ok(event)
    }

    pub fn validate(event: &Event) -> ServiceResult<()> {
        if event.title.trim().is_empty() {
            return Err(ServiceError::Invalid("event title is required".into()));
        }
        if ClockTime::parse(&event.time).is_none() {
            return Err(ServiceError::Invalid(format!(
                "event time `{}` is not H:MM AM/PM",
                event.time
            )));
        }
        if let Some(limit) = event.rsvp_limit {
            if event.rsvp_count > limit {
                return Err(ServiceError::Invalid(format!(
                    "RSVP count {} exceeds the limit {limit}",
                    event.rsvp_count
                )));
            }
        }
        Ok(())
    }

    /// Removes an event; `false` when the id was unknown.
    pub fn delete(backend: &dyn StorageBackend, id: Uuid) -> ServiceResult<bool> {
        let mut events: Vec<Event> = storage::load_document(backend, DocumentId::Events)?;
        let before = events.len();
        events.retain(|event| event.id != id);
        if events.len() == before {
            return Ok(false);
        }
        storage::save_document(backend, DocumentId::Events, &events)?;
        Ok(true)
    }

    pub fn set_active(
        backend: &dyn StorageBackend,
        id: Uuid,
        active: bool,
    ) -> ServiceResult<bool> {
        let mut events: Vec<Event> = storage::load_document(backend, DocumentId::Events)?;
        let Some(event) = events.iter_mut().find(|event| event.id == id) else {
            return Ok(false);
        };
        event.is_active = active;
        storage::save_document(backend, DocumentId::Events, &events)?;
        Ok(true)
    }

    /// Registers an RSVP against a stored event, returning the new count.
    pub fn register_rsvp(backend: &dyn StorageBackend, id: Uuid) -> ServiceResult<u32> {
        let mut events: Vec<Event> = storage::load_document(backend, DocumentId::Events)?;
        let Some(event) = events.iter_mut().find(|event| event.id == id) else {
            return Err(ServiceError::Invalid(format!("no event with id {id}")));
        };
        let count = event.register_rsvp()?;
        storage::save_document(backend, DocumentId::Events, &events)?;
        Ok(count)
    }
}
