//! Calendars resource: secondary calendar metadata.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::instrument;

use crate::error::NormalizedError;
use crate::resource::{Call, Operation, Request, ResourceCore};
use crate::types::{Cleared, Deleted};

const GET: Operation = Operation::get("Calendars.get");
const INSERT: Operation = Operation::post("Calendars.insert");
const UPDATE: Operation = Operation::put("Calendars.update");
const PATCH: Operation = Operation::patch("Calendars.patch");
const DELETE: Operation = Operation::delete("Calendars.delete");
// Either status means the calendar is empty.
const CLEAR: Operation = Operation::new("Calendars.clear", Call::Post, &[200, 204]);

#[derive(Clone)]
pub struct Calendars {
    core: ResourceCore,
}

impl Calendars {
    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    /// # Errors
    /// Validation, status or transport failures tagged `Calendars.get`.
    #[instrument(skip(self), level = "info")]
    pub async fn get(&self, calendar_id: &str) -> Result<Value, NormalizedError> {
        GET.require(calendar_id, "calendarId")?;
        self.core
            .body(&GET, Request::new(self.core.url(&[calendar_id])))
            .await
    }

    /// Create a secondary calendar.
    ///
    /// # Errors
    /// Validation, status or transport failures tagged `Calendars.insert`.
    #[instrument(skip(self, calendar), level = "info")]
    pub async fn insert<B: Serialize + ?Sized>(&self, calendar: &B) -> Result<Value, NormalizedError> {
        let body = INSERT.body(calendar)?;
        self.core
            .body(&INSERT, Request::new(self.core.url(&[])).body(body))
            .await
    }

    /// # Errors
    /// Validation, status or transport failures tagged `Calendars.update`.
    #[instrument(skip(self, calendar), level = "info")]
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        calendar_id: &str,
        calendar: &B,
    ) -> Result<Value, NormalizedError> {
        UPDATE.require(calendar_id, "calendarId")?;
        let body = UPDATE.body(calendar)?;
        self.core
            .body(&UPDATE, Request::new(self.core.url(&[calendar_id])).body(body))
            .await
    }

    /// # Errors
    /// Validation, status or transport failures tagged `Calendars.patch`.
    #[instrument(skip(self, changes), level = "info")]
    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        calendar_id: &str,
        changes: &B,
    ) -> Result<Value, NormalizedError> {
        PATCH.require(calendar_id, "calendarId")?;
        let body = PATCH.body(changes)?;
        self.core
            .body(&PATCH, Request::new(self.core.url(&[calendar_id])).body(body))
            .await
    }

    /// Delete a secondary calendar.
    ///
    /// # Errors
    /// Validation, status or transport failures tagged `Calendars.delete`.
    #[instrument(skip(self), level = "info")]
    pub async fn delete(&self, calendar_id: &str) -> Result<Deleted, NormalizedError> {
        DELETE.require(calendar_id, "calendarId")?;
        let reply = self
            .core
            .send(&DELETE, Request::new(self.core.url(&[calendar_id])))
            .await?;

        Ok(Deleted {
            id: calendar_id.to_string(),
            status_code: reply.status_code,
            status_message: reply.status_message,
            message: "Calendar deleted successfully".to_string(),
        })
    }

    /// Delete every event on a primary calendar. Clearing twice succeeds twice.
    ///
    /// # Errors
    /// Validation, status or transport failures tagged `Calendars.clear`.
    #[instrument(skip(self), level = "info")]
    pub async fn clear(&self, calendar_id: &str) -> Result<Cleared, NormalizedError> {
        CLEAR.require(calendar_id, "calendarId")?;
        let url = self.core.url(&[calendar_id, "clear"]);
        let reply = self
            .core
            .send(&CLEAR, Request::new(url).body(json!({})))
            .await?;

        Ok(Cleared {
            calendar_id: calendar_id.to_string(),
            status_code: reply.status_code,
            message: "Calendar cleared successfully".to_string(),
        })
    }
}
