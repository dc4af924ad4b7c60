//! Events resource: `calendars/{calendarId}/events`.

use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::NormalizedError;
use crate::resource::{Operation, Request, ResourceCore};
use crate::rest::QueryParams;
use crate::types::{DeleteOptions, Deleted, EventListQuery, WatchRequest};

const LIST: Operation = Operation::get("Events.list");
const GET: Operation = Operation::get("Events.get");
const INSERT: Operation = Operation::post("Events.insert");
const UPDATE: Operation = Operation::put("Events.update");
const PATCH: Operation = Operation::patch("Events.patch");
const DELETE: Operation = Operation::delete("Events.delete");
const INSTANCES: Operation = Operation::get("Events.instances");
const MOVE: Operation = Operation::post_query("Events.move");
const QUICK_ADD: Operation = Operation::post_query("Events.quickAdd");
const WATCH: Operation = Operation::post("Events.watch");

#[derive(Clone)]
pub struct Events {
    core: ResourceCore,
}

impl Events {
    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    fn check_ids(op: &Operation, calendar_id: &str, event_id: &str) -> Result<(), NormalizedError> {
        op.require(calendar_id, "calendarId")?;
        op.require(event_id, "eventId")
    }

    /// List events on a calendar, e.g. between `timeMin` and `timeMax`.
    ///
    /// # Errors
    /// Validation, status or transport failures tagged `Events.list`.
    #[instrument(skip(self, query), level = "info")]
    pub async fn list(
        &self,
        calendar_id: &str,
        query: &EventListQuery,
    ) -> Result<Vec<Value>, NormalizedError> {
        LIST.require(calendar_id, "calendarId")?;
        let url = self.core.url(&[calendar_id, "events"]);
        self.core
            .items(&LIST, Request::new(url).query(query.to_query()))
            .await
    }

    /// # Errors
    /// Validation, status or transport failures tagged `Events.get`.
    #[instrument(skip(self, query), level = "info")]
    pub async fn get(
        &self,
        calendar_id: &str,
        event_id: &str,
        query: &QueryParams,
    ) -> Result<Value, NormalizedError> {
        Self::check_ids(&GET, calendar_id, event_id)?;
        let url = self.core.url(&[calendar_id, "events", event_id]);
        self.core
            .body(&GET, Request::new(url).query(query.clone()))
            .await
    }

    /// Create an event; `event` is usually an [`EventInput`](crate::types::EventInput).
    ///
    /// # Errors
    /// Validation, status or transport failures tagged `Events.insert`.
    #[instrument(skip(self, event, query), level = "info")]
    pub async fn insert<B: Serialize + ?Sized>(
        &self,
        calendar_id: &str,
        event: &B,
        query: &QueryParams,
    ) -> Result<Value, NormalizedError> {
        INSERT.require(calendar_id, "calendarId")?;
        let body = INSERT.body(event)?;
        let url = self.core.url(&[calendar_id, "events"]);
        self.core
            .body(&INSERT, Request::new(url).query(query.clone()).body(body))
            .await
    }

    /// Replace an event.
    ///
    /// # Errors
    /// Validation, status or transport failures tagged `Events.update`.
    #[instrument(skip(self, event, query), level = "info")]
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        calendar_id: &str,
        event_id: &str,
        event: &B,
        query: &QueryParams,
    ) -> Result<Value, NormalizedError> {
        Self::check_ids(&UPDATE, calendar_id, event_id)?;
        let body = UPDATE.body(event)?;
        let url = self.core.url(&[calendar_id, "events", event_id]);
        self.core
            .body(&UPDATE, Request::new(url).query(query.clone()).body(body))
            .await
    }

    /// Update only the fields present in `changes`.
    ///
    /// # Errors
    /// Validation, status or transport failures tagged `Events.patch`.
    #[instrument(skip(self, changes, query), level = "info")]
    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        calendar_id: &str,
        event_id: &str,
        changes: &B,
        query: &QueryParams,
    ) -> Result<Value, NormalizedError> {
        Self::check_ids(&PATCH, calendar_id, event_id)?;
        let body = PATCH.body(changes)?;
        let url = self.core.url(&[calendar_id, "events", event_id]);
        self.core
            .body(&PATCH, Request::new(url).query(query.clone()).body(body))
            .await
    }

    /// # Errors
    /// Validation, status or transport failures tagged `Events.delete`.
    #[instrument(skip(self), level = "info")]
    pub async fn delete(
        &self,
        calendar_id: &str,
        event_id: &str,
        options: DeleteOptions,
    ) -> Result<Deleted, NormalizedError> {
        Self::check_ids(&DELETE, calendar_id, event_id)?;
        let url = self.core.url(&[calendar_id, "events", event_id]);
        let reply = self
            .core
            .send(&DELETE, Request::new(url).query(options.to_query()))
            .await?;

        Ok(Deleted {
            id: event_id.to_string(),
            status_code: reply.status_code,
            status_message: reply.status_message,
            message: "Event deleted successfully".to_string(),
        })
    }

    /// Instances of a recurring event.
    ///
    /// # Errors
    /// Validation, status or transport failures tagged `Events.instances`.
    #[instrument(skip(self, query), level = "info")]
    pub async fn instances(
        &self,
        calendar_id: &str,
        event_id: &str,
        query: &QueryParams,
    ) -> Result<Vec<Value>, NormalizedError> {
        Self::check_ids(&INSTANCES, calendar_id, event_id)?;
        let url = self.core.url(&[calendar_id, "events", event_id, "instances"]);
        self.core
            .items(&INSTANCES, Request::new(url).query(query.clone()))
            .await
    }

    /// Move an event to `destination`, changing its organizer.
    ///
    /// # Errors
    /// Validation, status or transport failures tagged `Events.move`.
    #[instrument(skip(self), level = "info")]
    pub async fn move_to(
        &self,
        calendar_id: &str,
        event_id: &str,
        destination: &str,
    ) -> Result<Value, NormalizedError> {
        Self::check_ids(&MOVE, calendar_id, event_id)?;
        MOVE.require(destination, "destination calendarId")?;
        let url = self.core.url(&[calendar_id, "events", event_id, "move"]);
        let query = QueryParams::new().set("destination", destination);
        self.core.body(&MOVE, Request::new(url).query(query)).await
    }

    /// Create an event from a text string such as "Lunch with Ana tomorrow 1pm".
    ///
    /// # Errors
    /// Validation, status or transport failures tagged `Events.quickAdd`.
    #[instrument(skip(self), level = "info")]
    pub async fn quick_add(&self, calendar_id: &str, text: &str) -> Result<Value, NormalizedError> {
        QUICK_ADD.require(calendar_id, "calendarId")?;
        if text.trim().is_empty() {
            return Err(NormalizedError::validation(
                QUICK_ADD.origin,
                "Missing text in required query parameters",
            ));
        }
        let url = self.core.url(&[calendar_id, "events", "quickAdd"]);
        let query = QueryParams::new().set("text", text);
        self.core
            .body(&QUICK_ADD, Request::new(url).query(query))
            .await
    }

    /// Watch for changes to events on a calendar.
    ///
    /// # Errors
    /// Validation, status or transport failures tagged `Events.watch`.
    #[instrument(skip(self, channel, query), level = "info")]
    pub async fn watch(
        &self,
        calendar_id: &str,
        channel: &WatchRequest,
        query: &QueryParams,
    ) -> Result<Value, NormalizedError> {
        WATCH.require(calendar_id, "calendarId")?;
        super::check_channel(&WATCH, channel)?;
        let body = WATCH.body(channel)?;
        let url = self.core.url(&[calendar_id, "events", "watch"]);
        self.core
            .body(&WATCH, Request::new(url).query(query.clone()).body(body))
            .await
    }
}
