//! CalendarList resource: the calendars on the account's list (`users/me/calendarList`).

use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::{ErrorDetail, NormalizedError};
use crate::resource::{Operation, Request, ResourceCore};
use crate::rest::QueryParams;
use crate::types::{Deleted, WatchRequest};

const LIST: Operation = Operation::get("CalendarList.list");
const GET: Operation = Operation::get("CalendarList.get");
const INSERT: Operation = Operation::post("CalendarList.insert");
const UPDATE: Operation = Operation::put("CalendarList.update");
const PATCH: Operation = Operation::patch("CalendarList.patch");
const DELETE: Operation = Operation::delete("CalendarList.delete");
const WATCH: Operation = Operation::post("CalendarList.watch");

#[derive(Clone)]
pub struct CalendarList {
    core: ResourceCore,
}

impl CalendarList {
    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    /// # Errors
    /// Status or transport failures tagged `CalendarList.list`.
    #[instrument(skip(self, query), level = "info")]
    pub async fn list(&self, query: &QueryParams) -> Result<Vec<Value>, NormalizedError> {
        self.core
            .items(&LIST, Request::new(self.core.url(&[])).query(query.clone()))
            .await
    }

    /// # Errors
    /// Validation, status or transport failures tagged `CalendarList.get`.
    #[instrument(skip(self), level = "info")]
    pub async fn get(&self, calendar_id: &str) -> Result<Value, NormalizedError> {
        GET.require(calendar_id, "calendarId")?;
        self.core
            .body(&GET, Request::new(self.core.url(&[calendar_id])))
            .await
    }

    /// Add an existing calendar to the list. `entry` must be a JSON object;
    /// its `id` is set to `calendar_id`.
    ///
    /// # Errors
    /// Validation, status or transport failures tagged `CalendarList.insert`.
    #[instrument(skip(self, entry, query), level = "info")]
    pub async fn insert<B: Serialize + ?Sized>(
        &self,
        calendar_id: &str,
        entry: &B,
        query: &QueryParams,
    ) -> Result<Value, NormalizedError> {
        INSERT.require(calendar_id, "calendarId")?;
        let body = match INSERT.body(entry)? {
            Value::Object(mut map) => {
                map.insert("id".to_string(), Value::String(calendar_id.to_string()));
                Value::Object(map)
            }
            Value::Null => serde_json::json!({ "id": calendar_id }),
            _ => {
                return Err(INSERT.fail(ErrorDetail::Validation(
                    "CalendarList entry must be a JSON object".to_string(),
                )))
            }
        };

        self.core
            .body(
                &INSERT,
                Request::new(self.core.url(&[])).query(query.clone()).body(body),
            )
            .await
    }

    /// # Errors
    /// Validation, status or transport failures tagged `CalendarList.update`.
    #[instrument(skip(self, entry, query), level = "info")]
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        calendar_id: &str,
        entry: &B,
        query: &QueryParams,
    ) -> Result<Value, NormalizedError> {
        UPDATE.require(calendar_id, "calendarId")?;
        let body = UPDATE.body(entry)?;
        self.core
            .body(
                &UPDATE,
                Request::new(self.core.url(&[calendar_id]))
                    .query(query.clone())
                    .body(body),
            )
            .await
    }

    /// # Errors
    /// Validation, status or transport failures tagged `CalendarList.patch`.
    #[instrument(skip(self, changes, query), level = "info")]
    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        calendar_id: &str,
        changes: &B,
        query: &QueryParams,
    ) -> Result<Value, NormalizedError> {
        PATCH.require(calendar_id, "calendarId")?;
        let body = PATCH.body(changes)?;
        self.core
            .body(
                &PATCH,
                Request::new(self.core.url(&[calendar_id]))
                    .query(query.clone())
                    .body(body),
            )
            .await
    }

    /// Remove a calendar from the list without deleting it.
    ///
    /// # Errors
    /// Validation, status or transport failures tagged `CalendarList.delete`.
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
            message: "CalendarList entry deleted successfully".to_string(),
        })
    }

    /// # Errors
    /// Validation, status or transport failures tagged `CalendarList.watch`.
    #[instrument(skip(self, channel, query), level = "info")]
    pub async fn watch(
        &self,
        channel: &WatchRequest,
        query: &QueryParams,
    ) -> Result<Value, NormalizedError> {
        super::check_channel(&WATCH, channel)?;
        let body = WATCH.body(channel)?;
        self.core
            .body(
                &WATCH,
                Request::new(self.core.url(&["watch"]))
                    .query(query.clone())
                    .body(body),
            )
            .await
    }
}
