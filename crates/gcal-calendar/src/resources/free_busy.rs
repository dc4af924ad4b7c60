//! Free/busy lookup for a single calendar.

use serde_json::{json, Value};
use tracing::instrument;

use crate::error::{ErrorDetail, NormalizedError};
use crate::resource::{Operation, Request, ResourceCore};
use crate::types::FreeBusyQuery;

const QUERY: Operation = Operation::post("FreeBusy.query");

#[derive(Clone)]
pub struct FreeBusy {
    core: ResourceCore,
    timezone: String,
}

impl FreeBusy {
    pub(crate) fn new(core: ResourceCore, timezone: String) -> Self {
        Self { core, timezone }
    }

    /// Timezone sent when a query names none.
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Busy intervals (`[{start, end}]`) of `calendar_id` within the range.
    ///
    /// # Errors
    /// Validation, status or transport failures tagged `FreeBusy.query`;
    /// `UnexpectedBody` when the calendar is missing from the reply or
    /// reports errors instead of busy times.
    #[instrument(skip(self, query), level = "info")]
    pub async fn query(
        &self,
        calendar_id: &str,
        query: &FreeBusyQuery,
    ) -> Result<Vec<Value>, NormalizedError> {
        QUERY.require(calendar_id, "calendarId")?;
        QUERY.require(&query.time_min, "timeMin")?;
        QUERY.require(&query.time_max, "timeMax")?;

        let time_zone = query
            .time_zone
            .as_deref()
            .filter(|tz| !tz.trim().is_empty())
            .unwrap_or(&self.timezone);
        let body = json!({
            "timeMin": query.time_min,
            "timeMax": query.time_max,
            "timeZone": time_zone,
            "items": [{ "id": calendar_id }],
        });

        let reply = self
            .core
            .body(&QUERY, Request::new(self.core.url(&[])).body(body))
            .await?;
        busy_of(calendar_id, reply)
    }
}

fn busy_of(calendar_id: &str, mut body: Value) -> Result<Vec<Value>, NormalizedError> {
    let unexpected = |detail: String| QUERY.fail(ErrorDetail::UnexpectedBody(detail));

    let Some(entry) = body
        .get_mut("calendars")
        .and_then(|calendars| calendars.get_mut(calendar_id))
        .map(Value::take)
    else {
        return Err(unexpected(format!(
            "no free/busy entry for calendar {}",
            calendar_id
        )));
    };

    if let Some(errors) = entry.get("errors").filter(|e| !is_empty(e)) {
        tracing::warn!(calendar_id, %errors, "Free/busy lookup reported errors");
        return Err(unexpected(format!(
            "free/busy errors for calendar {}: {}",
            calendar_id, errors
        )));
    }

    match entry {
        Value::Object(mut map) => match map.remove("busy") {
            Some(Value::Array(busy)) => Ok(busy),
            _ => Err(unexpected(format!(
                "free/busy entry for calendar {} has no busy list",
                calendar_id
            ))),
        },
        other => Err(unexpected(format!(
            "free/busy entry for calendar {} is not an object: {}",
            calendar_id, other
        ))),
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::test_support::{core, RecordingTransport};
    use crate::transport::ResourceResponse;
    use std::sync::Arc;

    const BASE: &str = "https://www.googleapis.com/calendar/v3/freeBusy";

    fn free_busy(transport: &Arc<RecordingTransport>) -> FreeBusy {
        FreeBusy::new(core(transport.clone(), BASE), "Asia/Singapore".to_string())
    }

    fn range() -> FreeBusyQuery {
        FreeBusyQuery::new("2016-04-29T00:00:00+08:00", "2016-04-30T00:00:00+08:00")
    }

    #[tokio::test]
    async fn test_returns_busy_for_calendar() {
        let busy = json!([{"start": "2016-04-29T06:00:00Z", "end": "2016-04-29T10:00:00Z"}]);
        let transport = RecordingTransport::replying(vec![Ok(ResourceResponse::new(
            200,
            json!({
                "kind": "calendar#freeBusy",
                "calendars": {"room-1@resource.calendar.google.com": {"busy": busy}}
            }),
        ))]);

        let intervals = free_busy(&transport)
            .query("room-1@resource.calendar.google.com", &range())
            .await
            .unwrap();

        assert_eq!(Value::Array(intervals), busy);
    }

    #[tokio::test]
    async fn test_injects_configured_timezone() {
        let transport = RecordingTransport::replying(vec![Ok(ResourceResponse::new(
            200,
            json!({"calendars": {"cal1": {"busy": []}}}),
        ))]);

        free_busy(&transport).query("cal1", &range()).await.unwrap();

        let request = transport.last().unwrap();
        assert_eq!(request.url, BASE);
        assert_eq!(
            request.body.unwrap(),
            json!({
                "timeMin": "2016-04-29T00:00:00+08:00",
                "timeMax": "2016-04-30T00:00:00+08:00",
                "timeZone": "Asia/Singapore",
                "items": [{"id": "cal1"}]
            })
        );
    }

    #[tokio::test]
    async fn test_caller_timezone_wins() {
        let transport = RecordingTransport::replying(vec![Ok(ResourceResponse::new(
            200,
            json!({"calendars": {"cal1": {"busy": []}}}),
        ))]);

        free_busy(&transport)
            .query("cal1", &range().time_zone("Europe/Berlin"))
            .await
            .unwrap();

        assert_eq!(transport.last().unwrap().body.unwrap()["timeZone"], "Europe/Berlin");
    }

    #[tokio::test]
    async fn test_blank_timezone_falls_back() {
        let transport = RecordingTransport::replying(vec![Ok(ResourceResponse::new(
            200,
            json!({"calendars": {"cal1": {"busy": []}}}),
        ))]);

        free_busy(&transport)
            .query("cal1", &range().time_zone("  "))
            .await
            .unwrap();

        assert_eq!(transport.last().unwrap().body.unwrap()["timeZone"], "Asia/Singapore");
    }

    #[tokio::test]
    async fn test_calendar_errors_are_unexpected_body() {
        let transport = RecordingTransport::replying(vec![Ok(ResourceResponse::new(
            200,
            json!({"calendars": {"cal1": {"errors": [{"domain": "global", "reason": "notFound"}]}}}),
        ))]);

        let err = free_busy(&transport).query("cal1", &range()).await.unwrap_err();

        assert_eq!(err.origin, "FreeBusy.query");
        assert!(matches!(err.error, ErrorDetail::UnexpectedBody(_)));
    }

    #[tokio::test]
    async fn test_missing_calendar_is_unexpected_body() {
        let transport = RecordingTransport::replying(vec![Ok(ResourceResponse::new(
            200,
            json!({"calendars": {}}),
        ))]);

        let err = free_busy(&transport).query("cal1", &range()).await.unwrap_err();

        assert!(matches!(err.error, ErrorDetail::UnexpectedBody(_)));
    }

    #[tokio::test]
    async fn test_requires_time_range() {
        let transport = RecordingTransport::new();

        let err = free_busy(&transport)
            .query("cal1", &FreeBusyQuery::new("", "2016-04-30T00:00:00+08:00"))
            .await
            .unwrap_err();

        assert_eq!(err.error, ErrorDetail::Validation("Missing timeMin argument".into()));
        assert_eq!(transport.calls(), 0);
    }
}
