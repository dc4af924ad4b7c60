//! Color palette definitions for calendars and events.

use serde_json::Value;
use tracing::instrument;

use crate::error::NormalizedError;
use crate::resource::{Operation, Request, ResourceCore};

const GET: Operation = Operation::get("Colors.get");

#[derive(Clone)]
pub struct Colors {
    core: ResourceCore,
}

impl Colors {
    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    /// `{calendar: {...}, event: {...}}` keyed by color id.
    ///
    /// # Errors
    /// Status or transport failures tagged `Colors.get`.
    #[instrument(skip(self), level = "info")]
    pub async fn get(&self) -> Result<Value, NormalizedError> {
        self.core
            .body(&GET, Request::new(self.core.base_url().to_string()))
            .await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::test_support::{core, RecordingTransport};
    use crate::transport::ResourceResponse;
    use serde_json::json;

    const BASE: &str = "https://www.googleapis.com/calendar/v3/colors";

    #[tokio::test]
    async fn test_get_palette() {
        let palette = json!({
            "kind": "calendar#colors",
            "event": {"1": {"background": "#a4bdfc", "foreground": "#1d1d1d"}}
        });
        let transport =
            RecordingTransport::replying(vec![Ok(ResourceResponse::new(200, palette.clone()))]);

        let colors = Colors::new(core(transport.clone(), BASE)).get().await.unwrap();

        assert_eq!(colors, palette);
        assert_eq!(transport.last().unwrap().url, BASE);
    }

    #[tokio::test]
    async fn test_server_error() {
        let transport = RecordingTransport::replying(vec![Ok(ResourceResponse::new(
            500,
            Value::String("backend error".into()),
        ))]);

        let err = Colors::new(core(transport, BASE)).get().await.unwrap_err();

        assert_eq!(err.origin, "Colors.get");
        assert_eq!(err.to_json()["error"]["errorBody"], "backend error");
    }
}
